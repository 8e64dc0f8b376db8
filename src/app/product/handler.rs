//! 产品处理器

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use super::{model::Product, service::ProductService};
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(get_all_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, CoreError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| CoreError::BadRequest(rejection.body_text()))
}

fn json_body(body: Result<Json<Product>, JsonRejection>) -> Result<Product, CoreError> {
    body.map(|Json(product)| product)
        .map_err(|rejection| CoreError::BadRequest(rejection.body_text()))
}

pub async fn get_all_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, CoreError> {
    let products = state.product_service.get_all_products().await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Product>, CoreError> {
    let id = path_id(path)?;
    let product = state.product_service.get_product_by_id(id).await?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<Product>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), CoreError> {
    let product = state.product_service.create_product(json_body(body)?).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<Product>, JsonRejection>,
) -> Result<Json<Product>, CoreError> {
    let id = path_id(path)?;
    let product = state
        .product_service
        .update_product(id, json_body(body)?)
        .await?;
    Ok(Json(product))
}

/// 删除是幂等的：记录不存在时同样返回空的 200 响应
pub async fn delete_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, CoreError> {
    let id = path_id(path)?;
    state.product_service.delete_product(id).await?;
    Ok(StatusCode::OK)
}
