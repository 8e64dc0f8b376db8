//! # 产品 CRUD 服务
//!
//! 基于 Axum 的产品资源 REST 服务：
//! - `app`: 产品模型、存储接口、业务服务和 HTTP 处理器
//! - `core`: 统一错误响应与请求日志中间件
//! - `infrastructure`: 配置、日志以及内存 / PostgreSQL 存储实现

pub mod app;
pub mod core;
pub mod infrastructure;

use std::time::Duration;

use axum::{middleware, response::Json, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use app::product::handler::{self, AppState};
pub use app::product::{Product, ProductService, ProductStore, ServiceError, StoreError};

/// 组装完整的 HTTP 路由
pub fn build_router(product_service: ProductService, request_timeout: Duration) -> Router {
    let state = AppState { product_service };

    Router::new()
        .merge(handler::routes())
        .route("/health", get(health_check))
        .layer(middleware::from_fn(
            crate::core::middleware::request_logging_middleware,
        ))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 健康检查
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
