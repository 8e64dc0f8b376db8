//! 产品业务服务

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::model::Product;
use super::store::{ProductStore, StoreError};

/// 服务层错误
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{message}")]
    NotFound { id: i64, message: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    fn not_found(id: i64) -> Self {
        Self::NotFound {
            id,
            message: format!("Product with id {} not found", id),
        }
    }
}

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub async fn create_product(&self, product: Product) -> Result<Product, ServiceError> {
        let saved = self.store.save(product).await?;
        info!(id = ?saved.id, name = %saved.name, "产品已创建");
        Ok(saved)
    }

    /// 覆盖已有产品的全部可变字段，请求体中的 id 被忽略
    pub async fn update_product(&self, id: i64, product: Product) -> Result<Product, ServiceError> {
        let Some(mut existing) = self.store.find_by_id(id).await? else {
            warn!(id, "更新失败，产品不存在");
            return Err(ServiceError::not_found(id));
        };

        existing.overwrite_with(product);
        let saved = self.store.save(existing).await?;
        info!(id, "产品已更新");
        Ok(saved)
    }

    /// 返回是否真的删除了记录；记录不存在时返回 `false` 而不是错误
    pub async fn delete_product(&self, id: i64) -> Result<bool, ServiceError> {
        match self.store.find_by_id(id).await? {
            Some(product) => {
                self.store.delete(&product).await?;
                info!(id, "产品已删除");
                Ok(true)
            }
            None => {
                debug!(id, "删除跳过，产品不存在");
                Ok(false)
            }
        }
    }

    pub async fn get_all_products(&self) -> Result<Vec<Product>, ServiceError> {
        let products = self.store.find_all().await?;
        debug!(count = products.len(), "获取全部产品");
        Ok(products)
    }

    pub async fn get_product_by_id(&self, id: i64) -> Result<Product, ServiceError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(id))
    }
}
