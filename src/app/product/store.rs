//! 产品存储抽象

use async_trait::async_trait;

use super::model::Product;

/// 存储层错误
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("product store lock poisoned during {0}")]
    LockPoisoned(&'static str),
    #[error("product id sequence exhausted")]
    IdExhausted,
    #[error("database error: {0}")]
    Database(String),
}

/// 产品持久化接口
///
/// 实现方需要自行保证并发安全，服务层不做任何加锁。
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, StoreError>;

    async fn find_all(&self) -> Result<Vec<Product>, StoreError>;

    /// `id` 为空时插入并分配新 id，否则覆盖同 id 的记录。
    /// 指定的 id 不存在时按该 id 插入。
    async fn save(&self, product: Product) -> Result<Product, StoreError>;

    /// 删除不存在的记录是空操作
    async fn delete(&self, product: &Product) -> Result<(), StoreError>;
}
