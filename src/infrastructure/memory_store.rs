//! 内存产品存储

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::app::product::model::Product;
use crate::app::product::store::{ProductStore, StoreError};

#[derive(Default)]
struct Inner {
    products: BTreeMap<i64, Product>,
    last_id: i64,
}

/// 基于 `RwLock<BTreeMap>` 的存储，按 id 升序返回记录
#[derive(Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(inner.products.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(inner.products.values().cloned().collect())
    }

    async fn save(&self, mut product: Product) -> Result<Product, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        let id = match product.id {
            Some(id) => {
                inner.last_id = inner.last_id.max(id);
                id
            }
            None => {
                let next = inner.last_id.checked_add(1).ok_or(StoreError::IdExhausted)?;
                inner.last_id = next;
                next
            }
        };
        product.id = Some(id);
        inner.products.insert(id, product.clone());
        Ok(product)
    }

    async fn delete(&self, product: &Product) -> Result<(), StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;
        if let Some(id) = product.id {
            inner.products.remove(&id);
        }
        Ok(())
    }
}
