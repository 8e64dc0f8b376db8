//! 数据库基础设施

use async_trait::async_trait;
use sqlx::{
    postgres::{PgPool, PgPoolOptions},
    Error,
};
use std::time::Duration;
use tracing::info;

use super::config::DatabaseConfig;
use crate::app::product::model::Product;
use crate::app::product::store::{ProductStore, StoreError};

pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub async fn new(database_url: &str, config: &DatabaseConfig) -> Result<Self, Error> {
        info!(
            "连接数据库: {}",
            database_url.rsplit('@').next().unwrap_or("<unknown>")
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// 创建产品表（幂等）
    pub async fn create_tables(&self) -> Result<(), Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                quantity BIGINT NOT NULL,
                description TEXT NOT NULL,
                price DOUBLE PRECISION NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("数据库表已就绪");
        Ok(())
    }
}

impl From<Error> for StoreError {
    fn from(err: Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

/// PostgreSQL 产品存储
#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, quantity, description, price FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, quantity, description, price FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    async fn save(&self, product: Product) -> Result<Product, StoreError> {
        let Some(id) = product.id else {
            let saved = sqlx::query_as::<_, Product>(
                "INSERT INTO products (name, quantity, description, price) VALUES ($1, $2, $3, $4) \
                 RETURNING id, name, quantity, description, price",
            )
            .bind(&product.name)
            .bind(product.quantity)
            .bind(&product.description)
            .bind(product.price)
            .fetch_one(&self.pool)
            .await?;
            return Ok(saved);
        };

        // upsert 与序列推进必须同时生效
        let mut tx = self.pool.begin().await?;

        let saved = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (id, name, quantity, description, price)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                quantity = EXCLUDED.quantity,
                description = EXCLUDED.description,
                price = EXCLUDED.price
            RETURNING id, name, quantity, description, price
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(product.quantity)
        .bind(&product.description)
        .bind(product.price)
        .fetch_one(&mut *tx)
        .await?;

        // 显式 id 可能超过序列当前值
        sqlx::query(
            "SELECT setval(pg_get_serial_sequence('products', 'id'), GREATEST((SELECT MAX(id) FROM products), 1))",
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(saved)
    }

    async fn delete(&self, product: &Product) -> Result<(), StoreError> {
        if let Some(id) = product.id {
            sqlx::query("DELETE FROM products WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> PgProductStore {
        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a test database");
        let manager = DatabaseManager::new(&database_url, &DatabaseConfig::default())
            .await
            .unwrap();
        manager.create_tables().await.unwrap();
        PgProductStore::new(manager.get_pool().clone())
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_explicit_id_then_generated_id() {
        let store = test_store().await;
        let (max_id,): (Option<i64>,) = sqlx::query_as("SELECT MAX(id) FROM products")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        let explicit_id = max_id.unwrap_or(0) + 1000;

        let explicit = store
            .save(Product::new("explicit", 1, "explicit", 1.0).with_id(explicit_id))
            .await
            .unwrap();
        assert_eq!(explicit.id, Some(explicit_id));

        let overwritten = store
            .save(Product::new("overwritten", 2, "overwritten", 2.0).with_id(explicit_id))
            .await
            .unwrap();
        assert_eq!(
            store.find_by_id(explicit_id).await.unwrap(),
            Some(overwritten)
        );

        let generated = store
            .save(Product::new("generated", 3, "generated", 3.0))
            .await
            .unwrap();
        let generated_id = generated.id.unwrap();
        assert!(generated_id > explicit_id);

        store.delete(&explicit).await.unwrap();
        store.delete(&generated).await.unwrap();
        assert_eq!(store.find_by_id(explicit_id).await.unwrap(), None);
        assert_eq!(store.find_by_id(generated_id).await.unwrap(), None);
    }
}
