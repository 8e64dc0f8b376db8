//! 产品数据模型

use serde::{Deserialize, Serialize};

/// 产品记录
///
/// `id` 在持久化之前为 `None`，由存储层在创建时分配，之后不再改变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub quantity: i64,
    pub description: String,
    pub price: f64,
}

impl Product {
    /// 创建一个尚未持久化的产品
    pub fn new(
        name: impl Into<String>,
        quantity: i64,
        description: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            quantity,
            description: description.into(),
            price,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// 用 `other` 的可变字段覆盖当前记录，保留自身的 `id`
    pub fn overwrite_with(&mut self, other: Product) {
        self.name = other.name;
        self.description = other.description;
        self.quantity = other.quantity;
        self.price = other.price;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_persisted_product() {
        let product = Product::new("Product 1", 10, "description 1", 10.0).with_id(1);
        let value = serde_json::to_value(&product).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 1,
                "name": "Product 1",
                "quantity": 10,
                "description": "description 1",
                "price": 10.0
            })
        );
    }

    #[test]
    fn test_deserialize_without_id() {
        let product: Product = serde_json::from_value(json!({
            "name": "Test Product",
            "quantity": 10,
            "description": "Test Description",
            "price": 10.0
        }))
        .unwrap();

        assert_eq!(product.id, None);
        assert_eq!(product.name, "Test Product");
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let result: Result<Product, _> = serde_json::from_value(json!({
            "name": "Test Product",
            "quantity": 10,
            "price": 10.0
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_overwrite_keeps_id() {
        let mut existing = Product::new("old", 1, "old description", 1.0).with_id(7);
        existing.overwrite_with(Product::new("new", 2, "new description", 2.5).with_id(99));

        assert_eq!(existing, Product::new("new", 2, "new description", 2.5).with_id(7));
    }
}
