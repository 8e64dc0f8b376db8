//! 产品管理：模型、存储接口、业务服务与 HTTP 处理器

pub mod handler;
pub mod model;
pub mod service;
pub mod store;

pub use model::Product;
pub use service::{ProductService, ServiceError};
pub use store::{ProductStore, StoreError};
