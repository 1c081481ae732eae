//! # Product API
//!
//! 基于 Axum 的内存产品 CRUD 服务：
//! - `app`：产品模型、校验、服务与处理器
//! - `core`：统一错误、响应体与中间件（请求日志、API key 认证、panic 兜底）
//! - `infrastructure`：配置、日志与内存存储
//! - `routes`：路由与中间件组装

pub mod app;
pub mod core;
pub mod infrastructure;
pub mod routes;

pub use app::products::model::{NewProduct, Product};
pub use infrastructure::{config::Config, store::ProductStore};
pub use routes::build_router;
