//! 产品资源：模型、校验、服务与处理器

pub mod handler;
pub mod model;
pub mod service;
pub mod validation;
