//! 核心中间件模块

use std::{any::Any, backtrace::Backtrace, sync::Arc};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::SecondsFormat;
use tracing::{error, info, warn};

use super::{error::CoreError, response::internal_error_response};

pub const API_KEY_HEADER: &str = "x-api-key";
pub const PRODUCTS_PATH: &str = "/api/products";

/// 预共享的 API key
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    pub fn matches(&self, provided: Option<&[u8]>) -> bool {
        provided == Some(self.0.as_bytes())
    }
}

/// 请求日志中间件，先于其他阶段记录时间戳、方法和路径
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let timestamp = chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    info!("[{}] {} {}", timestamp, req.method(), req.uri());

    next.run(req).await
}

/// 认证中间件，只拦截 `/api/products` 及其子路径
pub async fn api_key_middleware(
    State(api_key): State<ApiKey>,
    req: Request,
    next: Next,
) -> Result<Response, CoreError> {
    if is_protected_path(req.uri().path()) {
        let provided = req.headers().get(API_KEY_HEADER).map(|h| h.as_bytes());
        if !api_key.matches(provided) {
            warn!("拒绝未认证的请求: {} {}", req.method(), req.uri().path());
            return Err(CoreError::Unauthorized);
        }
    }

    Ok(next.run(req).await)
}

pub fn is_protected_path(path: &str) -> bool {
    path.strip_prefix(PRODUCTS_PATH)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// panic 兜底：记录 panic 信息和调用栈，返回通用 500
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "未知的 panic 负载"
    };

    error!(
        "请求处理过程中发生 panic: {}\n{}",
        detail,
        Backtrace::force_capture()
    );

    internal_error_response()
}
