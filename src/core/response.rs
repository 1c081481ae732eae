//! 核心响应处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong!";

/// 统一的 `{"message": ...}` 响应体
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// 500 响应，所有未预期的失败最终都落到这里
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        MessageResponse::new(INTERNAL_ERROR_MESSAGE),
    )
        .into_response()
}
