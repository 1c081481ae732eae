//! 核心错误处理模块

use std::{backtrace::Backtrace, fmt};

use axum::{
    extract::rejection::{BytesRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use super::response::{internal_error_response, MessageResponse};
use crate::app::products::validation::ValidationError;

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Unauthorized. Invalid or missing API key.")]
    Unauthorized,
    #[error("Product not found")]
    NotFound,
    #[error("Route not found")]
    RouteNotFound,
    /// 细节只进日志，不会返回给调用方
    #[error("内部错误: {0}")]
    Internal(InternalFailure),
}

/// 内部失败的描述和构造时捕获的调用栈
#[derive(Debug)]
pub struct InternalFailure {
    pub detail: String,
    pub backtrace: Backtrace,
}

impl fmt::Display for InternalFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}

impl CoreError {
    pub fn internal(detail: impl Into<String>) -> Self {
        CoreError::Internal(InternalFailure {
            detail: detail.into(),
            backtrace: Backtrace::force_capture(),
        })
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::Unauthorized => StatusCode::UNAUTHORIZED,
            CoreError::NotFound | CoreError::RouteNotFound => StatusCode::NOT_FOUND,
            CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PathRejection> for CoreError {
    fn from(rejection: PathRejection) -> Self {
        CoreError::internal(format!("路径参数提取失败: {}", rejection.body_text()))
    }
}

impl From<BytesRejection> for CoreError {
    fn from(rejection: BytesRejection) -> Self {
        CoreError::internal(format!("请求体读取失败: {}", rejection.body_text()))
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        if let CoreError::Internal(failure) = &self {
            error!(
                "未处理的内部错误: {}\n{}",
                failure.detail, failure.backtrace
            );
            return internal_error_response();
        }

        (self.status(), MessageResponse::new(self.to_string())).into_response()
    }
}
