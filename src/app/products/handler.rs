//! 产品处理器

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::Json,
};
use serde_json::Value;

use super::{
    model::{DeleteProductResponse, NewProduct, Product},
    service::ProductService,
    validation::validate_product,
};
use crate::core::error::CoreError;

pub const GREETING: &str = "Hello World! Welcome to the Product API 🚀";

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

pub async fn root() -> &'static str {
    GREETING
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, CoreError> {
    Ok(Json(state.product_service.list_products()?))
}

pub async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Product>, CoreError> {
    let Path(id) = path?;
    Ok(Json(state.product_service.get_product(&id)?))
}

pub async fn create_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Product>), CoreError> {
    let input = parse_product(&headers, &body?)?;
    let product = state.product_service.create_product(input)?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Product>, CoreError> {
    let Path(id) = path?;
    let input = parse_product(&headers, &body?)?;
    Ok(Json(state.product_service.update_product(&id, input)?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteProductResponse>, CoreError> {
    let Path(id) = path?;
    let removed = state.product_service.delete_product(&id)?;
    Ok(Json(DeleteProductResponse::new(removed)))
}

pub async fn route_not_found() -> CoreError {
    CoreError::RouteNotFound
}

/// 非 JSON 类型或空请求体按缺字段处理；无法解析的 JSON 属于内部错误
fn parse_product(headers: &HeaderMap, body: &[u8]) -> Result<NewProduct, CoreError> {
    let payload = if !is_json_content(headers) || body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(body)
            .map_err(|e| CoreError::internal(format!("请求体 JSON 解析失败: {}", e)))?
    };

    Ok(validate_product(&payload)?)
}

fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
