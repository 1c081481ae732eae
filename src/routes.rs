//! 路由组装
//!
//! 请求依次经过：panic 兜底 → 请求日志 → API key 认证 → 路由分发。

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::app::products::{
    handler::{self, AppState},
    service::ProductService,
};
use crate::core::middleware::{
    api_key_middleware, handle_panic, request_logging_middleware, ApiKey,
};
use crate::infrastructure::store::ProductStore;

/// 请求体上限，超出时按内部错误处理
pub const BODY_LIMIT_BYTES: usize = 100 * 1024;

/// 完整的应用路由
pub fn build_router(store: Arc<ProductStore>, api_key: impl Into<Arc<str>>) -> Router {
    with_pipeline(product_router(store), api_key)
}

pub fn product_router(store: Arc<ProductStore>) -> Router {
    let state = AppState {
        product_service: ProductService::new(store),
    };

    let collection = || -> MethodRouter<AppState> {
        get(handler::list_products)
            .post(handler::create_product)
            .fallback(handler::route_not_found)
    };
    let item = || -> MethodRouter<AppState> {
        get(handler::get_product)
            .put(handler::update_product)
            .delete(handler::delete_product)
            .fallback(handler::route_not_found)
    };

    // 末尾斜杠与不带斜杠的路径等价
    Router::new()
        .route("/", get(handler::root))
        .route("/api/products", collection())
        .route("/api/products/", collection())
        .route("/api/products/:id", item())
        .route("/api/products/:id/", item())
        .fallback(handler::route_not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}

/// 给任意路由套上日志、认证和 panic 兜底
pub fn with_pipeline(router: Router, api_key: impl Into<Arc<str>>) -> Router {
    router
        .layer(middleware::from_fn_with_state(
            ApiKey::new(api_key),
            api_key_middleware,
        ))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}
