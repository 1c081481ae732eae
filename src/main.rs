use std::sync::Arc;

use anyhow::Context;
use product_api::{
    app::products::service::ProductService,
    build_router,
    infrastructure::{
        config::{find_config_file, Config},
        logger::Logger,
    },
    ProductStore,
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("加载配置失败")?;
    Logger::init(&config.logging.level)?;

    match find_config_file() {
        Some(path) => info!("从配置文件加载: {}", path),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let store = Arc::new(ProductStore::new());
    if config.seed_sample_data {
        let count = ProductService::new(Arc::clone(&store)).seed_sample_data()?;
        info!("✅ 已初始化 {} 个示例产品", count);
    }

    let app = build_router(store, config.auth.api_key.as_str());

    let addr = config.http.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("Server running on http://localhost:{}", config.http.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务器运行失败")?;

    info!("服务器已关闭");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("监听关闭信号失败: {}", e);
    }
}
