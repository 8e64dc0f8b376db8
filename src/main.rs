use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use product_api::infrastructure::{
    config::{load_config, AppConfig},
    logger::init_logging,
    memory_store::InMemoryProductStore,
};
use product_api::{build_router, ProductService, ProductStore};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("加载配置失败")?;
    let _guard = init_logging(&config.logging).context("初始化日志失败")?;

    info!("启动产品服务...");

    let store = build_store(&config).await?;
    let app = build_router(
        ProductService::new(store),
        Duration::from_secs(config.http.timeout_seconds),
    );

    let addr = config.http.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 产品服务运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /products      - 获取所有产品");
    info!("   POST   /products      - 创建产品");
    info!("   GET    /products/:id  - 获取特定产品");
    info!("   PUT    /products/:id  - 更新产品");
    info!("   DELETE /products/:id  - 删除产品");
    info!("   GET    /health        - 健康检查");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务器运行失败")?;

    info!("产品服务已停止");
    Ok(())
}

#[cfg(feature = "database")]
async fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn ProductStore>> {
    use product_api::infrastructure::database::{DatabaseManager, PgProductStore};

    let Some(url) = config.database.url.as_deref() else {
        info!("未配置数据库，使用内存存储");
        return Ok(Arc::new(InMemoryProductStore::new()));
    };

    let manager = DatabaseManager::new(url, &config.database)
        .await
        .context("连接数据库失败")?;
    manager.create_tables().await.context("创建数据库表失败")?;

    Ok(Arc::new(PgProductStore::new(manager.get_pool().clone())))
}

#[cfg(not(feature = "database"))]
async fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn ProductStore>> {
    if config.database.url.is_some() {
        warn!("未启用 database 特性，忽略数据库配置，使用内存存储");
    }
    Ok(Arc::new(InMemoryProductStore::new()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("监听关闭信号失败: {}", e);
        std::future::pending::<()>().await;
    }
    info!("收到关闭信号，正在停止服务...");
}
