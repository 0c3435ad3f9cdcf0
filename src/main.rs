// ==========================================
// 原材料切割收益优化系统 - HTTP 服务主入口
// ==========================================
// 技术栈: Rust + SQLite + axum
// 系统定位: 决策支持系统
// ==========================================

use std::sync::Arc;

use material_cutting::app::{get_default_db_path, AppState};
use material_cutting::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    material_cutting::logging::init();

    tracing::info!("==================================================");
    tracing::info!("原材料切割收益优化系统 - 决策支持系统");
    tracing::info!("系统版本: {}", material_cutting::VERSION);
    tracing::info!("==================================================");

    // 获取数据库路径
    let db_path =
        std::env::var("MATERIAL_CUTTING_DB").unwrap_or_else(|_| get_default_db_path());
    tracing::info!("使用数据库: {}", db_path);

    // 创建AppState
    let app_state =
        AppState::new(db_path).map_err(|e| anyhow::anyhow!("无法初始化AppState: {}", e))?;

    // 启动 HTTP 服务
    let addr = std::env::var("MATERIAL_CUTTING_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("HTTP 服务监听: {}", addr);

    axum::serve(listener, server::build_router(Arc::new(app_state))).await?;

    tracing::info!("HTTP 服务已退出");
    Ok(())
}
