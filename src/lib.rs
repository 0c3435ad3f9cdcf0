// ==========================================
// 原材料切割收益优化系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite + axum
// 系统定位: 决策支持系统 (切割方案仅供参考,人工最终控制权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 切割优化
pub mod engine;

// 导入层 - 外部价格数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA/建表 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// HTTP 服务层 - 路由与错误映射
pub mod server;

// 应用层 - 装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{CutPlan, MaterialType, PricePoint};

// 引擎
pub use engine::{CuttingEngine, CuttingError, CuttingResult};

// API
pub use api::{ApiError, ApiResult, CuttingApi, MaterialApi, PriceApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "原材料切割收益优化系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
