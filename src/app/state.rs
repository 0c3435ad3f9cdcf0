// ==========================================
// 原材料切割收益优化系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::api::{CuttingApi, MaterialApi, PriceApi};
use crate::config::config_manager::ConfigManager;
use crate::engine::cutting::CuttingEngine;
use crate::repository::material_repo::MaterialRepository;
use crate::repository::price_repo::PriceListRepository;

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 材料API
    pub material_api: Arc<MaterialApi>,

    /// 价格表API
    pub price_api: Arc<PriceApi>,

    /// 切割方案API
    pub cutting_api: Arc<CuttingApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开共享数据库连接并初始化表结构
    /// 2. 初始化所有Repository
    /// 3. 读取配置并构建切割引擎
    /// 4. 创建所有API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        // 创建数据库连接（共享连接）
        let conn = crate::db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        crate::db::init_schema(&conn).map_err(|e| format!("无法初始化表结构: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let material_repo = Arc::new(MaterialRepository::from_connection(conn.clone()));
        let price_repo = Arc::new(PriceListRepository::from_connection(conn.clone()));

        // ==========================================
        // 配置与引擎
        // ==========================================
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let engine = CuttingEngine::with_max_length(config_manager.get_max_cut_length());

        // ==========================================
        // 创建API实例
        // ==========================================
        let material_api = Arc::new(MaterialApi::new(material_repo.clone()));
        let price_api = Arc::new(PriceApi::new(material_repo.clone(), price_repo.clone()));
        let cutting_api = Arc::new(CuttingApi::new(material_repo, price_repo, engine));

        tracing::info!("AppState初始化成功");

        Ok(Self {
            db_path,
            material_api,
            price_api,
            cutting_api,
            config_manager,
        })
    }
}
