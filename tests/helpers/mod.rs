// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、AppState 装配等功能
// ==========================================
#![allow(dead_code)]

use std::error::Error;

use material_cutting::app::AppState;
use material_cutting::db;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化表结构
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    material_cutting::logging::init_test();

    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = db::open_sqlite_connection(&db_path)?;
    db::init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 在临时数据库上装配完整 AppState
pub fn create_test_app() -> Result<(NamedTempFile, AppState), Box<dyn Error>> {
    let (temp_file, db_path) = create_test_db()?;
    let state = AppState::new(db_path)?;
    Ok((temp_file, state))
}
