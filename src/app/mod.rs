// ==========================================
// 原材料切割收益优化系统 - 应用层
// ==========================================

pub mod state;

pub use state::AppState;

use std::path::PathBuf;

/// 默认数据库文件路径
///
/// 优先使用系统数据目录（~/.local/share 等）,不可用时回落当前目录。
pub fn get_default_db_path() -> String {
    let base: PathBuf = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    let dir = base.join("material-cutting");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!(error = %e, "创建数据目录失败,回落当前目录");
        return "material_cutting.db".to_string();
    }
    dir.join("material_cutting.db").display().to_string()
}
