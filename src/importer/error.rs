// ==========================================
// 原材料切割收益优化系统 - 导入层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("不支持的文件格式: {0}")]
    UnsupportedFormat(String),

    #[error("CSV 表头缺少必需列: {0}")]
    MissingColumn(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}
