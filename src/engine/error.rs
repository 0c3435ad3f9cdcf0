// ==========================================
// 原材料切割收益优化系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 切割引擎错误类型
///
/// 两类结果作为显式 Result 变体向上传播,不用于普通控制流;
/// 出错时绝不附带残缺的切割方案。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CuttingError {
    /// 入参非法: 负长度、超出配置上限、价格表含非正尺寸或负价格
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// 入参合法,但现有片段尺寸无法恰好组合出目标长度
    #[error("无法恰好切分: 现有片段尺寸无法组合出目标长度 {length}")]
    Unsatisfiable { length: i64 },
}

/// Result 类型别名
pub type CuttingResult<T> = Result<T, CuttingError>;
