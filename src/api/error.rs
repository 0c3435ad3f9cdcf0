// ==========================================
// 原材料切割收益优化系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,转换仓储/引擎错误为用户友好的错误消息
// 红线: 所有错误信息必须包含显式原因（可解释性）
// ==========================================

use crate::engine::error::CuttingError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("资源已存在: {0}")]
    AlreadyExists(String),

    /// 入参合法但现有片段尺寸无法恰好组合出目标长度。
    /// 与零收益的成功方案是两种不同结果,绝不混用同一响应形态。
    #[error("无法恰好切分: 现有片段尺寸无法组合出目标长度 {length}")]
    Unsatisfiable { length: i64 },

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 RepositoryError 转换
// 目的: 将仓储层的技术错误转换为用户友好的业务错误
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::UniqueConstraintViolation(msg) => ApiError::AlreadyExists(msg),
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::InvalidInput(format!("外键约束违反: {}", msg))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseTransactionError(msg)
            | RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::ValidationError(msg) => ApiError::InvalidInput(msg),
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 CuttingError 转换
// 说明: 引擎错误按原语义透传,不降级为内部错误
// ==========================================
impl From<CuttingError> for ApiError {
    fn from(err: CuttingError) -> Self {
        match err {
            CuttingError::InvalidArgument(msg) => ApiError::InvalidInput(msg),
            CuttingError::Unsatisfiable { length } => ApiError::Unsatisfiable { length },
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_conversion() {
        // NotFound错误转换
        let repo_err = RepositoryError::NotFound {
            entity: "MaterialType".to_string(),
            id: "M001".to_string(),
        };
        let api_err: ApiError = repo_err.into();
        match api_err {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("MaterialType"));
                assert!(msg.contains("M001"));
            }
            _ => panic!("Expected NotFound"),
        }

        // 唯一约束冲突转换
        let repo_err = RepositoryError::UniqueConstraintViolation("name".to_string());
        let api_err: ApiError = repo_err.into();
        assert!(matches!(api_err, ApiError::AlreadyExists(_)));
    }

    #[test]
    fn test_cutting_error_conversion() {
        let api_err: ApiError = CuttingError::Unsatisfiable { length: 7 }.into();
        match api_err {
            ApiError::Unsatisfiable { length } => assert_eq!(length, 7),
            _ => panic!("Expected Unsatisfiable"),
        }

        let api_err: ApiError = CuttingError::InvalidArgument("负长度".to_string()).into();
        assert!(matches!(api_err, ApiError::InvalidInput(_)));
    }
}
