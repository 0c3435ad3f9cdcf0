// ==========================================
// 原材料切割收益优化系统 - API 层
// ==========================================
// 职责: 业务接口,组合仓储与引擎,参数校验与错误转换
// ==========================================

pub mod cutting_api;
pub mod error;
pub mod material_api;
pub mod price_api;

pub use cutting_api::{CuttingApi, OptimizeOutcome};
pub use error::{ApiError, ApiResult};
pub use material_api::MaterialApi;
pub use price_api::{MaterialPriceView, PriceApi};
