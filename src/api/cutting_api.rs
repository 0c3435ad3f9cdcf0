// ==========================================
// 原材料切割收益优化系统 - 切割方案 API
// ==========================================
// 职责: 解析材料与价格表,调用切割引擎,组装对外结果
// 红线: NotFound 由目录层在引擎调用前判定,引擎只接受已解析的价格表
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::cut_plan::CutPlan;
use crate::engine::cutting::CuttingEngine;
use crate::repository::material_repo::MaterialRepository;
use crate::repository::price_repo::PriceCatalog;

// ==========================================
// OptimizeOutcome - 切割方案计算结果
// ==========================================
/// 对外返回的切割方案（材料信息 + 方案本体）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeOutcome {
    pub material_id: String,
    pub material_name: String,
    pub description: Option<String>,

    /// 目标长度
    pub length: i64,

    #[serde(flatten)]
    pub plan: CutPlan,
}

// ==========================================
// CuttingApi - 切割方案 API
// ==========================================
pub struct CuttingApi {
    material_repo: Arc<MaterialRepository>,
    catalog: Arc<dyn PriceCatalog>,
    engine: CuttingEngine,
}

impl CuttingApi {
    /// 创建新的CuttingApi实例
    ///
    /// # 参数
    /// - material_repo: 材料目录仓储
    /// - catalog: 价格目录查询接口（测试中可注入字面量实现）
    /// - engine: 切割优化引擎
    pub fn new(
        material_repo: Arc<MaterialRepository>,
        catalog: Arc<dyn PriceCatalog>,
        engine: CuttingEngine,
    ) -> Self {
        Self {
            material_repo,
            catalog,
            engine,
        }
    }

    /// 计算材料在目标长度下收益最大的切割方案
    ///
    /// # 参数
    /// - material_id: 材料ID
    /// - length: 原料目标长度（非负整数,受配置上限约束）
    ///
    /// # 返回
    /// - Ok(OptimizeOutcome): 方案,cuts 之和等于 length
    /// - Err(NotFound): 材料不存在,或尚未注册价格表（引擎调用前判定）
    /// - Err(InvalidInput): 长度非法
    /// - Err(Unsatisfiable): 现有尺寸无法恰好组合出目标长度
    pub fn optimize_cuts(&self, material_id: &str, length: i64) -> ApiResult<OptimizeOutcome> {
        if material_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("材料ID不能为空".to_string()));
        }

        // 目录层解析: 材料必须存在
        let material = self
            .material_repo
            .find_by_id(material_id)?
            .ok_or_else(|| ApiError::NotFound(format!("材料(id={})不存在", material_id)))?;

        // 目录层解析: 价格表必须已注册
        let prices = self
            .catalog
            .price_list_for(material_id)?
            .ok_or_else(|| {
                ApiError::NotFound(format!("材料(id={})尚未注册价格表", material_id))
            })?;

        debug!(
            material_id = %material_id,
            length = length,
            price_count = prices.len(),
            "开始切割方案计算"
        );

        let plan = self.engine.optimize(&prices, length)?;

        info!(
            material_id = %material_id,
            length = length,
            max_profit = plan.max_profit,
            cut_count = plan.cuts.len(),
            "切割方案计算完成"
        );

        Ok(OptimizeOutcome {
            material_id: material.material_id,
            material_name: material.name,
            description: material.description,
            length,
            plan,
        })
    }
}
