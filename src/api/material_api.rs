// ==========================================
// 原材料切割收益优化系统 - 材料 API
// ==========================================
// 职责: 材料目录的注册、查询、删除
// 红线: 名称目录内唯一; 删除材料时价格表级联销毁
// ==========================================

use std::sync::Arc;
use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::material::MaterialType;
use crate::repository::material_repo::MaterialRepository;

// ==========================================
// MaterialApi - 材料 API
// ==========================================

/// 材料API
///
/// 职责：
/// 1. 材料注册（名称查重）
/// 2. 材料查询（列表 / 详情）
/// 3. 材料删除（价格表随外键级联销毁）
pub struct MaterialApi {
    material_repo: Arc<MaterialRepository>,
}

impl MaterialApi {
    /// 创建新的MaterialApi实例
    pub fn new(material_repo: Arc<MaterialRepository>) -> Self {
        Self { material_repo }
    }

    // ==========================================
    // 写接口
    // ==========================================

    /// 注册新材料
    ///
    /// # 参数
    /// - name: 材料名称（必填,目录内唯一）
    /// - description: 材料描述（可选）
    ///
    /// # 返回
    /// - Ok(MaterialType): 新注册的材料（含生成的 material_id）
    /// - Err(InvalidInput): 名称为空
    /// - Err(AlreadyExists): 同名材料已注册
    pub fn register_material(
        &self,
        name: &str,
        description: Option<String>,
    ) -> ApiResult<MaterialType> {
        // 参数验证
        if name.trim().is_empty() {
            return Err(ApiError::InvalidInput("材料名称不能为空".to_string()));
        }

        // 名称查重
        if let Some(existing) = self.material_repo.find_by_name(name)? {
            return Err(ApiError::AlreadyExists(format!(
                "材料 {} 已注册 (id={})",
                name, existing.material_id
            )));
        }

        let material = MaterialType::new(name.trim(), description);
        self.material_repo.insert(&material)?;

        info!(material_id = %material.material_id, name = %material.name, "材料注册成功");
        Ok(material)
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 查询全部材料
    pub fn list_materials(&self) -> ApiResult<Vec<MaterialType>> {
        let materials = self.material_repo.list_all()?;
        debug!(count = materials.len(), "查询材料列表");
        Ok(materials)
    }

    /// 查询材料详情
    ///
    /// # 返回
    /// - Ok(MaterialType): 材料详情
    /// - Err(NotFound): 材料不存在
    pub fn get_material_detail(&self, material_id: &str) -> ApiResult<MaterialType> {
        if material_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("材料ID不能为空".to_string()));
        }

        self.material_repo
            .find_by_id(material_id)?
            .ok_or_else(|| ApiError::NotFound(format!("材料(id={})不存在", material_id)))
    }

    // ==========================================
    // 删除接口
    // ==========================================

    /// 删除材料及其价格表
    ///
    /// 价格表通过外键级联一并删除。
    ///
    /// # 返回
    /// - Ok(MaterialType): 被删除的材料
    /// - Err(NotFound): 材料不存在
    pub fn delete_material(&self, material_id: &str) -> ApiResult<MaterialType> {
        let material = self.get_material_detail(material_id)?;

        let deleted = self.material_repo.delete(material_id)?;
        if !deleted {
            return Err(ApiError::NotFound(format!(
                "材料(id={})不存在",
                material_id
            )));
        }

        info!(material_id = %material_id, name = %material.name, "材料已删除(价格表级联销毁)");
        Ok(material)
    }
}
