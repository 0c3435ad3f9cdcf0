// ==========================================
// 原材料切割收益优化系统 - 材料领域模型
// ==========================================
// 用途: 目录层写入,引擎层只读
// 对齐: material_type / piece_price 表
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// MaterialType - 材料类型主数据
// ==========================================
// 红线: 名称全目录唯一
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialType {
    // ===== 主键 =====
    pub material_id: String, // 材料唯一标识（UUID v4）

    // ===== 基础信息 =====
    pub name: String,                // 材料名称（目录内唯一）
    pub description: Option<String>, // 材料描述

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
    pub updated_at: DateTime<Utc>, // 记录更新时间
}

impl MaterialType {
    /// 创建新的材料类型（生成 UUID 主键并打上当前时间戳）
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            material_id: Uuid::new_v4().to_string(),
            name: name.into(),
            description,
            created_at: now,
            updated_at: now,
        }
    }
}

// ==========================================
// PricePoint - 单个尺寸的片段价格
// ==========================================
// 一个材料的价格表是一组 PricePoint,尺寸在表内唯一;
// 重复注册同一尺寸时后写覆盖先写（确定性的 last-write-wins）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub size: u32,  // 片段尺寸（正整数,一维长度）
    pub price: f64, // 片段售价（非负,允许小数）
}

impl PricePoint {
    pub fn new(size: u32, price: f64) -> Self {
        Self { size, price }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_type_new_assigns_uuid() {
        let a = MaterialType::new("冷轧钢带", Some("1.2mm 冷轧".to_string()));
        let b = MaterialType::new("冷轧钢带", None);
        assert_ne!(a.material_id, b.material_id);
        assert_eq!(a.name, "冷轧钢带");
        assert!(!a.material_id.is_empty());
    }
}
