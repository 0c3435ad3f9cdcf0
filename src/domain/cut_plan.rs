// ==========================================
// 原材料切割收益优化系统 - 切割方案
// ==========================================
// 用途: 引擎输出,每次调用新建,不落库
// ==========================================

use serde::{Deserialize, Serialize};

/// 切割方案
///
/// 不变式: cuts 中每个尺寸都来自计算时使用的价格表,
/// 且 cuts 之和等于输入长度（零长度时为空序列）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutPlan {
    /// 最大可得总价
    pub max_profit: f64,

    /// 切割尺寸序列（回溯重建,和为输入长度）
    pub cuts: Vec<u32>,
}

impl CutPlan {
    /// 空方案（长度为零时的唯一合法输出）
    pub fn empty() -> Self {
        Self {
            max_profit: 0.0,
            cuts: Vec::new(),
        }
    }

    /// cuts 序列的总长度
    pub fn total_length(&self) -> u64 {
        self.cuts.iter().map(|&s| u64::from(s)).sum()
    }
}
