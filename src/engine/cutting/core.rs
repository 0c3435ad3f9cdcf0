use crate::domain::cut_plan::CutPlan;
use crate::domain::material::PricePoint;
use crate::engine::error::{CuttingError, CuttingResult};
use std::collections::BTreeMap;

/// 默认目标长度上限
///
/// 备忘表占用 O(length) 空间,超限请求直接拒绝,
/// 避免单次调用触发不受控的内存分配。
pub const DEFAULT_MAX_LENGTH: i64 = 100_000;

// ==========================================
// CuttingEngine - 切割优化引擎
// ==========================================
/// 切割优化引擎
///
/// 给定材料的价格表与原料长度,计算收益最大的切割方式。
/// 无状态纯计算: 不持有连接、不做 I/O,可被多个调用方并发使用;
/// 调用期间要求价格表快照不被修改（传入不可变切片即可）。
///
/// 复杂度: O(length × 价格表条数) 时间, O(length) 空间。
pub struct CuttingEngine {
    max_length: i64,
}

impl CuttingEngine {
    /// 构造函数（使用默认长度上限）
    pub fn new() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// 指定目标长度上限构造
    ///
    /// # 参数
    /// - max_length: 允许的最大目标长度（配置层提供）
    pub fn with_max_length(max_length: i64) -> Self {
        Self { max_length }
    }

    /// 当前生效的目标长度上限
    pub fn max_length(&self) -> i64 {
        self.max_length
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算收益最大的切割方案
    ///
    /// 自底向上动态规划: best[n] 表示子长度 n 的最大收益,
    /// best[n] = max{ price(s) + best[n-s] | s ≤ n 且 best[n-s] 可达 }。
    ///
    /// 同一子长度出现并列最优时,按尺寸升序保留**首个**达到最优的
    /// 选择（仅严格更优才替换）,保证跨运行输出可复现。
    ///
    /// # 参数
    /// - prices: 价格表（顺序无关,同尺寸重复时后写覆盖先写）
    /// - length: 目标长度（非负整数）
    ///
    /// # 返回
    /// - Ok(CutPlan): 方案,cuts 之和等于 length
    /// - Err(InvalidArgument): 负长度/超上限/价格表条目非法
    /// - Err(Unsatisfiable): 现有尺寸无法恰好组合出 length
    pub fn optimize(&self, prices: &[PricePoint], length: i64) -> CuttingResult<CutPlan> {
        if length < 0 {
            return Err(CuttingError::InvalidArgument(format!(
                "目标长度不能为负: {}",
                length
            )));
        }
        if length > self.max_length {
            return Err(CuttingError::InvalidArgument(format!(
                "目标长度 {} 超过上限 {}",
                length, self.max_length
            )));
        }

        let table = Self::normalize_prices(prices)?;

        let n = length as usize;
        if n == 0 {
            return Ok(CutPlan::empty());
        }
        if table.is_empty() {
            return Err(CuttingError::Unsatisfiable { length });
        }

        // best[i]: 子长度 i 的最大收益; None 表示不可达。
        // 不可达必须显式建模: 用哨兵值(-1 之类)占位会和合法的
        // 零收益/低收益混淆,进而回溯出错误的切割序列。
        let mut best: Vec<Option<f64>> = vec![None; n + 1];
        // choice[i]: 子长度 i 取得 best[i] 时选用的尺寸（仅可达项有效）
        let mut choice: Vec<u32> = vec![0; n + 1];
        best[0] = Some(0.0);

        for sub in 1..=n {
            let mut sub_best: Option<f64> = None;
            for (&size, &price) in &table {
                let s = size as usize;
                if s > sub {
                    break; // table 按尺寸升序,后续尺寸只会更大
                }
                if let Some(prev) = best[sub - s] {
                    let candidate = price + prev;
                    let strictly_better = match sub_best {
                        None => true,
                        Some(current) => candidate > current,
                    };
                    if strictly_better {
                        sub_best = Some(candidate);
                        choice[sub] = size;
                    }
                }
            }
            best[sub] = sub_best;
        }

        let max_profit = best[n].ok_or(CuttingError::Unsatisfiable { length })?;

        // 回溯重建切割序列: 从 length 反向走 choice 表直到归零
        let mut cuts = Vec::new();
        let mut remaining = n;
        while remaining > 0 {
            let size = choice[remaining];
            cuts.push(size);
            remaining -= size as usize;
        }

        Ok(CutPlan { max_profit, cuts })
    }

    /// 规范化价格表: 校验条目并按尺寸升序去重
    ///
    /// 同尺寸重复条目后写覆盖先写,与目录层的写入语义一致。
    fn normalize_prices(prices: &[PricePoint]) -> CuttingResult<BTreeMap<u32, f64>> {
        let mut table = BTreeMap::new();
        for point in prices {
            if point.size == 0 {
                return Err(CuttingError::InvalidArgument(
                    "片段尺寸必须为正整数".to_string(),
                ));
            }
            if !point.price.is_finite() || point.price < 0.0 {
                return Err(CuttingError::InvalidArgument(format!(
                    "片段价格必须为非负有限值: size={}, price={}",
                    point.size, point.price
                )));
            }
            table.insert(point.size, point.price);
        }
        Ok(table)
    }
}

impl Default for CuttingEngine {
    fn default() -> Self {
        Self::new()
    }
}
