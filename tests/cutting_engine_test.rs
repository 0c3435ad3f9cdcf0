// ==========================================
// 切割优化引擎 - 集成测试
// ==========================================
// 覆盖: 经典场景、不可达检测、确定性、方案不变式
// ==========================================

use material_cutting::domain::material::PricePoint;
use material_cutting::engine::cutting::CuttingEngine;
use material_cutting::engine::error::CuttingError;

fn price_list(entries: &[(u32, f64)]) -> Vec<PricePoint> {
    entries
        .iter()
        .map(|&(size, price)| PricePoint::new(size, price))
        .collect()
}

// ==========================================
// 经典场景
// ==========================================

#[test]
fn test_classic_rod_prices_length_four() {
    // 价格表 {1:1, 2:5, 3:8, 4:9, 5:10}, 长度 4:
    // 两段 2 (5+5=10) 优于整段 4 (9); 升序优先的并列处理下
    // 重建结果确定为 [2,2]
    let engine = CuttingEngine::new();
    let prices = price_list(&[(1, 1.0), (2, 5.0), (3, 8.0), (4, 9.0), (5, 10.0)]);

    let plan = engine.optimize(&prices, 4).unwrap();
    assert_eq!(plan.max_profit, 10.0);
    assert_eq!(plan.cuts, vec![2, 2]);
}

#[test]
fn test_classic_rod_prices_various_lengths() {
    let engine = CuttingEngine::new();
    let prices = price_list(&[(1, 1.0), (2, 5.0), (3, 8.0), (4, 9.0), (5, 10.0)]);

    // (长度, 期望收益)
    let expectations = [(1i64, 1.0), (2, 5.0), (3, 8.0), (5, 13.0), (7, 18.0), (10, 26.0)];
    for (length, expected) in expectations {
        let plan = engine.optimize(&prices, length).unwrap();
        assert_eq!(plan.max_profit, expected, "length={}", length);
        assert_eq!(plan.total_length(), length as u64, "length={}", length);
    }
}

#[test]
fn test_single_size_multiples_and_unsatisfiable() {
    let engine = CuttingEngine::new();
    let prices = price_list(&[(5, 10.0)]);

    let plan = engine.optimize(&prices, 10).unwrap();
    assert_eq!(plan.max_profit, 20.0);
    assert_eq!(plan.cuts, vec![5, 5]);

    // 7 不是 5 的倍数: 必须显式报不可达,不得返回残缺方案
    let err = engine.optimize(&prices, 7).unwrap_err();
    assert_eq!(err, CuttingError::Unsatisfiable { length: 7 });
}

#[test]
fn test_zero_length_is_empty_plan_not_error() {
    let engine = CuttingEngine::new();
    let prices = price_list(&[(5, 10.0)]);

    let plan = engine.optimize(&prices, 0).unwrap();
    assert_eq!(plan.max_profit, 0.0);
    assert!(plan.cuts.is_empty());
}

// ==========================================
// 输入校验
// ==========================================

#[test]
fn test_invalid_inputs() {
    let engine = CuttingEngine::with_max_length(1_000);
    let prices = price_list(&[(2, 3.0)]);

    assert!(matches!(
        engine.optimize(&prices, -5),
        Err(CuttingError::InvalidArgument(_))
    ));
    assert!(matches!(
        engine.optimize(&prices, 1_001),
        Err(CuttingError::InvalidArgument(_))
    ));
    assert!(matches!(
        engine.optimize(&price_list(&[(0, 3.0)]), 4),
        Err(CuttingError::InvalidArgument(_))
    ));
    assert!(matches!(
        engine.optimize(&price_list(&[(2, -0.5)]), 4),
        Err(CuttingError::InvalidArgument(_))
    ));
}

// ==========================================
// 确定性
// ==========================================

#[test]
fn test_determinism_across_input_order() {
    // 价格表顺序无关: 乱序输入与升序输入得到相同方案
    let engine = CuttingEngine::new();
    let ascending = price_list(&[(1, 1.0), (2, 5.0), (3, 8.0), (4, 9.0), (5, 10.0)]);
    let shuffled = price_list(&[(4, 9.0), (1, 1.0), (5, 10.0), (3, 8.0), (2, 5.0)]);

    for length in 0..=30i64 {
        let a = engine.optimize(&ascending, length).unwrap();
        let b = engine.optimize(&shuffled, length).unwrap();
        assert_eq!(a, b, "length={}", length);
    }
}

#[test]
fn test_byte_identical_serialized_output() {
    let engine = CuttingEngine::new();
    let prices = price_list(&[(2, 2.5), (3, 3.9), (7, 9.1)]);

    let first = serde_json::to_vec(&engine.optimize(&prices, 23).unwrap()).unwrap();
    let second = serde_json::to_vec(&engine.optimize(&prices, 23).unwrap()).unwrap();
    assert_eq!(first, second);
}

// ==========================================
// 方案不变式
// ==========================================

#[test]
fn test_plan_invariants_over_length_range() {
    let engine = CuttingEngine::new();
    let entries = [(3u32, 4.0), (5u32, 7.5), (8u32, 12.0)];
    let prices = price_list(&entries);

    for length in 0..=100i64 {
        if let Ok(plan) = engine.optimize(&prices, length) {
            // cuts 之和等于长度
            assert_eq!(plan.total_length(), length as u64, "length={}", length);
            // 每个尺寸都来自价格表
            for cut in &plan.cuts {
                assert!(entries.iter().any(|&(size, _)| size == *cut));
            }
        }
    }
}

#[test]
fn test_monotone_profit_with_unit_piece() {
    // 存在尺寸 1 的片段时,长度每加一,最大收益单调不减
    let engine = CuttingEngine::new();
    let prices = price_list(&[(1, 0.5), (4, 6.0), (6, 8.5)]);

    let mut previous = 0.0;
    for length in 1..=80i64 {
        let profit = engine.optimize(&prices, length).unwrap().max_profit;
        assert!(profit >= previous, "length={}", length);
        previous = profit;
    }
}

// ==========================================
// 小数与整数价格
// ==========================================

#[test]
fn test_integral_and_fractional_price_sets() {
    let engine = CuttingEngine::new();

    // 整数价格
    let integral = price_list(&[(2, 3.0), (3, 5.0)]);
    let plan = engine.optimize(&integral, 7).unwrap();
    // 7 = 2+2+3 (3+3+5=11) 或 2+... : 最优 11
    assert_eq!(plan.max_profit, 11.0);
    assert_eq!(plan.total_length(), 7);

    // 小数价格
    let fractional = price_list(&[(2, 2.5), (3, 3.9)]);
    let plan = engine.optimize(&fractional, 6).unwrap();
    assert_eq!(plan.max_profit, 7.8);
    assert_eq!(plan.cuts, vec![3, 3]);
}
