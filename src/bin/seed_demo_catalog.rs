// ==========================================
// 原材料切割收益优化系统 - 演示目录种子数据
// ==========================================
// 用途: 在空库中注册两种演示材料与价格表,
//       并演示一次切割方案计算
// 运行: cargo run --bin seed_demo_catalog
// ==========================================

use material_cutting::app::{get_default_db_path, AppState};
use material_cutting::domain::material::PricePoint;

fn main() -> anyhow::Result<()> {
    material_cutting::logging::init();

    let db_path =
        std::env::var("MATERIAL_CUTTING_DB").unwrap_or_else(|_| get_default_db_path());
    tracing::info!("使用数据库: {}", db_path);

    let state = AppState::new(db_path).map_err(|e| anyhow::anyhow!("{}", e))?;

    // 演示材料一: 全尺寸价格表
    let steel = state
        .material_api
        .register_material("冷轧钢带", Some("1.2mm 冷轧钢带,按米计价".to_string()))?;
    state.price_api.register_price_list(
        &steel.material_id,
        vec![
            PricePoint::new(1, 1.0),
            PricePoint::new(2, 5.0),
            PricePoint::new(3, 8.0),
            PricePoint::new(4, 9.0),
            PricePoint::new(5, 10.0),
        ],
    )?;

    // 演示材料二: 只有单一尺寸,存在不可达长度
    let aluminum = state
        .material_api
        .register_material("铝型材", Some("标准 5m 切段".to_string()))?;
    state
        .price_api
        .register_price_list(&aluminum.material_id, vec![PricePoint::new(5, 10.0)])?;

    // 演示一次方案计算
    let outcome = state.cutting_api.optimize_cuts(&steel.material_id, 4)?;
    tracing::info!(
        material = %outcome.material_name,
        max_profit = outcome.plan.max_profit,
        cuts = ?outcome.plan.cuts,
        "演示切割方案"
    );

    println!("演示目录已写入:");
    println!("  冷轧钢带 material_id = {}", steel.material_id);
    println!("  铝型材   material_id = {}", aluminum.material_id);

    Ok(())
}
