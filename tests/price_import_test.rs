// ==========================================
// 价格表 CSV 导入 - 集成测试
// ==========================================
// 覆盖: 正常导入、行级违规、整表覆盖、文件级错误
// ==========================================

mod helpers;

use std::io::Write;

use helpers::create_test_app;
use material_cutting::api::error::ApiError;
use material_cutting::domain::material::PricePoint;
use material_cutting::importer::price_importer::PriceListImporter;
use tempfile::Builder;

/// 写出临时 CSV 文件（保留 .csv 扩展名）
fn write_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ==========================================
// 解析器
// ==========================================

#[test]
fn test_parse_valid_csv() {
    let file = write_csv("size,price\n1,1.0\n2,5.0\n3,8.0\n");

    let report = PriceListImporter::parse_csv(file.path()).unwrap();
    assert_eq!(report.total_rows, 3);
    assert_eq!(report.success_rows, 3);
    assert_eq!(report.failed_rows, 0);
    assert!(report.violations.is_empty());
    assert_eq!(
        report.prices,
        vec![
            PricePoint::new(1, 1.0),
            PricePoint::new(2, 5.0),
            PricePoint::new(3, 8.0),
        ]
    );
}

#[test]
fn test_parse_collects_row_violations() {
    // 第 2 行尺寸为 0,第 4 行价格为负,第 5 行尺寸非数字
    let file = write_csv("size,price\n2,5.0\n0,3.0\n3,8.0\n4,-1.0\nabc,2.0\n");

    let report = PriceListImporter::parse_csv(file.path()).unwrap();
    assert_eq!(report.total_rows, 5);
    assert_eq!(report.success_rows, 2);
    assert_eq!(report.failed_rows, 3);
    assert_eq!(report.violations.len(), 3);
    assert_eq!(
        report.prices,
        vec![PricePoint::new(2, 5.0), PricePoint::new(3, 8.0)]
    );

    // 行号与字段指向正确
    assert_eq!(report.violations[0].row_number, 2);
    assert_eq!(report.violations[0].field, "size");
    assert_eq!(report.violations[1].row_number, 4);
    assert_eq!(report.violations[1].field, "price");
}

#[test]
fn test_parse_duplicate_size_last_write_wins() {
    let file = write_csv("size,price\n2,5.0\n2,7.0\n");

    let report = PriceListImporter::parse_csv(file.path()).unwrap();
    assert_eq!(report.success_rows, 2);
    assert_eq!(report.prices, vec![PricePoint::new(2, 7.0)]);
}

#[test]
fn test_parse_missing_column() {
    let file = write_csv("size,amount\n2,5.0\n");

    let err = PriceListImporter::parse_csv(file.path()).unwrap_err();
    assert!(err.to_string().contains("price"));
}

#[test]
fn test_parse_missing_file() {
    let err =
        PriceListImporter::parse_csv(std::path::Path::new("/no/such/file.csv")).unwrap_err();
    assert!(err.to_string().contains("文件不存在"));
}

// ==========================================
// API 整表导入
// ==========================================

#[test]
fn test_import_replaces_existing_price_list() {
    let (_tmp, state) = create_test_app().unwrap();

    let material = state
        .material_api
        .register_material("冷轧钢带", None)
        .unwrap();
    state
        .price_api
        .register_price_list(&material.material_id, vec![PricePoint::new(9, 1.0)])
        .unwrap();

    let file = write_csv("size,price\n1,1.0\n2,5.0\n");
    let report = state
        .price_api
        .import_price_list_csv(&material.material_id, file.path())
        .unwrap();
    assert_eq!(report.success_rows, 2);

    // 旧条目 (9, 1.0) 被整表覆盖
    let view = state
        .price_api
        .get_price_list(&material.material_id)
        .unwrap();
    assert_eq!(
        view.prices,
        vec![PricePoint::new(1, 1.0), PricePoint::new(2, 5.0)]
    );
}

#[test]
fn test_import_rejects_file_without_valid_rows() {
    let (_tmp, state) = create_test_app().unwrap();

    let material = state.material_api.register_material("废料", None).unwrap();
    let file = write_csv("size,price\n0,1.0\nabc,xyz\n");

    let err = state
        .price_api
        .import_price_list_csv(&material.material_id, file.path())
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn test_import_unknown_material() {
    let (_tmp, state) = create_test_app().unwrap();
    let file = write_csv("size,price\n2,5.0\n");

    let err = state
        .price_api
        .import_price_list_csv("no-such-id", file.path())
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[test]
fn test_imported_prices_feed_optimizer() {
    let (_tmp, state) = create_test_app().unwrap();

    let material = state
        .material_api
        .register_material("演示钢带", None)
        .unwrap();
    let file = write_csv("size,price\n1,1.0\n2,5.0\n3,8.0\n4,9.0\n5,10.0\n");
    state
        .price_api
        .import_price_list_csv(&material.material_id, file.path())
        .unwrap();

    let outcome = state
        .cutting_api
        .optimize_cuts(&material.material_id, 4)
        .unwrap();
    assert_eq!(outcome.plan.max_profit, 10.0);
    assert_eq!(outcome.plan.cuts, vec![2, 2]);
}
