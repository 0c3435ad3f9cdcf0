// ==========================================
// 原材料切割收益优化系统 - 价格表 CSV 导入
// ==========================================
// 支持: CSV (.csv),表头含 size / price 两列
// 流程: 文件读取 → 逐行校验 → 质量报告
// ==========================================

use crate::domain::material::PricePoint;
use crate::importer::error::ImportError;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

// ==========================================
// PriceRowViolation - 行级违规记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRowViolation {
    pub row_number: usize, // 原始文件行号（数据区从 1 起）
    pub field: String,     // 违规字段
    pub message: String,   // 违规描述
}

// ==========================================
// PriceImportReport - 导入质量报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceImportReport {
    pub total_rows: usize,                  // 数据行总数
    pub success_rows: usize,                // 通过校验的行数
    pub failed_rows: usize,                 // 被拒绝的行数
    pub violations: Vec<PriceRowViolation>, // 违规明细
    pub prices: Vec<PricePoint>,            // 去重后的价格表（按尺寸升序）
}

// ==========================================
// PriceListImporter - 价格表导入器
// ==========================================
pub struct PriceListImporter;

impl PriceListImporter {
    /// 解析价格表 CSV 文件
    ///
    /// # 参数
    /// - file_path: CSV 文件路径（表头必须含 size 与 price 列,大小写不敏感）
    ///
    /// # 返回
    /// - Ok(PriceImportReport): 含通过校验的价格表与违规明细
    /// - Err(ImportError): 文件级错误（不存在/格式不符/表头缺列）
    ///
    /// # 说明
    /// - 行级错误（尺寸非正、价格为负等）不中断导入,记入 violations
    /// - 同一尺寸多行出现时后行覆盖前行
    pub fn parse_csv(file_path: &Path) -> Result<PriceImportReport, ImportError> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        if let Some(ext) = file_path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ImportError::CsvParseError(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let size_col = headers
            .iter()
            .position(|h| h == "size")
            .ok_or_else(|| ImportError::MissingColumn("size".to_string()))?;
        let price_col = headers
            .iter()
            .position(|h| h == "price")
            .ok_or_else(|| ImportError::MissingColumn("price".to_string()))?;

        let mut total_rows = 0;
        let mut success_rows = 0;
        let mut violations = Vec::new();
        // 后行覆盖前行,输出天然按尺寸升序
        let mut table: BTreeMap<u32, f64> = BTreeMap::new();

        for (idx, result) in reader.records().enumerate() {
            let row_number = idx + 1;
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    total_rows += 1;
                    violations.push(PriceRowViolation {
                        row_number,
                        field: "-".to_string(),
                        message: format!("行解析失败: {}", e),
                    });
                    continue;
                }
            };

            // 跳过完全空白的行
            if record.iter().all(|v| v.trim().is_empty()) {
                continue;
            }
            total_rows += 1;

            let size_raw = record.get(size_col).unwrap_or("").trim();
            let price_raw = record.get(price_col).unwrap_or("").trim();

            let size = match size_raw.parse::<u32>() {
                Ok(v) if v > 0 => v,
                Ok(_) => {
                    violations.push(PriceRowViolation {
                        row_number,
                        field: "size".to_string(),
                        message: "片段尺寸必须为正整数".to_string(),
                    });
                    continue;
                }
                Err(_) => {
                    violations.push(PriceRowViolation {
                        row_number,
                        field: "size".to_string(),
                        message: format!("无法解析为正整数: {}", size_raw),
                    });
                    continue;
                }
            };

            let price = match price_raw.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => v,
                Ok(_) => {
                    violations.push(PriceRowViolation {
                        row_number,
                        field: "price".to_string(),
                        message: "片段价格必须为非负有限值".to_string(),
                    });
                    continue;
                }
                Err(_) => {
                    violations.push(PriceRowViolation {
                        row_number,
                        field: "price".to_string(),
                        message: format!("无法解析为数值: {}", price_raw),
                    });
                    continue;
                }
            };

            table.insert(size, price);
            success_rows += 1;
        }

        let prices = table
            .into_iter()
            .map(|(size, price)| PricePoint::new(size, price))
            .collect();

        Ok(PriceImportReport {
            total_rows,
            success_rows,
            failed_rows: total_rows - success_rows,
            violations,
            prices,
        })
    }
}
