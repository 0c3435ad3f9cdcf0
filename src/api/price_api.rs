// ==========================================
// 原材料切割收益优化系统 - 价格表 API
// ==========================================
// 职责: 价格表的注册、更新、追加、查询与 CSV 导入
// 红线: 一个材料至多一张价格表;首次注册后只能逐项维护或整表导入
// ==========================================

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::material::PricePoint;
use crate::importer::price_importer::{PriceImportReport, PriceListImporter};
use crate::repository::material_repo::MaterialRepository;
use crate::repository::price_repo::PriceListRepository;

// ==========================================
// MaterialPriceView - 材料 + 价格表组合视图
// ==========================================
/// 用于对外展示的价格表完整信息（材料基础信息 + 价格条目）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialPriceView {
    pub material_id: String,
    pub name: String,
    pub description: Option<String>,
    pub prices: Vec<PricePoint>,
}

// ==========================================
// PriceApi - 价格表 API
// ==========================================
pub struct PriceApi {
    material_repo: Arc<MaterialRepository>,
    price_repo: Arc<PriceListRepository>,
}

impl PriceApi {
    /// 创建新的PriceApi实例
    pub fn new(
        material_repo: Arc<MaterialRepository>,
        price_repo: Arc<PriceListRepository>,
    ) -> Self {
        Self {
            material_repo,
            price_repo,
        }
    }

    /// 校验材料存在,返回 NotFound 错误信息统一格式
    fn ensure_material_exists(&self, material_id: &str) -> ApiResult<()> {
        if material_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("材料ID不能为空".to_string()));
        }
        if self.material_repo.find_by_id(material_id)?.is_none() {
            return Err(ApiError::NotFound(format!(
                "材料(id={})不存在",
                material_id
            )));
        }
        Ok(())
    }

    /// 校验价格条目合法性
    fn validate_price_points(prices: &[PricePoint]) -> ApiResult<()> {
        if prices.is_empty() {
            return Err(ApiError::InvalidInput("价格表不能为空".to_string()));
        }
        for point in prices {
            if point.size == 0 {
                return Err(ApiError::InvalidInput("片段尺寸必须为正整数".to_string()));
            }
            if !point.price.is_finite() || point.price < 0.0 {
                return Err(ApiError::InvalidInput(format!(
                    "片段价格必须为非负有限值: size={}, price={}",
                    point.size, point.price
                )));
            }
        }
        Ok(())
    }

    // ==========================================
    // 写接口
    // ==========================================

    /// 注册材料的价格表（仅允许一次）
    ///
    /// # 参数
    /// - material_id: 材料ID
    /// - prices: 价格条目（同尺寸重复时后写覆盖先写）
    ///
    /// # 返回
    /// - Ok(usize): 写入条数
    /// - Err(NotFound): 材料不存在
    /// - Err(AlreadyExists): 价格表已注册（改用更新/追加接口维护）
    pub fn register_price_list(
        &self,
        material_id: &str,
        prices: Vec<PricePoint>,
    ) -> ApiResult<usize> {
        self.ensure_material_exists(material_id)?;
        Self::validate_price_points(&prices)?;

        if self.price_repo.has_price_list(material_id)? {
            return Err(ApiError::AlreadyExists(format!(
                "材料(id={})的价格表已注册",
                material_id
            )));
        }

        let count = self.price_repo.insert_price_list(material_id, &prices)?;
        info!(material_id = %material_id, count = count, "价格表注册成功");
        Ok(count)
    }

    /// 更新已存在尺寸的价格
    ///
    /// # 返回
    /// - Err(NotFound): 材料不存在,或该尺寸没有价格条目
    pub fn update_price(&self, material_id: &str, size: u32, price: f64) -> ApiResult<()> {
        self.ensure_material_exists(material_id)?;
        Self::validate_price_points(&[PricePoint::new(size, price)])?;

        let updated = self.price_repo.update_price(material_id, size, price)?;
        if !updated {
            return Err(ApiError::NotFound(format!(
                "材料(id={})没有尺寸 {} 的价格条目",
                material_id, size
            )));
        }

        info!(material_id = %material_id, size = size, price = price, "价格更新成功");
        Ok(())
    }

    /// 追加价格条目
    ///
    /// 同尺寸条目已存在时覆盖（确定性的 last-write-wins）。
    ///
    /// # 返回
    /// - Err(NotFound): 材料不存在,或尚未注册价格表
    pub fn add_price_point(&self, material_id: &str, point: PricePoint) -> ApiResult<()> {
        self.ensure_material_exists(material_id)?;
        Self::validate_price_points(&[point])?;

        if !self.price_repo.has_price_list(material_id)? {
            return Err(ApiError::NotFound(format!(
                "材料(id={})尚未注册价格表",
                material_id
            )));
        }

        self.price_repo.upsert_price_point(material_id, &point)?;
        info!(material_id = %material_id, size = point.size, price = point.price, "价格条目追加成功");
        Ok(())
    }

    /// 从 CSV 文件整表导入价格表（覆盖现有价格表）
    ///
    /// # 参数
    /// - material_id: 材料ID
    /// - file_path: CSV 文件路径（表头含 size / price 列）
    ///
    /// # 返回
    /// - Ok(PriceImportReport): 导入质量报告
    /// - Err(NotFound): 材料不存在
    /// - Err(ImportError): 文件级错误
    /// - Err(InvalidInput): 文件中没有任何合法价格行
    pub fn import_price_list_csv(
        &self,
        material_id: &str,
        file_path: &Path,
    ) -> ApiResult<PriceImportReport> {
        self.ensure_material_exists(material_id)?;

        let report = PriceListImporter::parse_csv(file_path)
            .map_err(|e| ApiError::ImportError(e.to_string()))?;

        if report.prices.is_empty() {
            return Err(ApiError::InvalidInput(
                "导入文件中没有合法的价格行".to_string(),
            ));
        }
        if !report.violations.is_empty() {
            warn!(
                material_id = %material_id,
                failed = report.failed_rows,
                "价格表导入存在被拒绝的行"
            );
        }

        // 整表覆盖: 先清空再写入
        self.price_repo.delete_by_material(material_id)?;
        self.price_repo
            .insert_price_list(material_id, &report.prices)?;

        info!(
            material_id = %material_id,
            total = report.total_rows,
            success = report.success_rows,
            "价格表导入完成"
        );
        Ok(report)
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 查询材料的价格表完整视图
    ///
    /// # 返回
    /// - Err(NotFound): 材料不存在,或尚未注册价格表
    pub fn get_price_list(&self, material_id: &str) -> ApiResult<MaterialPriceView> {
        if material_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("材料ID不能为空".to_string()));
        }

        let material = self
            .material_repo
            .find_by_id(material_id)?
            .ok_or_else(|| ApiError::NotFound(format!("材料(id={})不存在", material_id)))?;

        let prices = self.price_repo.find_by_material(material_id)?;
        if prices.is_empty() {
            return Err(ApiError::NotFound(format!(
                "材料(id={})尚未注册价格表",
                material_id
            )));
        }

        Ok(MaterialPriceView {
            material_id: material.material_id,
            name: material.name,
            description: material.description,
            prices,
        })
    }
}
