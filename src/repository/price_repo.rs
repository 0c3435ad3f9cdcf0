// ==========================================
// 原材料切割收益优化系统 - 价格表仓储
// ==========================================
// 职责: 管理 piece_price 表的 CRUD 操作
// 红线: 不含业务逻辑,只负责数据访问
// 说明: (material_id, size) 为主键,同尺寸重复写入
//       使用 INSERT OR REPLACE 实现后写覆盖先写
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::material::PricePoint;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// PriceCatalog - 价格目录查询接口
// ==========================================
/// 切割计算前的价格表解析接口
///
/// 引擎本身只接受已解析的价格表切片,不触碰存储;
/// 调用方通过该接口取数,测试中可用字面量价格表替代实现。
pub trait PriceCatalog: Send + Sync {
    /// 查询材料的价格表
    ///
    /// # 返回
    /// - Ok(Some(prices)): 价格表存在（按尺寸升序）
    /// - Ok(None): 材料尚未注册价格表
    fn price_list_for(&self, material_id: &str) -> RepositoryResult<Option<Vec<PricePoint>>>;
}

// ==========================================
// PriceListRepository - 价格表仓储
// ==========================================
pub struct PriceListRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PriceListRepository {
    /// 创建新的 PriceListRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 批量写入价格表（INSERT OR REPLACE）
    ///
    /// # 返回
    /// - Ok(usize): 写入的记录数（入参条数,含同尺寸覆盖）
    ///
    /// # 说明
    /// - 同一尺寸多次出现时后写覆盖先写
    /// - 使用事务确保原子性
    pub fn insert_price_list(
        &self,
        material_id: &str,
        prices: &[PricePoint],
    ) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let now = chrono::Utc::now().to_rfc3339();
        let mut count = 0;
        for point in prices {
            tx.execute(
                r#"
                INSERT OR REPLACE INTO piece_price (material_id, size, price, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![material_id, point.size, point.price, now, now],
            )?;
            count += 1;
        }

        tx.commit()?;
        Ok(count)
    }

    /// 查询材料的全部价格条目（按尺寸升序）
    pub fn find_by_material(&self, material_id: &str) -> RepositoryResult<Vec<PricePoint>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT size, price
            FROM piece_price
            WHERE material_id = ?1
            ORDER BY size
            "#,
        )?;

        let prices = stmt
            .query_map(params![material_id], |row| {
                Ok(PricePoint {
                    size: row.get(0)?,
                    price: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<PricePoint>>>()?;

        Ok(prices)
    }

    /// 检查材料是否已注册价格表
    pub fn has_price_list(&self, material_id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM piece_price WHERE material_id = ?1",
            params![material_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// 更新已存在尺寸的价格
    ///
    /// # 返回
    /// - Ok(true): 更新成功
    /// - Ok(false): 该尺寸没有价格条目
    pub fn update_price(&self, material_id: &str, size: u32, price: f64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE piece_price
            SET price = ?3, updated_at = ?4
            WHERE material_id = ?1 AND size = ?2
            "#,
            params![material_id, size, price, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(affected > 0)
    }

    /// 追加价格条目（同尺寸已存在时覆盖）
    pub fn upsert_price_point(
        &self,
        material_id: &str,
        point: &PricePoint,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let now = chrono::Utc::now().to_rfc3339();
        conn.execute(
            r#"
            INSERT OR REPLACE INTO piece_price (material_id, size, price, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![material_id, point.size, point.price, now, now],
        )?;
        Ok(())
    }

    /// 删除材料的全部价格条目
    ///
    /// # 返回
    /// - Ok(usize): 删除的记录数
    pub fn delete_by_material(&self, material_id: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM piece_price WHERE material_id = ?1",
            params![material_id],
        )?;
        Ok(affected)
    }
}

impl PriceCatalog for PriceListRepository {
    fn price_list_for(&self, material_id: &str) -> RepositoryResult<Option<Vec<PricePoint>>> {
        let prices = self.find_by_material(material_id)?;
        if prices.is_empty() {
            Ok(None)
        } else {
            Ok(Some(prices))
        }
    }
}
