// ==========================================
// 原材料切割收益优化系统 - 材料目录仓储
// ==========================================
// 职责: 管理 material_type 表的 CRUD 操作
// 红线: 不含业务逻辑,只负责数据访问
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::material::MaterialType;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

pub struct MaterialRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MaterialRepository {
    /// 创建新的 MaterialRepository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
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

    fn map_row(row: &Row) -> SqliteResult<MaterialType> {
        Ok(MaterialType {
            material_id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            created_at: row
                .get::<_, String>(3)?
                .parse::<chrono::DateTime<chrono::Utc>>()
                .unwrap_or_else(|_| chrono::Utc::now()),
            updated_at: row
                .get::<_, String>(4)?
                .parse::<chrono::DateTime<chrono::Utc>>()
                .unwrap_or_else(|_| chrono::Utc::now()),
        })
    }

    /// 插入材料主数据
    ///
    /// # 返回
    /// - Ok(()): 插入成功
    /// - Err(UniqueConstraintViolation): 名称或主键已存在
    pub fn insert(&self, material: &MaterialType) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO material_type (material_id, name, description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                material.material_id,
                material.name,
                material.description,
                material.created_at.to_rfc3339(),
                material.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// 按 material_id 查询材料主数据
    ///
    /// # 返回
    /// - Ok(Some(MaterialType)): 找到记录
    /// - Ok(None): 未找到记录
    pub fn find_by_id(&self, material_id: &str) -> RepositoryResult<Option<MaterialType>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT material_id, name, description, created_at, updated_at
            FROM material_type
            WHERE material_id = ?1
            "#,
        )?;

        let result = stmt.query_row(params![material_id], Self::map_row);

        match result {
            Ok(material) => Ok(Some(material)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 按名称查询材料主数据（名称目录内唯一）
    pub fn find_by_name(&self, name: &str) -> RepositoryResult<Option<MaterialType>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT material_id, name, description, created_at, updated_at
            FROM material_type
            WHERE name = ?1
            "#,
        )?;

        let result = stmt.query_row(params![name], Self::map_row);

        match result {
            Ok(material) => Ok(Some(material)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 查询所有材料（按名称排序）
    pub fn list_all(&self) -> RepositoryResult<Vec<MaterialType>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT material_id, name, description, created_at, updated_at
            FROM material_type
            ORDER BY name
            "#,
        )?;

        let materials = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<MaterialType>>>()?;

        Ok(materials)
    }

    /// 删除材料主数据
    ///
    /// 价格表通过外键级联一并删除（PRAGMA foreign_keys=ON 时生效）。
    ///
    /// # 返回
    /// - Ok(true): 删除成功
    /// - Ok(false): 记录不存在
    pub fn delete(&self, material_id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM material_type WHERE material_id = ?1",
            params![material_id],
        )?;
        Ok(affected > 0)
    }
}
