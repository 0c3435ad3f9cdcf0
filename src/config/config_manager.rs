// ==========================================
// 原材料切割收益优化系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value)
// ==========================================

use crate::db::open_sqlite_connection;
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};
use tracing::warn;

/// 目标长度上限的配置键
pub const MAX_CUT_LENGTH_KEY: &str = "max_cut_length";

/// 目标长度上限默认值
pub const DEFAULT_MAX_CUT_LENGTH: i64 = 100_000;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }
        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入配置值（存在则覆盖）
    pub fn set_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            r#"
            INSERT INTO config_kv (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// 读取目标长度上限（缺失或非法时回落默认值）
    pub fn get_max_cut_length(&self) -> i64 {
        match self.get_value(MAX_CUT_LENGTH_KEY) {
            Ok(Some(raw)) => match raw.parse::<i64>() {
                Ok(v) if v > 0 => v,
                _ => {
                    warn!(value = %raw, "max_cut_length 配置非法,回落默认值");
                    DEFAULT_MAX_CUT_LENGTH
                }
            },
            Ok(None) => DEFAULT_MAX_CUT_LENGTH,
            Err(e) => {
                warn!(error = %e, "读取 max_cut_length 失败,回落默认值");
                DEFAULT_MAX_CUT_LENGTH
            }
        }
    }

    /// 写入目标长度上限
    pub fn set_max_cut_length(&self, max_length: i64) -> Result<(), Box<dyn Error>> {
        self.set_value(MAX_CUT_LENGTH_KEY, &max_length.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn manager_in_memory() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        db::configure_sqlite_connection(&conn).unwrap();
        db::init_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_default_max_cut_length() {
        let manager = manager_in_memory();
        assert_eq!(manager.get_max_cut_length(), DEFAULT_MAX_CUT_LENGTH);
    }

    #[test]
    fn test_set_and_get_max_cut_length() {
        let manager = manager_in_memory();
        manager.set_max_cut_length(5_000).unwrap();
        assert_eq!(manager.get_max_cut_length(), 5_000);

        // 覆盖写
        manager.set_max_cut_length(8_000).unwrap();
        assert_eq!(manager.get_max_cut_length(), 8_000);
    }

    #[test]
    fn test_invalid_value_falls_back() {
        let manager = manager_in_memory();
        manager.set_value(MAX_CUT_LENGTH_KEY, "not-a-number").unwrap();
        assert_eq!(manager.get_max_cut_length(), DEFAULT_MAX_CUT_LENGTH);
    }
}
