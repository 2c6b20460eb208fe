//! # 数据库配置

use sea_orm::ConnectOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 数据库URL
    pub url: String,
    /// 最大连接数
    pub max_connections: u32,
    /// 连接超时时间（秒）
    pub connect_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./data/chem_inventory.db".to_string(),
            max_connections: 10,
            connect_timeout: 30,
        }
    }
}

impl DatabaseConfig {
    /// 检查是否为内存数据库
    #[must_use]
    pub fn is_memory_database(&self) -> bool {
        self.url.contains(":memory:")
    }

    /// 检查是否为SQLite数据库
    #[must_use]
    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:")
    }

    /// 构建连接池参数
    #[must_use]
    pub fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.url.clone());
        options
            .max_connections(self.max_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout))
            .sqlx_logging(false);
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_kind_detection() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..Default::default()
        };
        assert!(config.is_sqlite());
        assert!(config.is_memory_database());

        let config = DatabaseConfig::default();
        assert!(config.is_sqlite());
        assert!(!config.is_memory_database());
    }

    #[test]
    fn test_connect_options_carry_pool_size() {
        let config = DatabaseConfig {
            max_connections: 3,
            ..Default::default()
        };
        let options = config.connect_options();
        assert_eq!(options.get_max_connections(), Some(3));
        assert_eq!(options.get_url(), config.url);
    }
}
