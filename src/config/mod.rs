//! # 配置管理模块
//!
//! 处理应用配置加载、验证和管理

mod app_config;
mod database;
mod manager;

pub use app_config::{AppConfig, LoggingConfig, ServerConfig};
pub use database::DatabaseConfig;
pub use manager::ConfigManager;

pub use crate::auth::types::AuthConfig;

use crate::error::{InventoryError, Result};

/// 验证配置有效性
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // 验证服务器配置
    if config.server.port == 0 {
        return Err(InventoryError::config(format!(
            "无效的服务器端口: {}",
            config.server.port
        )));
    }

    if config.server.bind_address.is_empty() {
        return Err(InventoryError::config("监听地址不能为空"));
    }

    // 验证数据库配置
    if config.database.url.is_empty() {
        return Err(InventoryError::config("数据库URL不能为空"));
    }

    if config.database.max_connections == 0 {
        return Err(InventoryError::config("数据库最大连接数必须大于0"));
    }

    // 验证认证配置
    if config.auth.jwt_secret.is_empty() {
        return Err(InventoryError::config("JWT 密钥不能为空"));
    }

    config.auth.algorithm()?;

    if config.auth.jwt_expires_in <= 0 {
        return Err(InventoryError::config("令牌有效期必须大于0"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret() -> AppConfig {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "unit-test-secret".to_string();
        config
    }

    #[test]
    fn test_default_config_with_secret_is_valid() {
        assert!(validate_config(&config_with_secret()).is_ok());
    }

    #[test]
    fn test_missing_secret_rejected() {
        let config = AppConfig::default();
        assert!(matches!(
            validate_config(&config),
            Err(InventoryError::Config { .. })
        ));
    }

    #[test]
    fn test_non_hmac_algorithm_rejected() {
        let mut config = config_with_secret();
        config.auth.jwt_algorithm = "RS256".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_pool_size_rejected() {
        let mut config = config_with_secret();
        config.database.max_connections = 0;
        assert!(validate_config(&config).is_err());
    }
}
