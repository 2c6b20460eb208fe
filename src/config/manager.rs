//! # 配置管理器
//!
//! 统一的配置加载入口：TOML 文件 + 环境变量覆盖 + 校验

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::AppConfig;
use crate::error::{InventoryError, Result};

/// 环境变量到配置路径的映射
const ENV_OVERRIDE_KEYS: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("SECRET_KEY", "auth.jwt_secret"),
    ("ALGORITHM", "auth.jwt_algorithm"),
    ("CHEM_INVENTORY_PORT", "server.port"),
    ("CHEM_INVENTORY_BIND", "server.bind_address"),
];

/// 配置管理器
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// 当前配置
    config: Arc<AppConfig>,
    /// 配置文件路径
    config_path: PathBuf,
}

impl ConfigManager {
    /// 按默认规则定位配置文件并加载
    pub fn new() -> Result<Self> {
        Self::from_file(Self::resolve_config_path(None))
    }

    /// 确定配置文件路径
    ///
    /// 优先级：命令行参数 > `CHEM_INVENTORY_CONFIG_PATH` > `config/config.{RUST_ENV}.toml`
    #[must_use]
    pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        if let Ok(path) = env::var("CHEM_INVENTORY_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        PathBuf::from(format!("config/config.{env}.toml"))
    }

    /// 从指定文件创建配置管理器，使用进程环境变量覆盖
    pub fn from_file(config_path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_with_env(config_path, env::vars())
    }

    /// 从指定文件创建配置管理器，使用给定的环境变量集合覆盖
    pub fn from_file_with_env<I>(config_path: impl AsRef<Path>, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config_path = config_path.as_ref();

        let mut config = Self::load_config_file(config_path)?;

        let env_overrides = Self::build_env_overrides(vars);
        Self::apply_env_overrides(&mut config, &env_overrides)?;

        super::validate_config(&config)?;

        info!(
            config_path = %config_path.display(),
            env_overrides = env_overrides.len(),
            "配置加载完成"
        );

        Ok(Self {
            config: Arc::new(config),
            config_path: config_path.to_path_buf(),
        })
    }

    /// 获取当前配置
    #[must_use]
    pub fn get_config(&self) -> Arc<AppConfig> {
        Arc::clone(&self.config)
    }

    /// 配置文件路径
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// 加载配置文件
    fn load_config_file(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            return Err(InventoryError::config(format!(
                "配置文件不存在: {}",
                path.display()
            )));
        }

        let config_content = std::fs::read_to_string(path).map_err(|e| {
            InventoryError::config_with_source(format!("读取配置文件失败: {}", path.display()), e)
        })?;

        toml::from_str(&config_content).map_err(|e| {
            InventoryError::config_with_source(
                format!("TOML解析失败 - 配置文件: {}, 详细错误: {e}", path.display()),
                e,
            )
        })
    }

    /// 构建环境变量覆盖映射，键为配置路径
    fn build_env_overrides<I>(vars: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        vars.into_iter()
            .filter_map(|(key, value)| {
                ENV_OVERRIDE_KEYS
                    .iter()
                    .find(|(env_key, _)| *env_key == key)
                    .map(|(_, path)| ((*path).to_string(), value))
            })
            .collect()
    }

    /// 应用环境变量覆盖
    fn apply_env_overrides(
        config: &mut AppConfig,
        overrides: &HashMap<String, String>,
    ) -> Result<()> {
        for (path, value) in overrides {
            debug!(
                "应用环境变量覆盖: {} = {}",
                path,
                if path.contains("secret") { "***" } else { value }
            );

            Self::apply_override_to_config(config, path, value)?;
        }
        Ok(())
    }

    /// 将单个覆盖值写入配置对象
    fn apply_override_to_config(config: &mut AppConfig, path: &str, value: &str) -> Result<()> {
        match path {
            "database.url" => config.database.url = value.to_string(),
            "auth.jwt_secret" => config.auth.jwt_secret = value.to_string(),
            "auth.jwt_algorithm" => config.auth.jwt_algorithm = value.to_string(),
            "server.bind_address" => config.server.bind_address = value.to_string(),
            "server.port" => {
                config.server.port = value.parse().map_err(|e| {
                    InventoryError::config_with_source(format!("无效的端口号: {value}"), e)
                })?;
            }
            _ => warn!("未知的配置路径，忽略环境变量覆盖: {}", path),
        }
        Ok(())
    }
}
