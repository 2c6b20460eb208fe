//! # 数据库模块
//!
//! 数据库连接和迁移管理

use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::path::Path;
use tracing::{debug, error, info, warn};

use crate::config::DatabaseConfig;

/// 初始化数据库连接
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let database_url = config.url.as_str();
    info!(
        "正在连接数据库: {}",
        database_url.chars().take(50).collect::<String>()
    );

    // 对于SQLite文件数据库，确保数据库文件的目录和文件存在
    if config.is_sqlite() && !config.is_memory_database() {
        ensure_sqlite_file(database_url)?;
    }

    let db = Database::connect(config.connect_options()).await?;

    info!("数据库连接成功");
    Ok(db)
}

/// 创建 SQLite 数据库文件及其父目录
fn ensure_sqlite_file(database_url: &str) -> Result<(), DbErr> {
    let raw_path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    // 去掉查询参数，如 ?mode=rwc
    let db_path = raw_path.split('?').next().unwrap_or(raw_path);
    let db_file_path = Path::new(db_path);

    let parent_dir = db_file_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty() && !dir.exists());
    if let Some(parent_dir) = parent_dir {
        debug!("创建数据库目录: {}", parent_dir.display());
        std::fs::create_dir_all(parent_dir).map_err(|e| {
            DbErr::Custom(format!(
                "无法创建数据库目录 {}: {}",
                parent_dir.display(),
                e
            ))
        })?;
        info!("数据库目录创建成功: {}", parent_dir.display());
    }

    if db_file_path.exists() {
        debug!("数据库文件已存在: {}", db_file_path.display());
    } else {
        std::fs::File::create(db_file_path).map_err(|e| {
            DbErr::Custom(format!(
                "无法创建数据库文件 {}: {}",
                db_file_path.display(),
                e
            ))
        })?;
        info!("数据库文件创建成功: {}", db_file_path.display());
    }

    Ok(())
}

/// 运行数据库迁移
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    info!("开始运行数据库迁移...");

    match ::migration::Migrator::up(db, None).await {
        Ok(()) => {
            info!("数据库迁移完成");
            Ok(())
        }
        Err(e) => {
            error!("数据库迁移失败: {}", e);
            Err(e)
        }
    }
}

/// 检查数据库状态
pub async fn check_database_status(db: &DatabaseConnection) -> Result<(), DbErr> {
    let status = ::migration::Migrator::get_pending_migrations(db).await?;

    if status.is_empty() {
        info!("所有迁移都已应用");
    } else {
        warn!("有 {} 个待应用的迁移", status.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_database_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("inventory.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 1,
            connect_timeout: 5,
        };

        let db = init_database(&config).await.unwrap();
        run_migrations(&db).await.unwrap();
        check_database_status(&db).await.unwrap();

        assert!(db_path.exists());
    }
}
