//! # Chem Inventory 主程序
//!
//! 实验室化学品库存管理服务

use std::path::PathBuf;
use std::sync::Arc;

use chem_inventory::{
    ApiServer, AppState, Result,
    auth::{SubjectClaims, UserRole, jwt::JwtManager},
    config::{AppConfig, ConfigManager},
    database, logging,
};
use clap::{Parser, Subcommand};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "chem-inventory", version, about = "Laboratory chemical inventory backend")]
struct Cli {
    /// 配置文件路径
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 运行迁移并启动 HTTP 服务（默认）
    Serve,
    /// 只运行数据库迁移
    Migrate,
    /// 为指定用户签发令牌，用于本地调试
    Token {
        #[arg(long)]
        id: i32,
        #[arg(long, default_value_t = UserRole::User)]
        role: UserRole,
        /// 有效期（秒），缺省使用配置值
        #[arg(long)]
        expires_in: Option<i64>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config_path = ConfigManager::resolve_config_path(cli.config.as_deref());
    let config = match ConfigManager::from_file(&config_path) {
        Ok(manager) => manager.get_config(),
        Err(e) => {
            logging::init_logging(None);
            error!(path = %config_path.display(), "配置加载失败: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(Some(&config.logging.level));

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Migrate => migrate(&config).await,
        Command::Token {
            id,
            role,
            expires_in,
        } => issue_token(&config, id, role, expires_in),
    };

    if let Err(e) = result {
        error!("服务异常退出: {e}");
        std::process::exit(1);
    }
}

async fn connect_and_migrate(config: &AppConfig) -> Result<sea_orm::DatabaseConnection> {
    let db = database::init_database(&config.database).await?;
    database::run_migrations(&db).await?;
    database::check_database_status(&db).await?;
    Ok(db)
}

async fn serve(config: Arc<AppConfig>) -> Result<()> {
    let db = connect_and_migrate(&config).await?;
    let state = AppState::from_config(Arc::new(db), &config)?;

    info!("服务启动");
    ApiServer::new(config.server.clone(), state).serve().await?;
    info!("服务正常关闭");
    Ok(())
}

async fn migrate(config: &AppConfig) -> Result<()> {
    connect_and_migrate(config).await?;
    info!("数据库迁移完成");
    Ok(())
}

fn issue_token(
    config: &AppConfig,
    id: i32,
    role: UserRole,
    expires_in: Option<i64>,
) -> Result<()> {
    let manager = JwtManager::new(Arc::new(config.auth.clone()))?;
    let token = manager.generate_token(&SubjectClaims { id, role }, expires_in)?;
    println!("{token}");
    Ok(())
}
