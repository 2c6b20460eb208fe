//! # HTTP 服务器
//!
//! 组装路由、CORS 与请求追踪，并负责监听和优雅退出。

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::auth::AuthGuard;
use crate::config::{AppConfig, ServerConfig};
use crate::error::{Context, InventoryError, Result};

/// 应用共享状态
#[derive(Clone)]
pub struct AppState {
    pub database: Arc<DatabaseConnection>,
    pub auth_guard: Arc<AuthGuard>,
}

impl AppState {
    #[must_use]
    pub const fn new(database: Arc<DatabaseConnection>, auth_guard: Arc<AuthGuard>) -> Self {
        Self {
            database,
            auth_guard,
        }
    }

    /// 根据配置构建认证守卫
    pub fn from_config(database: Arc<DatabaseConnection>, config: &AppConfig) -> Result<Self> {
        let auth_guard = AuthGuard::new(Arc::new(config.auth.clone()))?;
        Ok(Self::new(database, Arc::new(auth_guard)))
    }
}

/// 构建完整的应用路由
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let api_routes = super::routes::create_routes(state);

    let prefix = config.api_prefix.trim_matches('/');
    let app = if prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(&format!("/{prefix}"), api_routes)
    };

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins));

    app.layer(service_builder)
}

fn cors_layer(cors_origins: &[String]) -> CorsLayer {
    let cors_layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
        ]);

    if cors_origins.iter().any(|origin| origin == "*") {
        return cors_layer.allow_origin(Any);
    }

    let origins = cors_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<std::result::Result<Vec<_>, _>>();

    match origins {
        Ok(origins) => cors_layer.allow_origin(origins),
        Err(e) => {
            warn!(error = %e, "Invalid CORS origin configuration, falling back to allow any");
            cors_layer.allow_origin(Any)
        }
    }
}

/// API 服务器
pub struct ApiServer {
    config: ServerConfig,
    router: Router,
}

impl ApiServer {
    #[must_use]
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        let router = build_router(state, &config);
        Self { config, router }
    }

    /// 监听地址
    pub fn bind_address(&self) -> Result<SocketAddr> {
        let addr = self.config.listen_addr();
        addr.parse::<SocketAddr>().map_err(|e| {
            InventoryError::config(format!("Invalid bind address '{addr}': {e}"))
        })
    }

    /// 启动服务器，收到 Ctrl-C 后优雅退出
    pub async fn serve(self) -> Result<()> {
        let addr = self.bind_address()?;
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!(%addr, "Starting inventory API server");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("API server error")?;

        info!("API server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
