//! # HTTP API
//!
//! - `services`: 业务逻辑
//! - `handlers`: 请求提取与响应封装
//! - `middleware`: 认证
//! - `routes` / `server`: 路由与服务器

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod services;

pub use server::{ApiServer, AppState, build_router};
