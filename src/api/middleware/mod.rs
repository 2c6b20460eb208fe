//! # 中间件

pub mod auth;

pub use auth::{require_admin, require_user};
