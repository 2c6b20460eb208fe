//! # Chem Inventory Library
//!
//! 实验室化学品库存管理后端核心库：用户、化学品、供应商、存放位置与订单。

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use api::{ApiServer, AppState};
pub use config::AppConfig;
pub use error::{InventoryError, Result};
