//! # 服务层
//!
//! 各实体的业务逻辑，供 HTTP handler 与测试直接复用。
//! 服务只持有数据库连接引用，不持有其它状态。

pub mod chemicals;
pub mod import;
pub mod load;
pub mod locations;
pub mod orders;
pub mod query;
pub mod suppliers;
pub mod users;

use serde::Deserialize;

use crate::error::{InventoryError, Result};

pub use chemicals::ChemicalsService;
pub use import::ImportService;
pub use load::LoadService;
pub use locations::LocationsService;
pub use orders::OrdersService;
pub use query::QueryService;
pub use suppliers::SuppliersService;
pub use users::UsersService;

/// 只携带主键的请求体，用于删除接口
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IdRequest {
    pub id: i32,
}

/// 自然键不能为空白
pub(crate) fn require_non_blank(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(InventoryError::validation_field(
            format!("{field} must not be empty"),
            field,
        ));
    }
    Ok(())
}
