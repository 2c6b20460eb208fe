//! # Entity 模块
//!
//! 包含库存系统的全部 Sea-ORM 实体定义

pub mod chemicals;
pub mod locations;
pub mod orders;
pub mod suppliers;
pub mod users;

pub use chemicals::Entity as Chemicals;
pub use locations::Entity as Locations;
pub use orders::Entity as Orders;
pub use suppliers::Entity as Suppliers;
pub use users::Entity as Users;
