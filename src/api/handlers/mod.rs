//! # HTTP 处理器
//!
//! 处理器只负责提取请求参数并调用服务层，响应统一走 `response` 模块。

pub mod chemicals;
pub mod import;
pub mod load;
pub mod locations;
pub mod orders;
pub mod query;
pub mod suppliers;
pub mod system;
pub mod users;
