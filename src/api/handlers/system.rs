//! # 系统处理器

use axum::response::Response;
use serde::Serialize;

use crate::api::response;

#[derive(Serialize)]
struct PingInfo {
    service: &'static str,
    version: &'static str,
}

/// 存活检查
pub async fn ping_handler() -> Response {
    response::success_with_message(
        PingInfo {
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        },
        "pong",
    )
}
