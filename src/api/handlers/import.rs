//! # 批量导入处理器

use axum::{Json, extract::State, response::Response};

use crate::api::{
    response,
    server::AppState,
    services::{ImportService, import::ImportRequest},
};

pub async fn import_csv(
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> Response {
    let service = ImportService::new(&state.database);
    response::from_result(service.import(request).await, "导入完成")
}
