//! # 化学品处理器

use axum::{Json, extract::State, response::Response};

use crate::api::{
    response,
    server::AppState,
    services::{
        ChemicalsService, IdRequest,
        chemicals::{CreateChemicalRequest, PatchChemicalRequest},
    },
};

pub async fn add_chemical(
    State(state): State<AppState>,
    Json(request): Json<CreateChemicalRequest>,
) -> Response {
    let service = ChemicalsService::new(&state.database);
    response::from_result(service.create(request).await, "化学品创建成功")
}

pub async fn get_chemicals(State(state): State<AppState>) -> Response {
    let service = ChemicalsService::new(&state.database);
    response::from_result(service.list().await, "获取化学品列表成功")
}

pub async fn patch_chemical(
    State(state): State<AppState>,
    Json(request): Json<PatchChemicalRequest>,
) -> Response {
    let service = ChemicalsService::new(&state.database);
    response::from_result(service.patch(&request).await, "化学品更新成功")
}

pub async fn delete_chemical(
    State(state): State<AppState>,
    Json(request): Json<IdRequest>,
) -> Response {
    let service = ChemicalsService::new(&state.database);
    match service.delete(request.id).await {
        Ok(()) => response::success_without_data("化学品删除成功"),
        Err(err) => {
            err.log();
            response::app_error(err)
        }
    }
}
