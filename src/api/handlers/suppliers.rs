//! # 供应商处理器

use axum::{Json, extract::State, response::Response};

use crate::api::{
    response,
    server::AppState,
    services::{
        IdRequest, SuppliersService,
        suppliers::{CreateSupplierRequest, PatchSupplierRequest},
    },
};

pub async fn add_supplier(
    State(state): State<AppState>,
    Json(request): Json<CreateSupplierRequest>,
) -> Response {
    let service = SuppliersService::new(&state.database);
    response::from_result(service.create(&request).await, "供应商创建成功")
}

pub async fn get_suppliers(State(state): State<AppState>) -> Response {
    let service = SuppliersService::new(&state.database);
    response::from_result(service.list().await, "获取供应商列表成功")
}

pub async fn patch_supplier(
    State(state): State<AppState>,
    Json(request): Json<PatchSupplierRequest>,
) -> Response {
    let service = SuppliersService::new(&state.database);
    response::from_result(service.patch(&request).await, "供应商更新成功")
}

pub async fn delete_supplier(
    State(state): State<AppState>,
    Json(request): Json<IdRequest>,
) -> Response {
    let service = SuppliersService::new(&state.database);
    match service.delete(request.id).await {
        Ok(()) => response::success_without_data("供应商删除成功"),
        Err(err) => {
            err.log();
            response::app_error(err)
        }
    }
}
