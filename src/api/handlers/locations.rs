//! # 存放位置处理器
//!
//! 位置总是属于当前登录用户。

use std::sync::Arc;

use axum::{Extension, Json, extract::State, response::Response};

use crate::api::{
    response,
    server::AppState,
    services::{IdRequest, LocationsService, locations::CreateLocationRequest},
};
use crate::auth::AuthContext;

pub async fn add_location(
    State(state): State<AppState>,
    Extension(auth): Extension<Arc<AuthContext>>,
    Json(request): Json<CreateLocationRequest>,
) -> Response {
    let service = LocationsService::new(&state.database);
    response::from_result(
        service.create(auth.user_id(), &request).await,
        "位置创建成功",
    )
}

pub async fn get_locations(
    State(state): State<AppState>,
    Extension(auth): Extension<Arc<AuthContext>>,
) -> Response {
    let service = LocationsService::new(&state.database);
    response::from_result(
        service.list_for_user(auth.user_id()).await,
        "获取位置列表成功",
    )
}

pub async fn delete_location(
    State(state): State<AppState>,
    Extension(auth): Extension<Arc<AuthContext>>,
    Json(request): Json<IdRequest>,
) -> Response {
    let service = LocationsService::new(&state.database);
    match service.delete(auth.user_id(), request.id).await {
        Ok(()) => response::success_without_data("位置删除成功"),
        Err(err) => {
            err.log();
            response::app_error(err)
        }
    }
}
