//! # 用户处理器

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::State,
    response::Response,
};

use crate::api::{
    response,
    server::AppState,
    services::{
        IdRequest, UsersService,
        users::{CreateUserRequest, PatchUserRequest, UserResponse},
    },
};
use crate::auth::AuthContext;

/// 创建第一个用户，无需认证
pub async fn add_first_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Response {
    let service = UsersService::new(&state.database);
    response::from_result(service.create(&request).await, "用户创建成功")
}

pub async fn add_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Response {
    let service = UsersService::new(&state.database);
    response::from_result(service.create(&request).await, "用户创建成功")
}

/// 当前登录用户
pub async fn get_current_user(Extension(auth): Extension<Arc<AuthContext>>) -> Response {
    response::success(UserResponse::from(auth.user.clone()))
}

pub async fn get_users(State(state): State<AppState>) -> Response {
    let service = UsersService::new(&state.database);
    response::from_result(service.list().await, "获取用户列表成功")
}

pub async fn patch_user(
    State(state): State<AppState>,
    Json(request): Json<PatchUserRequest>,
) -> Response {
    let service = UsersService::new(&state.database);
    response::from_result(service.patch(&request).await, "用户更新成功")
}

pub async fn delete_user(
    State(state): State<AppState>,
    Json(request): Json<IdRequest>,
) -> Response {
    let service = UsersService::new(&state.database);
    match service.delete(request.id).await {
        Ok(()) => response::success_without_data("用户删除成功"),
        Err(err) => {
            err.log();
            response::app_error(err)
        }
    }
}
