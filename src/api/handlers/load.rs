//! # 首页数据处理器

use std::sync::Arc;

use axum::{Extension, extract::State, response::Response};

use crate::api::{response, server::AppState, services::LoadService};
use crate::auth::AuthContext;

pub async fn load(
    State(state): State<AppState>,
    Extension(auth): Extension<Arc<AuthContext>>,
) -> Response {
    let service = LoadService::new(&state.database);
    response::from_result(service.load(auth.user_id()).await, "加载成功")
}
