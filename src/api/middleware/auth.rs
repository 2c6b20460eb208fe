//! # 认证中间件
//!
//! 从请求头中提取JWT，通过认证守卫校验后将上下文注入到请求扩展中。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::api::{response, server::AppState};
use crate::auth::AuthUtils;

/// 要求任意已登录用户
pub async fn require_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = AuthUtils::bearer_token_from_headers(request.headers());

    match state
        .auth_guard
        .validate_current_user(&state.database, token.as_deref())
        .await
    {
        Ok(context) => {
            request.extensions_mut().insert(Arc::new(context));
            next.run(request).await
        }
        Err(err) => response::app_error(err),
    }
}

/// 要求管理员
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = AuthUtils::bearer_token_from_headers(request.headers());

    match state
        .auth_guard
        .validate_current_admin(&state.database, token.as_deref())
        .await
    {
        Ok(context) => {
            request.extensions_mut().insert(Arc::new(context));
            next.run(request).await
        }
        Err(err) => response::app_error(err),
    }
}
