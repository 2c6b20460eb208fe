//! # 订单处理器

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;

use crate::api::{
    response,
    server::AppState,
    services::{
        IdRequest, OrdersService,
        orders::{
            CreateOrderRequest, PatchAmountLocationRequest, PatchOrderRequest,
            PatchOrderStatusRequest,
        },
    },
};
use crate::auth::AuthContext;

/// `forcereceived` 的查询参数，`query` 为订单 ID
#[derive(Debug, Deserialize)]
pub struct ForceReceivedQuery {
    pub query: i32,
}

pub async fn add_order(
    State(state): State<AppState>,
    Extension(auth): Extension<Arc<AuthContext>>,
    Json(request): Json<CreateOrderRequest>,
) -> Response {
    let service = OrdersService::new(&state.database);
    response::from_result(
        service.create(auth.user_id(), &request).await,
        "订单创建成功",
    )
}

pub async fn get_orders(
    State(state): State<AppState>,
    Extension(auth): Extension<Arc<AuthContext>>,
) -> Response {
    let service = OrdersService::new(&state.database);
    response::from_result(service.list_for_user(auth.user_id()).await, "获取订单成功")
}

pub async fn get_all_orders(State(state): State<AppState>) -> Response {
    let service = OrdersService::new(&state.database);
    response::from_result(service.list_all().await, "获取订单成功")
}

pub async fn patch_order(
    State(state): State<AppState>,
    Json(request): Json<PatchOrderRequest>,
) -> Response {
    let service = OrdersService::new(&state.database);
    response::from_result(service.patch_details(&request).await, "订单更新成功")
}

pub async fn patch_order_status(
    State(state): State<AppState>,
    Json(request): Json<PatchOrderStatusRequest>,
) -> Response {
    let service = OrdersService::new(&state.database);
    response::from_result(service.patch_status(request).await, "订单状态更新成功")
}

pub async fn patch_amount_location(
    State(state): State<AppState>,
    Json(request): Json<PatchAmountLocationRequest>,
) -> Response {
    let service = OrdersService::new(&state.database);
    response::from_result(service.patch_amount_location(request).await, "入库登记成功")
}

pub async fn force_received(
    State(state): State<AppState>,
    Query(params): Query<ForceReceivedQuery>,
) -> Response {
    let service = OrdersService::new(&state.database);
    response::from_result(service.force_received(params.query).await, "订单已到货")
}

pub async fn delete_order(
    State(state): State<AppState>,
    Json(request): Json<IdRequest>,
) -> Response {
    let service = OrdersService::new(&state.database);
    match service.delete(request.id).await {
        Ok(()) => response::success_without_data("订单删除成功"),
        Err(err) => {
            err.log();
            response::app_error(err)
        }
    }
}
