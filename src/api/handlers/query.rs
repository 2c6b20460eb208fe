//! # 订单查询处理器

use axum::{
    extract::{Query, State},
    response::Response,
};

use crate::api::{
    response,
    server::AppState,
    services::{QueryService, query::OrderQuery},
};

pub async fn get_orders_by_query(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Response {
    let service = QueryService::new(&state.database);
    response::from_result(service.search(&query).await, "查询成功")
}
