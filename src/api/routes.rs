//! # 路由配置
//!
//! 按访问级别分为三组：公开、登录用户、管理员。

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::api::handlers::{
    chemicals, import, load, locations, orders, query, suppliers, system, users,
};
use crate::api::middleware::{require_admin, require_user};
use crate::api::server::AppState;

/// 创建所有路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(user_routes(state.clone()))
        .merge(admin_routes(state.clone()))
        .with_state(state)
}

/// 公开路由
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/ping", get(system::ping_handler))
        .route("/addfirstuser", post(users::add_first_user))
}

/// 需要登录的路由
fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/getuser", get(users::get_current_user))
        .route("/addchemical", post(chemicals::add_chemical))
        .route("/getchemicals", get(chemicals::get_chemicals))
        .route("/addsupplier", post(suppliers::add_supplier))
        .route("/getsuppliers", get(suppliers::get_suppliers))
        .route("/addlocation", post(locations::add_location))
        .route("/getlocations", get(locations::get_locations))
        .route("/deletelocation", delete(locations::delete_location))
        .route("/addorder", post(orders::add_order))
        .route("/getorders", get(orders::get_orders))
        .route("/getordersbyquery", get(query::get_orders_by_query))
        .route("/load", get(load::load))
        .route("/patchamountlocation", patch(orders::patch_amount_location))
        .route("/forcereceived", patch(orders::force_received))
        .route_layer(middleware::from_fn_with_state(state, require_user))
}

/// 需要管理员的路由
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/adduser", post(users::add_user))
        .route("/getusers", get(users::get_users))
        .route("/patchuser", patch(users::patch_user))
        .route("/deleteuser", delete(users::delete_user))
        .route("/patchchemical", patch(chemicals::patch_chemical))
        .route("/deletechemical", delete(chemicals::delete_chemical))
        .route("/patchsupplier", patch(suppliers::patch_supplier))
        .route("/deletesupplier", delete(suppliers::delete_supplier))
        .route("/getallorders", get(orders::get_all_orders))
        .route("/patchorder", patch(orders::patch_order))
        .route("/patchorderstatus", patch(orders::patch_order_status))
        .route("/deleteorder", delete(orders::delete_order))
        .route("/csv", post(import::import_csv))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
