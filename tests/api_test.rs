//! # HTTP 路由测试
//!
//! 直接驱动 axum Router，验证认证门槛、响应信封与状态码

mod common;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chem_inventory::{
    AppState,
    api::build_router,
    auth::UserRole,
    config::ServerConfig,
};
use common::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    state: AppState,
    router: Router,
}

impl TestApp {
    fn new(db: sea_orm::DatabaseConnection) -> Self {
        Self::with_config(db, &ServerConfig::default())
    }

    fn with_config(db: sea_orm::DatabaseConnection, config: &ServerConfig) -> Self {
        let state = test_state(db);
        let router = build_router(state.clone(), config);
        Self { state, router }
    }

    fn token(&self, id: i32, role: UserRole) -> String {
        token_for(&self.state, id, role)
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, axum::http::HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, headers, json)
    }
}

#[tokio::test]
async fn test_ping_is_public() {
    let app = TestApp::new(create_test_db().await);
    let (status, _, body) = app.send(Method::GET, "/ping", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "pong");
}

#[tokio::test]
async fn test_missing_token_rejected_with_challenge() {
    let app = TestApp::new(create_test_db().await);
    let (status, headers, body) = app.send(Method::GET, "/getchemicals", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(headers.get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "AUTHENTICATION_ERROR");
    assert_eq!(body["error"]["message"], "Invalid authentication credentials");
}

#[tokio::test]
async fn test_token_for_unknown_user_rejected() {
    let app = TestApp::new(create_test_db().await);
    let token = app.token(404, UserRole::Admin);
    let (status, _, _) = app.send(Method::GET, "/getuser", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_gate() {
    let db = create_test_db().await;
    let user = insert_user(&db, "jdoe", Some("Jane Doe")).await;
    let app = TestApp::new(db);

    let user_token = app.token(user.id, UserRole::User);
    let admin_token = app.token(user.id, UserRole::Admin);

    let (status, _, body) = app.send(Method::GET, "/getuser", Some(&user_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "jdoe");

    let (status, _, _) = app.send(Method::GET, "/getusers", Some(&user_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, body) = app.send(Method::GET, "/getusers", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_first_user_then_conflict() {
    let app = TestApp::new(create_test_db().await);
    let payload = json!({"username": "founder", "full_name": "First Admin"});

    let (status, _, body) = app
        .send(Method::POST, "/addfirstuser", None, Some(payload.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["id"].as_i64().unwrap() > 0);

    let (status, _, body) = app
        .send(Method::POST, "/addfirstuser", None, Some(payload))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "RESOURCE_CONFLICT");
}

#[tokio::test]
async fn test_chemical_flow_and_not_found() {
    let db = create_test_db().await;
    let user = insert_user(&db, "jdoe", None).await;
    let app = TestApp::new(db);
    let user_token = app.token(user.id, UserRole::User);
    let admin_token = app.token(user.id, UserRole::Admin);

    let (status, _, body) = app
        .send(
            Method::POST,
            "/addchemical",
            Some(&user_token),
            Some(json!({"CAS": "64-17-5", "chemicalName": "Ethanol", "MW": "46.07"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["MW"], "46.07");

    let (status, _, _) = app
        .send(
            Method::PATCH,
            "/patchchemical",
            Some(&user_token),
            Some(json!({"id": id, "CAS": "64-17-5"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, body) = app
        .send(
            Method::PATCH,
            "/patchchemical",
            Some(&admin_token),
            Some(json!({"id": id + 1, "CAS": "64-17-5"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");

    let (status, _, body) = app
        .send(
            Method::PATCH,
            "/patchchemical",
            Some(&admin_token),
            Some(json!({"id": id, "CAS": "64-17-5"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["chemicalName"], Value::Null);
    assert_eq!(body["data"]["MW"], Value::Null);
}

#[tokio::test]
async fn test_force_received_is_idempotent() {
    let db = create_test_db().await;
    let user = insert_user(&db, "jdoe", None).await;
    let chemical = ChemicalFixture::new("64-17-5").insert(&db).await;
    let supplier = insert_supplier(&db, "Sigma").await;
    let order = insert_order(&db, user.id, chemical.id, supplier.id).await;
    let app = TestApp::new(db);
    let token = app.token(user.id, UserRole::User);

    let uri = format!("/forcereceived?query={}", order.id);
    for _ in 0..2 {
        let (status, _, body) = app.send(Method::PATCH, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "received");
    }
}

#[tokio::test]
async fn test_order_flow_with_query_and_load() {
    let db = create_test_db().await;
    let user = insert_user(&db, "jdoe", Some("Jane Doe")).await;
    let chemical = ChemicalFixture::new("67-64-1").name("Acetone").insert(&db).await;
    let supplier = insert_supplier(&db, "Sigma").await;
    let app = TestApp::new(db);
    let token = app.token(user.id, UserRole::User);

    let (status, _, body) = app
        .send(
            Method::POST,
            "/addorder",
            Some(&token),
            Some(json!({
                "chemical_id": chemical.id,
                "supplier_id": supplier.id,
                "amount": 500,
                "amountUnit": "mL",
                "supplierPN": "A-100"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "submitted");
    assert_eq!(body["data"]["isConsumed"], false);
    let order_id = body["data"]["id"].as_i64().unwrap();

    let (status, _, body) = app
        .send(
            Method::POST,
            "/addlocation",
            Some(&token),
            Some(json!({"locationName": "Shelf 2"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let location_id = body["data"]["id"].as_i64().unwrap();

    let (status, _, body) = app
        .send(
            Method::PATCH,
            "/patchamountlocation",
            Some(&token),
            Some(json!({"id": order_id, "amount": 250, "location_id": location_id, "isConsumed": false})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"id": order_id, "amount": 250, "location": {"id": location_id, "locationName": "Shelf 2"}})
    );

    let (status, _, body) = app
        .send(
            Method::GET,
            "/getordersbyquery?queryType=string&queryString=acet",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["CAS"], "67-64-1");
    assert_eq!(body["data"][0]["full_name"], "Jane Doe");
    assert_eq!(body["data"][0]["supplierName"], "Sigma");

    let (status, _, body) = app.send(Method::GET, "/load", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ordersList"][0]["location"]["locationName"], "Shelf 2");
    assert_eq!(body["data"]["locationsList"][0]["id"], location_id);
}

#[tokio::test]
async fn test_invalid_body_rejected_before_service() {
    let db = create_test_db().await;
    let user = insert_user(&db, "jdoe", None).await;
    let app = TestApp::new(db);
    let token = app.token(user.id, UserRole::Admin);

    let (status, _, _) = app
        .send(
            Method::PATCH,
            "/patchorderstatus",
            Some(&token),
            Some(json!({"id": 1, "status": "shipped"})),
        )
        .await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_api_prefix_nests_routes() {
    let config = ServerConfig {
        api_prefix: "/api/".to_string(),
        ..ServerConfig::default()
    };
    let app = TestApp::with_config(create_test_db().await, &config);

    let (status, _, _) = app.send(Method::GET, "/api/ping", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, _) = app.send(Method::GET, "/ping", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
