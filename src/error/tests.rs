//! # 错误处理测试

use crate::error::{Context, ErrorCategory, InventoryError, context_error};
use axum::http::StatusCode;
use sea_orm::{DbErr, RuntimeErr};
use std::error::Error;

#[test]
fn test_config_error_creation() {
    let err = InventoryError::config("测试配置错误");
    assert!(matches!(err, InventoryError::Config { .. }));
    assert_eq!(err.to_string(), "配置错误: 测试配置错误");
}

#[test]
fn test_config_error_with_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "文件不存在");
    let err = InventoryError::config_with_source("配置文件加载失败", io_err);

    assert!(matches!(err, InventoryError::Config { .. }));
    assert!(err.to_string().contains("配置错误: 配置文件加载失败"));
    assert!(err.source().is_some());
}

#[test]
fn test_http_mapping() {
    let cases = [
        (
            InventoryError::authentication("Invalid authentication credentials"),
            StatusCode::UNAUTHORIZED,
            "AUTHENTICATION_ERROR",
        ),
        (
            InventoryError::conflict("user", "jdoe"),
            StatusCode::CONFLICT,
            "RESOURCE_CONFLICT",
        ),
        (
            InventoryError::not_found("chemical", 3),
            StatusCode::NOT_FOUND,
            "RESOURCE_NOT_FOUND",
        ),
        (
            InventoryError::validation("bad input"),
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
        ),
        (
            InventoryError::database("boom"),
            StatusCode::INTERNAL_SERVER_ERROR,
            "DATABASE_ERROR",
        ),
    ];

    for (err, status, code) in cases {
        assert_eq!(err.to_http_response_parts(), (status, code));
    }
}

#[test]
fn test_error_messages_name_the_resource() {
    let err = InventoryError::conflict("chemical", "64-17-5");
    assert_eq!(
        err.to_string(),
        "64-17-5 is already in the database (chemical)"
    );

    let err = InventoryError::not_found("order", 42);
    assert_eq!(err.to_string(), "order not found: 42");

    let err = InventoryError::authentication("Invalid authentication credentials");
    assert_eq!(err.to_string(), "Invalid authentication credentials");
}

#[test]
fn test_context_keeps_inner_status() {
    let result: Result<(), InventoryError> = Err(InventoryError::not_found("supplier", 9));
    let err = result.context("Failed to patch supplier").unwrap_err();

    assert!(matches!(err, InventoryError::Context { .. }));
    assert_eq!(
        err.to_http_response_parts(),
        (StatusCode::NOT_FOUND, "RESOURCE_NOT_FOUND")
    );
    assert!(matches!(err.root(), InventoryError::NotFound { .. }));
    assert!(err.to_string().starts_with("Failed to patch supplier: "));
}

#[test]
fn test_context_error_helper() {
    let err = context_error::<()>(InventoryError::internal("x"), "while loading")
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Server);
}

#[test]
fn test_category() {
    assert_eq!(
        InventoryError::validation("x").category(),
        ErrorCategory::Client
    );
    assert_eq!(
        InventoryError::internal("x").category(),
        ErrorCategory::Server
    );
}

#[test]
fn test_auto_conversion_from_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "文件不存在");
    let err: InventoryError = io_err.into();

    assert!(matches!(err, InventoryError::Io { .. }));
}

#[test]
fn test_auto_conversion_from_json_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: InventoryError = json_err.into();

    assert!(matches!(err, InventoryError::Serialization { .. }));
    assert_eq!(err.to_http_response_parts().0, StatusCode::BAD_REQUEST);
}

#[test]
fn test_generic_db_error_maps_to_database() {
    let err: InventoryError = DbErr::Conn(RuntimeErr::Internal("down".to_string())).into();
    assert!(matches!(err, InventoryError::Database { .. }));
}
