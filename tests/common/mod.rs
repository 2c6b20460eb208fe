//! # 测试辅助函数
//!
//! 内存数据库、测试数据 fixtures 与令牌签发

#![allow(dead_code)]

use std::sync::{Arc, Once};

use chem_inventory::{
    AppState,
    auth::{AuthConfig, AuthGuard, SubjectClaims, UserRole},
};
use chrono::Utc;
use entity::{
    chemicals, locations,
    orders::{self, AmountUnit, OrderStatus},
    suppliers, users,
};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;

static INIT: Once = Once::new();

pub const TEST_SECRET: &str = "integration-test-secret";

/// 初始化测试日志
pub fn init_test_env() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// 创建内存数据库并运行迁移
pub async fn create_test_db() -> DatabaseConnection {
    init_test_env();
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("连接内存数据库失败");
    migration::Migrator::up(&db, None)
        .await
        .expect("运行迁移失败");
    db
}

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: TEST_SECRET.to_string(),
        ..AuthConfig::default()
    }
}

pub fn test_state(db: DatabaseConnection) -> AppState {
    let guard = AuthGuard::new(Arc::new(test_auth_config())).expect("创建认证守卫失败");
    AppState::new(Arc::new(db), Arc::new(guard))
}

/// 为指定用户签发令牌
pub fn token_for(state: &AppState, id: i32, role: UserRole) -> String {
    state
        .auth_guard
        .jwt_manager()
        .generate_token(&SubjectClaims { id, role }, None)
        .expect("签发令牌失败")
}

pub async fn insert_user(db: &DatabaseConnection, username: &str, full_name: Option<&str>) -> users::Model {
    users::ActiveModel {
        username: Set(username.to_string()),
        full_name: Set(full_name.map(str::to_string)),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("插入用户失败")
}

/// 化学品测试数据构建器
pub struct ChemicalFixture {
    pub cas: String,
    pub chemical_name: Option<String>,
    pub inchi: Option<String>,
}

impl ChemicalFixture {
    pub fn new(cas: &str) -> Self {
        Self {
            cas: cas.to_string(),
            chemical_name: None,
            inchi: None,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.chemical_name = Some(name.to_string());
        self
    }

    pub fn inchi(mut self, inchi: &str) -> Self {
        self.inchi = Some(inchi.to_string());
        self
    }

    pub async fn insert(self, db: &DatabaseConnection) -> chemicals::Model {
        chemicals::ActiveModel {
            cas: Set(self.cas),
            chemical_name: Set(self.chemical_name),
            inchi: Set(self.inchi),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("插入化学品失败")
    }
}

pub async fn insert_supplier(db: &DatabaseConnection, name: &str) -> suppliers::Model {
    suppliers::ActiveModel {
        supplier_name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("插入供应商失败")
}

pub async fn insert_location(db: &DatabaseConnection, user_id: i32, name: &str) -> locations::Model {
    locations::ActiveModel {
        location_name: Set(name.to_string()),
        user_id: Set(user_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("插入位置失败")
}

pub async fn insert_order(
    db: &DatabaseConnection,
    user_id: i32,
    chemical_id: i32,
    supplier_id: i32,
) -> orders::Model {
    orders::ActiveModel {
        user_id: Set(user_id),
        chemical_id: Set(chemical_id),
        supplier_id: Set(supplier_id),
        location_id: Set(None),
        status: Set(OrderStatus::Submitted),
        amount: Set(100),
        amount_unit: Set(AmountUnit::Millilitre),
        is_consumed: Set(false),
        order_date: Set(Utc::now().naive_utc()),
        supplier_pn: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("插入订单失败")
}
