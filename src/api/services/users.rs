//! # 用户服务
//!
//! 用户的创建、列表、姓名更新与删除。用户 ID 可以由调用方指定，
//! 以便与外部身份系统保持一致。

use entity::{users, users::Entity as Users};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Context, InventoryError, Result};

use super::require_non_blank;

/// 创建用户请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    /// 为空时由数据库分配
    pub id: Option<i32>,
    pub username: String,
    pub full_name: Option<String>,
}

impl CreateUserRequest {
    /// 调用方指定的 ID 必须为正数
    pub(crate) fn validate_id(&self) -> Result<()> {
        match self.id {
            Some(id) if id <= 0 => Err(InventoryError::validation_field(
                format!("user id must be positive, got {id}"),
                "id",
            )),
            _ => Ok(()),
        }
    }
}

/// 更新用户请求，`full_name` 整体覆盖
#[derive(Debug, Clone, Deserialize)]
pub struct PatchUserRequest {
    pub id: i32,
    pub full_name: Option<String>,
}

/// 用户响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub full_name: Option<String>,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
        }
    }
}

pub struct UsersService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UsersService<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// 用户名已存在时返回冲突错误
    pub async fn ensure_unique(&self, username: &str) -> Result<()> {
        let existing = Users::find()
            .filter(users::Column::Username.eq(username))
            .one(self.db)
            .await
            .context("Failed to check username")?;

        if existing.is_some() {
            return Err(InventoryError::conflict("user", username));
        }
        Ok(())
    }

    /// 创建用户
    pub async fn create(&self, request: &CreateUserRequest) -> Result<UserResponse> {
        require_non_blank(&request.username, "username")?;
        request.validate_id()?;
        self.ensure_unique(&request.username).await?;

        let user = users::ActiveModel {
            id: request.id.map_or(ActiveValue::NotSet, ActiveValue::Set),
            username: Set(request.username.clone()),
            full_name: Set(request.full_name.clone()),
        }
        .insert(self.db)
        .await
        .context("Failed to create user")?;

        info!(user_id = user.id, username = %user.username, "user created");
        Ok(user.into())
    }

    /// 获取单个用户
    pub async fn get(&self, id: i32) -> Result<UserResponse> {
        Users::find_by_id(id)
            .one(self.db)
            .await
            .context("Failed to fetch user")?
            .map(Into::into)
            .ok_or_else(|| InventoryError::not_found("user", id))
    }

    /// 列出全部用户
    pub async fn list(&self) -> Result<Vec<UserResponse>> {
        let rows = Users::find()
            .order_by_asc(users::Column::Id)
            .all(self.db)
            .await
            .context("Failed to fetch users")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// 覆盖用户姓名
    pub async fn patch(&self, request: &PatchUserRequest) -> Result<UserResponse> {
        let txn = self.db.begin().await.context("Failed to begin transaction")?;

        let user = Users::find_by_id(request.id)
            .one(&txn)
            .await
            .context("Failed to fetch user")?
            .ok_or_else(|| InventoryError::not_found("user", request.id))?;

        let mut active_model: users::ActiveModel = user.into();
        active_model.full_name = Set(request.full_name.clone());

        let updated = active_model
            .update(&txn)
            .await
            .context("Failed to update user")?;

        txn.commit().await.context("Failed to commit user update")?;
        Ok(updated.into())
    }

    /// 删除用户，级联删除其订单与存放位置
    pub async fn delete(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await.context("Failed to begin transaction")?;

        Users::find_by_id(id)
            .one(&txn)
            .await
            .context("Failed to fetch user")?
            .ok_or_else(|| InventoryError::not_found("user", id))?;

        Users::delete_by_id(id)
            .exec(&txn)
            .await
            .context("Failed to delete user")?;

        txn.commit().await.context("Failed to commit user deletion")?;
        info!(user_id = id, "user deleted");
        Ok(())
    }
}
