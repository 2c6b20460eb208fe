//! # 存放位置服务
//!
//! 位置归属于创建它的用户，查询与删除都限定在当前用户范围内。

use entity::{locations, locations::Entity as Locations};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Context, InventoryError, Result};

use super::require_non_blank;

/// 创建位置请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLocationRequest {
    #[serde(rename = "locationName")]
    pub location_name: String,
}

/// 位置响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationResponse {
    pub id: i32,
    #[serde(rename = "locationName")]
    pub location_name: String,
    pub user_id: i32,
}

impl From<locations::Model> for LocationResponse {
    fn from(location: locations::Model) -> Self {
        Self {
            id: location.id,
            location_name: location.location_name,
            user_id: location.user_id,
        }
    }
}

/// 嵌套在订单中的位置摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSummary {
    pub id: i32,
    #[serde(rename = "locationName")]
    pub location_name: String,
}

impl From<locations::Model> for LocationSummary {
    fn from(location: locations::Model) -> Self {
        Self {
            id: location.id,
            location_name: location.location_name,
        }
    }
}

pub struct LocationsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LocationsService<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// 同一用户下名称已存在时返回冲突错误
    pub async fn ensure_unique(&self, user_id: i32, location_name: &str) -> Result<()> {
        let existing = Locations::find()
            .filter(locations::Column::LocationName.eq(location_name))
            .filter(locations::Column::UserId.eq(user_id))
            .one(self.db)
            .await
            .context("Failed to check location name")?;

        if existing.is_some() {
            return Err(InventoryError::conflict("location", location_name));
        }
        Ok(())
    }

    /// 为当前用户创建位置
    pub async fn create(
        &self,
        user_id: i32,
        request: &CreateLocationRequest,
    ) -> Result<LocationResponse> {
        require_non_blank(&request.location_name, "locationName")?;
        self.ensure_unique(user_id, &request.location_name).await?;

        let location = locations::ActiveModel {
            location_name: Set(request.location_name.clone()),
            user_id: Set(user_id),
            ..Default::default()
        }
        .insert(self.db)
        .await
        .context("Failed to create location")?;

        info!(location_id = location.id, user_id, "location created");
        Ok(location.into())
    }

    /// 列出当前用户的位置
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<LocationResponse>> {
        let rows = Locations::find()
            .filter(locations::Column::UserId.eq(user_id))
            .order_by_asc(locations::Column::Id)
            .all(self.db)
            .await
            .context("Failed to fetch locations")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// 删除当前用户的位置，引用它的订单 `location_id` 置空
    pub async fn delete(&self, user_id: i32, id: i32) -> Result<()> {
        let txn = self.db.begin().await.context("Failed to begin transaction")?;

        Locations::find_by_id(id)
            .filter(locations::Column::UserId.eq(user_id))
            .one(&txn)
            .await
            .context("Failed to fetch location")?
            .ok_or_else(|| InventoryError::not_found("location", id))?;

        Locations::delete_by_id(id)
            .exec(&txn)
            .await
            .context("Failed to delete location")?;

        txn.commit()
            .await
            .context("Failed to commit location deletion")?;
        info!(location_id = id, user_id, "location deleted");
        Ok(())
    }
}
