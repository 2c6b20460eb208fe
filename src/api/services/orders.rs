//! # 订单服务
//!
//! 订单的创建、列表、字段覆盖、状态设置、入库登记与删除。
//! 状态没有流转约束，任意状态之间都可以直接设置。

use chrono::Utc;
use entity::{
    chemicals::Entity as Chemicals,
    locations::Entity as Locations,
    orders::{self, AmountUnit, OrderStatus},
    orders::Entity as Orders,
    suppliers::Entity as Suppliers,
    users::Entity as Users,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Context, InventoryError, Result};

use super::locations::LocationSummary;

/// 创建订单请求，订单归属于当前用户
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub chemical_id: i32,
    pub supplier_id: i32,
    pub amount: i32,
    #[serde(rename = "amountUnit")]
    pub amount_unit: AmountUnit,
    #[serde(rename = "supplierPN")]
    pub supplier_pn: Option<String>,
}

/// 覆盖订单明细
#[derive(Debug, Clone, Deserialize)]
pub struct PatchOrderRequest {
    pub id: i32,
    pub amount: i32,
    #[serde(rename = "amountUnit")]
    pub amount_unit: AmountUnit,
    #[serde(rename = "isConsumed")]
    pub is_consumed: bool,
    #[serde(rename = "supplierPN")]
    pub supplier_pn: Option<String>,
}

/// 设置订单状态
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PatchOrderStatusRequest {
    pub id: i32,
    pub status: OrderStatus,
}

/// 入库登记：剩余量、存放位置、是否用完
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PatchAmountLocationRequest {
    pub id: i32,
    pub amount: i32,
    pub location_id: Option<i32>,
    #[serde(rename = "isConsumed")]
    pub is_consumed: bool,
}

/// 订单响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: i32,
    pub user_id: i32,
    pub chemical_id: i32,
    pub supplier_id: i32,
    pub location_id: Option<i32>,
    pub status: OrderStatus,
    pub amount: i32,
    #[serde(rename = "amountUnit")]
    pub amount_unit: AmountUnit,
    #[serde(rename = "isConsumed")]
    pub is_consumed: bool,
    #[serde(rename = "orderDate")]
    pub order_date: chrono::NaiveDateTime,
    #[serde(rename = "supplierPN")]
    pub supplier_pn: Option<String>,
}

impl From<orders::Model> for OrderResponse {
    fn from(order: orders::Model) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            chemical_id: order.chemical_id,
            supplier_id: order.supplier_id,
            location_id: order.location_id,
            status: order.status,
            amount: order.amount,
            amount_unit: order.amount_unit,
            is_consumed: order.is_consumed,
            order_date: order.order_date,
            supplier_pn: order.supplier_pn,
        }
    }
}

/// 入库登记响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountLocationResponse {
    pub id: i32,
    pub amount: i32,
    pub location: Option<LocationSummary>,
}

/// 新订单的字段集合，供创建接口与批量导入共用
#[derive(Debug, Clone)]
pub(crate) struct NewOrder {
    pub user_id: i32,
    pub chemical_id: i32,
    pub supplier_id: i32,
    pub status: OrderStatus,
    pub amount: i32,
    pub amount_unit: AmountUnit,
    pub is_consumed: bool,
    pub supplier_pn: Option<String>,
}

impl NewOrder {
    pub(crate) async fn insert<C: ConnectionTrait>(self, db: &C) -> Result<orders::Model> {
        ensure_amount(self.amount)?;
        orders::ActiveModel {
            user_id: Set(self.user_id),
            chemical_id: Set(self.chemical_id),
            supplier_id: Set(self.supplier_id),
            location_id: Set(None),
            status: Set(self.status),
            amount: Set(self.amount),
            amount_unit: Set(self.amount_unit),
            is_consumed: Set(self.is_consumed),
            order_date: Set(Utc::now().naive_utc()),
            supplier_pn: Set(self.supplier_pn),
            ..Default::default()
        }
        .insert(db)
        .await
        .context("Failed to create order")
    }
}

fn ensure_amount(amount: i32) -> Result<()> {
    if amount < 0 {
        return Err(InventoryError::validation_field(
            "amount must not be negative",
            "amount",
        ));
    }
    Ok(())
}

/// 校验订单引用的用户、化学品、供应商存在
pub(crate) async fn ensure_references<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    chemical_id: i32,
    supplier_id: i32,
) -> Result<()> {
    if Users::find_by_id(user_id)
        .one(db)
        .await
        .context("Failed to fetch user")?
        .is_none()
    {
        return Err(InventoryError::validation_field(
            format!("user {user_id} does not exist"),
            "user_id",
        ));
    }
    if Chemicals::find_by_id(chemical_id)
        .one(db)
        .await
        .context("Failed to fetch chemical")?
        .is_none()
    {
        return Err(InventoryError::validation_field(
            format!("chemical {chemical_id} does not exist"),
            "chemical_id",
        ));
    }
    if Suppliers::find_by_id(supplier_id)
        .one(db)
        .await
        .context("Failed to fetch supplier")?
        .is_none()
    {
        return Err(InventoryError::validation_field(
            format!("supplier {supplier_id} does not exist"),
            "supplier_id",
        ));
    }
    Ok(())
}

pub struct OrdersService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrdersService<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// 为当前用户创建订单，状态为 submitted
    pub async fn create(&self, user_id: i32, request: &CreateOrderRequest) -> Result<OrderResponse> {
        ensure_references(self.db, user_id, request.chemical_id, request.supplier_id).await?;

        let order = NewOrder {
            user_id,
            chemical_id: request.chemical_id,
            supplier_id: request.supplier_id,
            status: OrderStatus::Submitted,
            amount: request.amount,
            amount_unit: request.amount_unit,
            is_consumed: false,
            supplier_pn: request.supplier_pn.clone(),
        }
        .insert(self.db)
        .await?;

        info!(order_id = order.id, user_id, "order created");
        Ok(order.into())
    }

    /// 当前用户的订单
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<OrderResponse>> {
        let rows = Orders::find()
            .filter(orders::Column::UserId.eq(user_id))
            .order_by_asc(orders::Column::Id)
            .all(self.db)
            .await
            .context("Failed to fetch orders")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// 全部订单
    pub async fn list_all(&self) -> Result<Vec<OrderResponse>> {
        let rows = Orders::find()
            .order_by_asc(orders::Column::Id)
            .all(self.db)
            .await
            .context("Failed to fetch orders")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// 覆盖数量、单位、是否用完与供应商货号
    pub async fn patch_details(&self, request: &PatchOrderRequest) -> Result<OrderResponse> {
        ensure_amount(request.amount)?;
        let request = request.clone();
        self.update_order(request.id, move |active_model| {
            active_model.amount = Set(request.amount);
            active_model.amount_unit = Set(request.amount_unit);
            active_model.is_consumed = Set(request.is_consumed);
            active_model.supplier_pn = Set(request.supplier_pn);
        })
        .await
        .map(Into::into)
    }

    /// 直接设置状态
    pub async fn patch_status(&self, request: PatchOrderStatusRequest) -> Result<OrderResponse> {
        let order = self
            .update_order(request.id, |active_model| {
                active_model.status = Set(request.status);
            })
            .await?;
        info!(order_id = order.id, status = order.status.as_str(), "order status set");
        Ok(order.into())
    }

    /// 标记为已到货，重复调用结果不变
    pub async fn force_received(&self, id: i32) -> Result<OrderResponse> {
        self.patch_status(PatchOrderStatusRequest {
            id,
            status: OrderStatus::Received,
        })
        .await
    }

    /// 入库登记
    pub async fn patch_amount_location(
        &self,
        request: PatchAmountLocationRequest,
    ) -> Result<AmountLocationResponse> {
        ensure_amount(request.amount)?;

        let txn = self.db.begin().await.context("Failed to begin transaction")?;

        let order = Orders::find_by_id(request.id)
            .one(&txn)
            .await
            .context("Failed to fetch order")?
            .ok_or_else(|| InventoryError::not_found("order", request.id))?;

        let location = match request.location_id {
            Some(location_id) => Some(
                Locations::find_by_id(location_id)
                    .one(&txn)
                    .await
                    .context("Failed to fetch location")?
                    .ok_or_else(|| InventoryError::not_found("location", location_id))?,
            ),
            None => None,
        };

        let mut active_model: orders::ActiveModel = order.into();
        active_model.amount = Set(request.amount);
        active_model.location_id = Set(request.location_id);
        active_model.is_consumed = Set(request.is_consumed);

        let updated = active_model
            .update(&txn)
            .await
            .context("Failed to update order")?;

        txn.commit().await.context("Failed to commit order update")?;

        Ok(AmountLocationResponse {
            id: updated.id,
            amount: updated.amount,
            location: location.map(Into::into),
        })
    }

    /// 删除订单
    pub async fn delete(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await.context("Failed to begin transaction")?;

        Orders::find_by_id(id)
            .one(&txn)
            .await
            .context("Failed to fetch order")?
            .ok_or_else(|| InventoryError::not_found("order", id))?;

        Orders::delete_by_id(id)
            .exec(&txn)
            .await
            .context("Failed to delete order")?;

        txn.commit().await.context("Failed to commit order deletion")?;
        info!(order_id = id, "order deleted");
        Ok(())
    }

    /// 在同一事务内查找并修改订单
    async fn update_order<F>(&self, id: i32, apply: F) -> Result<orders::Model>
    where
        F: FnOnce(&mut orders::ActiveModel),
    {
        let txn = self.db.begin().await.context("Failed to begin transaction")?;

        let order = Orders::find_by_id(id)
            .one(&txn)
            .await
            .context("Failed to fetch order")?
            .ok_or_else(|| InventoryError::not_found("order", id))?;

        let mut active_model: orders::ActiveModel = order.into();
        apply(&mut active_model);

        let updated = active_model
            .update(&txn)
            .await
            .context("Failed to update order")?;

        txn.commit().await.context("Failed to commit order update")?;
        Ok(updated)
    }
}
