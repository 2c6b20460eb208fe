//! # 首页数据加载
//!
//! 一次返回当前用户的位置列表和订单列表，订单内嵌化学品、供应商与位置。

use std::collections::HashMap;

use entity::{
    chemicals::Entity as Chemicals,
    locations,
    locations::Entity as Locations,
    orders,
    orders::Entity as Orders,
    suppliers::Entity as Suppliers,
};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};

use crate::error::{Context, InventoryError, Result};

use super::{
    chemicals::ChemicalResponse,
    locations::LocationSummary,
    orders::OrderResponse,
    suppliers::SupplierResponse,
};

/// 带关联对象的订单
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedOrder {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub chemical: ChemicalResponse,
    pub supplier: SupplierResponse,
    pub location: Option<LocationSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadResponse {
    #[serde(rename = "locationsList")]
    pub locations_list: Vec<LocationSummary>,
    #[serde(rename = "ordersList")]
    pub orders_list: Vec<LoadedOrder>,
}

pub struct LoadService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LoadService<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn load(&self, user_id: i32) -> Result<LoadResponse> {
        let user_locations = Locations::find()
            .filter(locations::Column::UserId.eq(user_id))
            .order_by_asc(locations::Column::Id)
            .all(self.db)
            .await
            .context("Failed to fetch locations")?;

        let user_orders = Orders::find()
            .filter(orders::Column::UserId.eq(user_id))
            .order_by_asc(orders::Column::Id)
            .all(self.db)
            .await
            .context("Failed to fetch orders")?;

        let chemicals = user_orders
            .load_one(Chemicals, self.db)
            .await
            .context("Failed to load order chemicals")?;
        let suppliers = user_orders
            .load_one(Suppliers, self.db)
            .await
            .context("Failed to load order suppliers")?;

        // 订单可能引用其它用户的位置，单独按 ID 取
        let location_ids: Vec<i32> = user_orders.iter().filter_map(|o| o.location_id).collect();
        let order_locations: HashMap<i32, locations::Model> = if location_ids.is_empty() {
            HashMap::new()
        } else {
            Locations::find()
                .filter(locations::Column::Id.is_in(location_ids))
                .all(self.db)
                .await
                .context("Failed to load order locations")?
                .into_iter()
                .map(|location| (location.id, location))
                .collect()
        };

        let mut orders_list = Vec::with_capacity(user_orders.len());
        for ((order, chemical), supplier) in user_orders.into_iter().zip(chemicals).zip(suppliers) {
            let chemical = chemical.ok_or_else(|| {
                InventoryError::internal(format!("order {} has no chemical", order.id))
            })?;
            let supplier = supplier.ok_or_else(|| {
                InventoryError::internal(format!("order {} has no supplier", order.id))
            })?;
            let location = order
                .location_id
                .and_then(|id| order_locations.get(&id))
                .cloned()
                .map(Into::into);

            orders_list.push(LoadedOrder {
                order: order.into(),
                chemical: chemical.into(),
                supplier: supplier.into(),
                location,
            });
        }

        Ok(LoadResponse {
            locations_list: user_locations.into_iter().map(Into::into).collect(),
            orders_list,
        })
    }
}
