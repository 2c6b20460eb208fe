//! # 订单实体定义
//!
//! 订单记录一次化学品申购：谁申购、申购什么、向谁申购、存放在哪里，
//! 以及申购状态与用量登记。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 订单状态
///
/// 状态列为普通枚举列，数据库层面不约束流转顺序。
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, EnumIter, DeriveActiveEnum, Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    #[sea_orm(string_value = "submitted")]
    Submitted,
    #[sea_orm(string_value = "ordered")]
    Ordered,
    #[sea_orm(string_value = "received")]
    Received,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Ordered => "ordered",
            Self::Received => "received",
        }
    }
}

/// 数量单位
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum AmountUnit {
    #[sea_orm(string_value = "mg")]
    #[serde(rename = "mg")]
    Milligram,
    #[sea_orm(string_value = "mL")]
    #[serde(rename = "mL")]
    Millilitre,
    #[sea_orm(string_value = "g")]
    #[serde(rename = "g")]
    Gram,
    #[sea_orm(string_value = "L")]
    #[serde(rename = "L")]
    Litre,
}

impl AmountUnit {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Milligram => "mg",
            Self::Millilitre => "mL",
            Self::Gram => "g",
            Self::Litre => "L",
        }
    }
}

/// 订单实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub chemical_id: i32,
    pub supplier_id: i32,
    /// 尚未入库时为空
    pub location_id: Option<i32>,
    pub status: OrderStatus,
    pub amount: i32,
    pub amount_unit: AmountUnit,
    pub is_consumed: bool,
    pub order_date: DateTime,
    /// 供应商货号
    pub supplier_pn: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::chemicals::Entity",
        from = "Column::ChemicalId",
        to = "super::chemicals::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Chemical,
    #[sea_orm(
        belongs_to = "super::suppliers::Entity",
        from = "Column::SupplierId",
        to = "super::suppliers::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Supplier,
    #[sea_orm(
        belongs_to = "super::locations::Entity",
        from = "Column::LocationId",
        to = "super::locations::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Location,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::chemicals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chemical.def()
    }
}

impl Related<super::suppliers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
