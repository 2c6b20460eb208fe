//! # 化学品实体定义
//!
//! 化学品基础信息表，CAS 号为自然键

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 化学品实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "chemicals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub cas: String,
    pub chemical_name: Option<String>,
    /// 分子量
    pub mw: Option<String>,
    /// 熔点
    pub mp: Option<String>,
    /// 沸点
    pub bp: Option<String>,
    pub density: Option<String>,
    pub smile: Option<String>,
    /// InChI 结构标识，用于结构精确查询
    pub inchi: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
