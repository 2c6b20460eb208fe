//! # 批量导入服务
//!
//! 按用户、化学品、供应商、订单的顺序导入。订单可以用主键或自然键
//! （CAS / 供应商名称）引用化学品与供应商，用户只能用主键引用。
//!
//! 导入不包在单个事务中：每条插入独立提交，出错时之前的插入保留。

use std::collections::HashMap;

use entity::{
    orders::{AmountUnit, OrderStatus},
    users,
    users::Entity as Users,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Context, InventoryError, Result};

use super::{
    chemicals::{CreateChemicalRequest, find_by_cas},
    orders::{NewOrder, ensure_references},
    require_non_blank,
    suppliers::{CreateSupplierRequest, find_by_name},
    users::CreateUserRequest,
};

/// 订单中对化学品或供应商的引用
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Id(i32),
    Key(String),
}

/// 导入的订单行
#[derive(Debug, Clone, Deserialize)]
pub struct ImportOrder {
    pub user: i32,
    pub chemical: EntityRef,
    pub supplier: EntityRef,
    #[serde(default)]
    pub status: OrderStatus,
    pub amount: i32,
    #[serde(rename = "amountUnit")]
    pub amount_unit: AmountUnit,
    #[serde(rename = "supplierPN", default)]
    pub supplier_pn: Option<String>,
    #[serde(rename = "isConsumed", default)]
    pub is_consumed: bool,
}

/// 导入请求
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImportRequest {
    #[serde(rename = "userDataList")]
    pub user_data_list: Vec<CreateUserRequest>,
    #[serde(rename = "chemicalList")]
    pub chemical_list: Vec<CreateChemicalRequest>,
    #[serde(rename = "supplierList")]
    pub supplier_list: Vec<CreateSupplierRequest>,
    #[serde(rename = "orderList")]
    pub order_list: Vec<ImportOrder>,
}

/// 各实体新建的行数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    #[serde(rename = "usersCreated")]
    pub users_created: usize,
    #[serde(rename = "chemicalsCreated")]
    pub chemicals_created: usize,
    #[serde(rename = "suppliersCreated")]
    pub suppliers_created: usize,
    #[serde(rename = "ordersCreated")]
    pub orders_created: usize,
}

pub struct ImportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ImportService<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn import(&self, request: ImportRequest) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();

        for user in &request.user_data_list {
            if self.import_user(user).await? {
                summary.users_created += 1;
            }
        }

        let mut chemical_ids: HashMap<String, i32> = HashMap::new();
        for chemical in request.chemical_list {
            require_non_blank(&chemical.cas, "CAS")?;
            let cas = chemical.cas.clone();
            let id = match find_by_cas(self.db, &cas).await? {
                Some(existing) => existing.id,
                None => {
                    let created = chemical
                        .into_active_model()
                        .insert(self.db)
                        .await
                        .context("Failed to import chemical")?;
                    summary.chemicals_created += 1;
                    created.id
                }
            };
            chemical_ids.insert(cas, id);
        }

        let mut supplier_ids: HashMap<String, i32> = HashMap::new();
        for supplier in &request.supplier_list {
            require_non_blank(&supplier.supplier_name, "supplierName")?;
            let id = match find_by_name(self.db, &supplier.supplier_name).await? {
                Some(existing) => existing.id,
                None => {
                    let created = entity::suppliers::ActiveModel {
                        supplier_name: Set(supplier.supplier_name.clone()),
                        ..Default::default()
                    }
                    .insert(self.db)
                    .await
                    .context("Failed to import supplier")?;
                    summary.suppliers_created += 1;
                    created.id
                }
            };
            supplier_ids.insert(supplier.supplier_name.clone(), id);
        }

        for order in request.order_list {
            let chemical_id = self.resolve_chemical(&order.chemical, &chemical_ids).await?;
            let supplier_id = self.resolve_supplier(&order.supplier, &supplier_ids).await?;
            ensure_references(self.db, order.user, chemical_id, supplier_id).await?;

            NewOrder {
                user_id: order.user,
                chemical_id,
                supplier_id,
                status: order.status,
                amount: order.amount,
                amount_unit: order.amount_unit,
                is_consumed: order.is_consumed,
                supplier_pn: order.supplier_pn,
            }
            .insert(self.db)
            .await?;
            summary.orders_created += 1;
        }

        info!(
            users = summary.users_created,
            chemicals = summary.chemicals_created,
            suppliers = summary.suppliers_created,
            orders = summary.orders_created,
            "bulk import finished"
        );
        Ok(summary)
    }

    /// 用户名不存在时插入，返回是否新建
    async fn import_user(&self, user: &CreateUserRequest) -> Result<bool> {
        require_non_blank(&user.username, "username")?;
        user.validate_id()?;

        let existing = Users::find()
            .filter(users::Column::Username.eq(user.username.as_str()))
            .one(self.db)
            .await
            .context("Failed to check username")?;
        if existing.is_some() {
            debug!(username = %user.username, "import skipped existing user");
            return Ok(false);
        }

        users::ActiveModel {
            id: user.id.map_or(ActiveValue::NotSet, ActiveValue::Set),
            username: Set(user.username.clone()),
            full_name: Set(user.full_name.clone()),
        }
        .insert(self.db)
        .await
        .context("Failed to import user")?;
        Ok(true)
    }

    async fn resolve_chemical(
        &self,
        reference: &EntityRef,
        imported: &HashMap<String, i32>,
    ) -> Result<i32> {
        match reference {
            EntityRef::Id(id) => Ok(*id),
            EntityRef::Key(cas) => {
                if let Some(id) = imported.get(cas) {
                    return Ok(*id);
                }
                find_by_cas(self.db, cas)
                    .await?
                    .map(|chemical| chemical.id)
                    .ok_or_else(|| {
                        InventoryError::validation_field(
                            format!("unknown chemical CAS: {cas}"),
                            "chemical",
                        )
                    })
            }
        }
    }

    async fn resolve_supplier(
        &self,
        reference: &EntityRef,
        imported: &HashMap<String, i32>,
    ) -> Result<i32> {
        match reference {
            EntityRef::Id(id) => Ok(*id),
            EntityRef::Key(name) => {
                if let Some(id) = imported.get(name) {
                    return Ok(*id);
                }
                find_by_name(self.db, name)
                    .await?
                    .map(|supplier| supplier.id)
                    .ok_or_else(|| {
                        InventoryError::validation_field(
                            format!("unknown supplier: {name}"),
                            "supplier",
                        )
                    })
            }
        }
    }
}
