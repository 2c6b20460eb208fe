//! # 供应商服务

use entity::{suppliers, suppliers::Entity as Suppliers};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Context, InventoryError, Result};

use super::require_non_blank;

/// 创建供应商请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSupplierRequest {
    #[serde(rename = "supplierName")]
    pub supplier_name: String,
}

/// 更新供应商请求
#[derive(Debug, Clone, Deserialize)]
pub struct PatchSupplierRequest {
    pub id: i32,
    #[serde(rename = "supplierName")]
    pub supplier_name: String,
}

/// 供应商响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierResponse {
    pub id: i32,
    #[serde(rename = "supplierName")]
    pub supplier_name: String,
}

impl From<suppliers::Model> for SupplierResponse {
    fn from(supplier: suppliers::Model) -> Self {
        Self {
            id: supplier.id,
            supplier_name: supplier.supplier_name,
        }
    }
}

/// 按名称查找供应商，同名时取 ID 最小的一条
pub(crate) async fn find_by_name<C: ConnectionTrait>(
    db: &C,
    supplier_name: &str,
) -> Result<Option<suppliers::Model>> {
    Suppliers::find()
        .filter(suppliers::Column::SupplierName.eq(supplier_name))
        .order_by_asc(suppliers::Column::Id)
        .one(db)
        .await
        .context("Failed to look up supplier by name")
}

pub struct SuppliersService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SuppliersService<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// 名称已存在时返回冲突错误
    pub async fn ensure_unique(&self, supplier_name: &str) -> Result<()> {
        if find_by_name(self.db, supplier_name).await?.is_some() {
            return Err(InventoryError::conflict("supplier", supplier_name));
        }
        Ok(())
    }

    /// 创建供应商
    pub async fn create(&self, request: &CreateSupplierRequest) -> Result<SupplierResponse> {
        require_non_blank(&request.supplier_name, "supplierName")?;
        self.ensure_unique(&request.supplier_name).await?;

        let supplier = suppliers::ActiveModel {
            supplier_name: Set(request.supplier_name.clone()),
            ..Default::default()
        }
        .insert(self.db)
        .await
        .context("Failed to create supplier")?;

        info!(supplier_id = supplier.id, "supplier created");
        Ok(supplier.into())
    }

    /// 列出全部供应商
    pub async fn list(&self) -> Result<Vec<SupplierResponse>> {
        let rows = Suppliers::find()
            .order_by_asc(suppliers::Column::Id)
            .all(self.db)
            .await
            .context("Failed to fetch suppliers")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// 覆盖供应商名称
    pub async fn patch(&self, request: &PatchSupplierRequest) -> Result<SupplierResponse> {
        require_non_blank(&request.supplier_name, "supplierName")?;

        let txn = self.db.begin().await.context("Failed to begin transaction")?;

        let supplier = Suppliers::find_by_id(request.id)
            .one(&txn)
            .await
            .context("Failed to fetch supplier")?
            .ok_or_else(|| InventoryError::not_found("supplier", request.id))?;

        let duplicate = find_by_name(&txn, &request.supplier_name)
            .await?
            .filter(|other| other.id != supplier.id);
        if duplicate.is_some() {
            return Err(InventoryError::conflict(
                "supplier",
                request.supplier_name.as_str(),
            ));
        }

        let mut active_model: suppliers::ActiveModel = supplier.into();
        active_model.supplier_name = Set(request.supplier_name.clone());

        let updated = active_model
            .update(&txn)
            .await
            .context("Failed to update supplier")?;

        txn.commit()
            .await
            .context("Failed to commit supplier update")?;
        Ok(updated.into())
    }

    /// 删除供应商，级联删除引用它的订单
    pub async fn delete(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await.context("Failed to begin transaction")?;

        Suppliers::find_by_id(id)
            .one(&txn)
            .await
            .context("Failed to fetch supplier")?
            .ok_or_else(|| InventoryError::not_found("supplier", id))?;

        Suppliers::delete_by_id(id)
            .exec(&txn)
            .await
            .context("Failed to delete supplier")?;

        txn.commit()
            .await
            .context("Failed to commit supplier deletion")?;
        info!(supplier_id = id, "supplier deleted");
        Ok(())
    }
}
