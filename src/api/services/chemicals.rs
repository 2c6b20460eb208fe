//! # 化学品服务
//!
//! CAS 号为自然键。更新接口整体覆盖 CAS、名称与四项物性，
//! 结构字段（SMILES / InChI）只在创建时写入。

use entity::{chemicals, chemicals::Entity as Chemicals};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Context, InventoryError, Result};

use super::require_non_blank;

/// 创建化学品请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateChemicalRequest {
    #[serde(rename = "CAS")]
    pub cas: String,
    #[serde(rename = "chemicalName")]
    pub chemical_name: Option<String>,
    #[serde(rename = "MW")]
    pub mw: Option<String>,
    #[serde(rename = "MP")]
    pub mp: Option<String>,
    #[serde(rename = "BP")]
    pub bp: Option<String>,
    pub density: Option<String>,
    pub smile: Option<String>,
    pub inchi: Option<String>,
}

/// 更新化学品请求，六个字段整体覆盖
#[derive(Debug, Clone, Deserialize)]
pub struct PatchChemicalRequest {
    pub id: i32,
    #[serde(rename = "CAS")]
    pub cas: String,
    #[serde(rename = "chemicalName")]
    pub chemical_name: Option<String>,
    #[serde(rename = "MW")]
    pub mw: Option<String>,
    #[serde(rename = "MP")]
    pub mp: Option<String>,
    #[serde(rename = "BP")]
    pub bp: Option<String>,
    pub density: Option<String>,
}

/// 化学品响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChemicalResponse {
    pub id: i32,
    #[serde(rename = "CAS")]
    pub cas: String,
    #[serde(rename = "chemicalName")]
    pub chemical_name: Option<String>,
    #[serde(rename = "MW")]
    pub mw: Option<String>,
    #[serde(rename = "MP")]
    pub mp: Option<String>,
    #[serde(rename = "BP")]
    pub bp: Option<String>,
    pub density: Option<String>,
    pub smile: Option<String>,
    pub inchi: Option<String>,
}

impl From<chemicals::Model> for ChemicalResponse {
    fn from(chemical: chemicals::Model) -> Self {
        Self {
            id: chemical.id,
            cas: chemical.cas,
            chemical_name: chemical.chemical_name,
            mw: chemical.mw,
            mp: chemical.mp,
            bp: chemical.bp,
            density: chemical.density,
            smile: chemical.smile,
            inchi: chemical.inchi,
        }
    }
}

impl CreateChemicalRequest {
    pub(crate) fn into_active_model(self) -> chemicals::ActiveModel {
        chemicals::ActiveModel {
            cas: Set(self.cas),
            chemical_name: Set(self.chemical_name),
            mw: Set(self.mw),
            mp: Set(self.mp),
            bp: Set(self.bp),
            density: Set(self.density),
            smile: Set(self.smile),
            inchi: Set(self.inchi),
            ..Default::default()
        }
    }
}

/// 按 CAS 查找化学品
pub(crate) async fn find_by_cas<C: ConnectionTrait>(
    db: &C,
    cas: &str,
) -> Result<Option<chemicals::Model>> {
    Chemicals::find()
        .filter(chemicals::Column::Cas.eq(cas))
        .one(db)
        .await
        .context("Failed to look up chemical by CAS")
}

pub struct ChemicalsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ChemicalsService<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// CAS 已存在时返回冲突错误
    pub async fn ensure_unique(&self, cas: &str) -> Result<()> {
        if find_by_cas(self.db, cas).await?.is_some() {
            return Err(InventoryError::conflict("chemical", cas));
        }
        Ok(())
    }

    /// 创建化学品
    pub async fn create(&self, request: CreateChemicalRequest) -> Result<ChemicalResponse> {
        require_non_blank(&request.cas, "CAS")?;
        self.ensure_unique(&request.cas).await?;

        let chemical = request
            .into_active_model()
            .insert(self.db)
            .await
            .context("Failed to create chemical")?;

        info!(chemical_id = chemical.id, cas = %chemical.cas, "chemical created");
        Ok(chemical.into())
    }

    /// 列出全部化学品
    pub async fn list(&self) -> Result<Vec<ChemicalResponse>> {
        let rows = Chemicals::find()
            .order_by_asc(chemicals::Column::Id)
            .all(self.db)
            .await
            .context("Failed to fetch chemicals")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// 覆盖 CAS、名称与物性字段
    pub async fn patch(&self, request: &PatchChemicalRequest) -> Result<ChemicalResponse> {
        require_non_blank(&request.cas, "CAS")?;

        let txn = self.db.begin().await.context("Failed to begin transaction")?;

        let chemical = Chemicals::find_by_id(request.id)
            .one(&txn)
            .await
            .context("Failed to fetch chemical")?
            .ok_or_else(|| InventoryError::not_found("chemical", request.id))?;

        let duplicate = find_by_cas(&txn, &request.cas)
            .await?
            .filter(|other| other.id != chemical.id);
        if duplicate.is_some() {
            return Err(InventoryError::conflict("chemical", request.cas.as_str()));
        }

        let mut active_model: chemicals::ActiveModel = chemical.into();
        active_model.cas = Set(request.cas.clone());
        active_model.chemical_name = Set(request.chemical_name.clone());
        active_model.mw = Set(request.mw.clone());
        active_model.mp = Set(request.mp.clone());
        active_model.bp = Set(request.bp.clone());
        active_model.density = Set(request.density.clone());

        let updated = active_model
            .update(&txn)
            .await
            .context("Failed to update chemical")?;

        txn.commit()
            .await
            .context("Failed to commit chemical update")?;
        Ok(updated.into())
    }

    /// 删除化学品，级联删除引用它的订单
    pub async fn delete(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await.context("Failed to begin transaction")?;

        Chemicals::find_by_id(id)
            .one(&txn)
            .await
            .context("Failed to fetch chemical")?
            .ok_or_else(|| InventoryError::not_found("chemical", id))?;

        Chemicals::delete_by_id(id)
            .exec(&txn)
            .await
            .context("Failed to delete chemical")?;

        txn.commit()
            .await
            .context("Failed to commit chemical deletion")?;
        info!(chemical_id = id, "chemical deleted");
        Ok(())
    }
}
