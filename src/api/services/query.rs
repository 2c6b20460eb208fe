//! # 订单查询服务
//!
//! 订单联表化学品、用户、供应商后按两种方式匹配：
//! - `string`: 化学品名称、用户全名、CAS 号的大小写无关子串匹配
//! - `structure`: InChI 精确匹配

use entity::{
    chemicals, orders,
    orders::{AmountUnit, OrderStatus},
    orders::Entity as Orders,
    suppliers, users,
};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Context, Result};

/// 查询方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    String,
    Structure,
}

/// 查询参数，来自 URL query
#[derive(Debug, Clone, Deserialize)]
pub struct OrderQuery {
    #[serde(rename = "queryType")]
    pub query_type: QueryType,
    #[serde(rename = "queryString")]
    pub query_string: String,
}

/// 扁平化的查询结果行
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct OrderQueryRow {
    pub id: i32,
    pub amount: i32,
    #[serde(rename = "amountUnit")]
    pub amount_unit: AmountUnit,
    #[serde(rename = "isConsumed")]
    pub is_consumed: bool,
    pub status: OrderStatus,
    #[serde(rename = "supplierPN")]
    pub supplier_pn: Option<String>,
    #[serde(rename = "orderDate")]
    pub order_date: chrono::NaiveDateTime,
    #[serde(rename = "CAS")]
    pub cas: String,
    #[serde(rename = "chemicalName")]
    pub chemical_name: Option<String>,
    pub full_name: Option<String>,
    #[serde(rename = "supplierName")]
    pub supplier_name: String,
}

impl OrderQueryRow {
    /// 化学品名称、用户全名或 CAS 包含 `needle`，`needle` 需已转为小写
    fn matches_text(&self, needle: &str) -> bool {
        [
            self.chemical_name.as_deref(),
            self.full_name.as_deref(),
            Some(self.cas.as_str()),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

pub struct QueryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> QueryService<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn search(&self, query: &OrderQuery) -> Result<Vec<OrderQueryRow>> {
        // SQLite 的 lower()/LIKE 只折叠 ASCII，文本匹配在取出联表结果后按 Unicode 规则进行
        let mut select = Orders::find();
        if query.query_type == QueryType::Structure {
            select = select.filter(chemicals::Column::Inchi.eq(query.query_string.as_str()));
        }

        let mut rows = select
            .select_only()
            .column(orders::Column::Id)
            .column(orders::Column::Amount)
            .column(orders::Column::AmountUnit)
            .column(orders::Column::IsConsumed)
            .column(orders::Column::Status)
            .column(orders::Column::SupplierPn)
            .column(orders::Column::OrderDate)
            .column(chemicals::Column::Cas)
            .column(chemicals::Column::ChemicalName)
            .column(users::Column::FullName)
            .column(suppliers::Column::SupplierName)
            .join(JoinType::InnerJoin, orders::Relation::Chemical.def())
            .join(JoinType::InnerJoin, orders::Relation::User.def())
            .join(JoinType::InnerJoin, orders::Relation::Supplier.def())
            .order_by_asc(orders::Column::Id)
            .into_model::<OrderQueryRow>()
            .all(self.db)
            .await
            .context("Failed to query orders")?;

        if query.query_type == QueryType::String {
            let needle = query.query_string.to_lowercase();
            rows.retain(|row| row.matches_text(&needle));
        }

        debug!(
            query_type = ?query.query_type,
            matches = rows.len(),
            "order query executed"
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cas: &str, chemical_name: Option<&str>, full_name: Option<&str>) -> OrderQueryRow {
        OrderQueryRow {
            id: 1,
            amount: 1,
            amount_unit: AmountUnit::Gram,
            is_consumed: false,
            status: OrderStatus::Submitted,
            supplier_pn: None,
            order_date: chrono::NaiveDateTime::default(),
            cas: cas.to_string(),
            chemical_name: chemical_name.map(str::to_string),
            full_name: full_name.map(str::to_string),
            supplier_name: "Sigma".to_string(),
        }
    }

    #[test]
    fn test_matches_text_folds_unicode_case() {
        let r = row("112-80-1", Some("Ölsäure"), Some("Émile Zola"));
        assert!(r.matches_text("émile"));
        assert!(r.matches_text("ölsäure"));
        assert!(r.matches_text("112-80"));
        assert!(!r.matches_text("%"));
        assert!(!row("64-17-5", None, None).matches_text("ethanol"));
    }

    #[test]
    fn test_query_type_deserialize() {
        let query: OrderQuery =
            serde_json::from_str(r#"{"queryType":"structure","queryString":"InChI=1S/H2O"}"#)
                .unwrap();
        assert_eq!(query.query_type, QueryType::Structure);
        assert!(serde_json::from_str::<QueryType>(r#""fuzzy""#).is_err());
    }
}
