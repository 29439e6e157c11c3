use chrono::Utc;
use contracts::domain::a002_quotation::aggregate::{Quotation, QuotationId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_quotation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub lead_id: String,
    pub vehicle_model: String,
    pub ex_showroom_price: f64,
    pub rto_pct: f64,
    pub insurance_pct: f64,
    pub accessories: f64,
    pub discount: f64,
    pub down_payment: f64,
    pub annual_rate_pct: f64,
    pub tenure_months: i32,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Quotation {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Quotation {
            base: BaseAggregate::with_metadata(QuotationId::new(uuid), m.code, metadata),
            lead_id: m.lead_id,
            vehicle_model: m.vehicle_model,
            ex_showroom_price: m.ex_showroom_price,
            rto_pct: m.rto_pct,
            insurance_pct: m.insurance_pct,
            accessories: m.accessories,
            discount: m.discount,
            down_payment: m.down_payment,
            annual_rate_pct: m.annual_rate_pct,
            tenure_months: m.tenure_months,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Quotation) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        lead_id: Set(aggregate.lead_id.clone()),
        vehicle_model: Set(aggregate.vehicle_model.clone()),
        ex_showroom_price: Set(aggregate.ex_showroom_price),
        rto_pct: Set(aggregate.rto_pct),
        insurance_pct: Set(aggregate.insurance_pct),
        accessories: Set(aggregate.accessories),
        discount: Set(aggregate.discount),
        down_payment: Set(aggregate.down_payment),
        annual_rate_pct: Set(aggregate.annual_rate_pct),
        tenure_months: Set(aggregate.tenure_months),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all(lead_id: Option<Uuid>) -> anyhow::Result<Vec<Quotation>> {
    let mut query = Entity::find().filter(Column::IsDeleted.eq(false));
    if let Some(lead_id) = lead_id {
        query = query.filter(Column::LeadId.eq(lead_id.to_string()));
    }
    let items = query
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Quotation>> {
    let result = Entity::find()
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Quotation) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Quotation) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
