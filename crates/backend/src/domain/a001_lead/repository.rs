use chrono::Utc;
use contracts::domain::a001_lead::aggregate::{Lead, LeadId, LeadListFilter, VehicleInterest};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::{FinanceStatus, LeadSource, LeadStatus, Temperature};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_lead")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub source: String,
    pub status: String,
    pub temperature: String,
    pub score: i32,
    pub finance_status: Option<String>,
    pub vehicle_model: Option<String>,
    pub lost_reason: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Lead {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Lead {
            base: BaseAggregate::with_metadata(LeadId::new(uuid), m.code, metadata),
            name: m.name,
            phone: m.phone,
            email: m.email,
            source: LeadSource::from_code(&m.source).unwrap_or_default(),
            status: LeadStatus::from_code(&m.status).unwrap_or_default(),
            temperature: Temperature::from_code(&m.temperature).unwrap_or_default(),
            score: m.score,
            finance_status: m.finance_status.as_deref().and_then(FinanceStatus::from_code),
            vehicle_interest: m.vehicle_model.map(|model| VehicleInterest { model }),
            lost_reason: m.lost_reason,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Lead) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        name: Set(aggregate.name.clone()),
        phone: Set(aggregate.phone.clone()),
        email: Set(aggregate.email.clone()),
        source: Set(aggregate.source.code().to_string()),
        status: Set(aggregate.status.code().to_string()),
        temperature: Set(aggregate.temperature.code().to_string()),
        score: Set(aggregate.score),
        finance_status: Set(aggregate.finance_status.map(|f| f.code().to_string())),
        vehicle_model: Set(aggregate.vehicle_interest.as_ref().map(|v| v.model.clone())),
        lost_reason: Set(aggregate.lost_reason.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all(filter: &LeadListFilter) -> anyhow::Result<Vec<Lead>> {
    let mut query = Entity::find().filter(Column::IsDeleted.eq(false));

    // A filter value that parses to no known enum member matches nothing.
    if let Some(ref status) = filter.status {
        let code = LeadStatus::parse(status).map(|s| s.code()).unwrap_or("");
        query = query.filter(Column::Status.eq(code));
    }
    if let Some(ref source) = filter.source {
        let code = LeadSource::parse(source).map(|s| s.code()).unwrap_or("");
        query = query.filter(Column::Source.eq(code));
    }
    if let Some(ref temperature) = filter.temperature {
        let code = Temperature::from_code(&temperature.to_lowercase())
            .map(|t| t.code())
            .unwrap_or("");
        query = query.filter(Column::Temperature.eq(code));
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

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Lead>> {
    let result = Entity::find()
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Duplicate-detection guard: any non-deleted lead with the same phone or
/// email. Inputs must already be normalized.
pub async fn find_duplicate(phone: &str, email: &str) -> anyhow::Result<Option<Lead>> {
    let result = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(
            Condition::any()
                .add(Column::Phone.eq(phone))
                .add(Column::Email.eq(email)),
        )
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Lead) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Lead) -> anyhow::Result<()> {
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
