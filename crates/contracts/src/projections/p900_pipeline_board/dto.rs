use crate::domain::a001_lead::aggregate::Lead;
use crate::enums::{FinanceStatus, LeadSource, LeadStatus, Temperature};
use serde::{Deserialize, Serialize};

/// Column definition: an ordered, named group of statuses
///
/// A status may appear in at most one column of a board definition; a lead
/// lands in the first column whose group contains its status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardColumnDef {
    pub key: String,
    pub title: String,
    pub statuses: Vec<LeadStatus>,
}

/// Default kanban layout of the sales page
pub fn default_columns() -> Vec<BoardColumnDef> {
    vec![
        BoardColumnDef {
            key: "new".into(),
            title: "New".into(),
            statuses: vec![LeadStatus::New],
        },
        BoardColumnDef {
            key: "contacted".into(),
            title: "Contacted".into(),
            statuses: vec![LeadStatus::Contacted],
        },
        BoardColumnDef {
            key: "active".into(),
            title: "Active".into(),
            statuses: vec![LeadStatus::TestDrive, LeadStatus::Negotiation],
        },
        BoardColumnDef {
            key: "won".into(),
            title: "Won".into(),
            statuses: vec![LeadStatus::Won],
        },
        BoardColumnDef {
            key: "lost".into(),
            title: "Lost".into(),
            statuses: vec![LeadStatus::Lost],
        },
    ]
}

/// Card shown on the board; a flat read-model cut of the lead
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadCardDto {
    pub id: String,
    pub code: String,
    pub name: String,
    pub phone: String,
    pub source: LeadSource,
    pub status: LeadStatus,
    pub temperature: Temperature,
    pub score: i32,
    #[serde(rename = "financeStatus")]
    pub finance_status: Option<FinanceStatus>,
    #[serde(rename = "vehicleModel")]
    pub vehicle_model: Option<String>,
    #[serde(rename = "lostReason")]
    pub lost_reason: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Lead> for LeadCardDto {
    fn from(lead: &Lead) -> Self {
        Self {
            id: lead.to_string_id(),
            code: lead.base.code.clone(),
            name: lead.name.clone(),
            phone: lead.phone.clone(),
            source: lead.source,
            status: lead.status,
            temperature: lead.temperature,
            score: lead.score,
            finance_status: lead.finance_status,
            vehicle_model: lead.vehicle_interest.as_ref().map(|v| v.model.clone()),
            lost_reason: lead.lost_reason.clone(),
            created_at: lead.base.metadata.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardColumn {
    pub key: String,
    pub title: String,
    pub count: usize,
    pub leads: Vec<LeadCardDto>,
}

/// Full board response: one entry per column def, in definition order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineBoardDto {
    pub columns: Vec<BoardColumn>,
    pub total: usize,
}
