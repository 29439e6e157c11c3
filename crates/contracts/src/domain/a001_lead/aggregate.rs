use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::{FinanceStatus, LeadSource, LeadStatus, Temperature};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadId(pub Uuid);

impl LeadId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for LeadId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(LeadId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Value objects
// ============================================================================

/// Vehicle a lead is interested in
///
/// The source system kept this as an ad-hoc JSON string; here it is a proper
/// optional structured field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleInterest {
    pub model: String,
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    #[serde(flatten)]
    pub base: BaseAggregate<LeadId>,

    pub name: String,
    pub phone: String,
    pub email: String,

    /// Immutable after creation
    pub source: LeadSource,
    pub status: LeadStatus,

    /// Editorial tier; may disagree with `score`
    pub temperature: Temperature,
    /// Informational 0-100 score
    #[serde(default)]
    pub score: i32,

    #[serde(rename = "financeStatus")]
    pub finance_status: Option<FinanceStatus>,

    #[serde(rename = "vehicleInterest")]
    pub vehicle_interest: Option<VehicleInterest>,

    /// Present only while the lead sits in `Lost`
    #[serde(rename = "lostReason")]
    pub lost_reason: Option<String>,
}

impl Lead {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        name: String,
        phone: String,
        email: String,
        source: LeadSource,
        temperature: Option<Temperature>,
        score: i32,
        vehicle_interest: Option<VehicleInterest>,
    ) -> Self {
        Self {
            base: BaseAggregate::new(LeadId::new_v4(), code),
            name,
            phone: normalize_phone(&phone),
            email: normalize_email(&email),
            source,
            status: LeadStatus::New,
            temperature: temperature.unwrap_or_else(|| Temperature::from_score(score)),
            score,
            finance_status: None,
            vehicle_interest,
            lost_reason: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    /// Apply the mutable contact/editorial fields of the DTO
    ///
    /// `source` and `status` are deliberately not touched here: the source is
    /// immutable and the status only moves through the transition operation.
    pub fn update(&mut self, dto: &LeadDto) {
        self.name = dto.name.clone();
        self.phone = normalize_phone(&dto.phone);
        self.email = normalize_email(&dto.email);
        if let Some(t) = dto.temperature {
            self.temperature = t;
        }
        if let Some(s) = dto.score {
            self.score = s;
        }
        self.vehicle_interest = dto.vehicle_interest.clone();
    }

    /// Overwrite the status; sets the lost reason when entering `Lost` and
    /// clears it when leaving. No history of prior statuses is kept.
    pub fn set_status(&mut self, status: LeadStatus, lost_reason: Option<String>) {
        self.status = status;
        self.lost_reason = if status == LeadStatus::Lost {
            lost_reason
        } else {
            None
        };
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name cannot be empty".into());
        }
        if self.phone.trim().is_empty() {
            return Err("Phone cannot be empty".into());
        }
        if self.email.trim().is_empty() {
            return Err("Email cannot be empty".into());
        }
        if !self.email.contains('@') {
            return Err("Invalid email format".into());
        }
        if !(0..=100).contains(&self.score) {
            return Err("Score must be between 0 and 100".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for Lead {
    type Id = LeadId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "lead"
    }

    fn element_name() -> &'static str {
        "Lead"
    }

    fn list_name() -> &'static str {
        "Leads"
    }
}

/// Phone comparison key: surrounding whitespace stripped
pub fn normalize_phone(phone: &str) -> String {
    phone.trim().to_string()
}

/// Email comparison key: trimmed, case-insensitive
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LeadDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Wire name of the source ("Walk-in", "Social Media", ...)
    pub source: Option<LeadSource>,
    pub temperature: Option<Temperature>,
    pub score: Option<i32>,
    #[serde(rename = "vehicleInterest")]
    pub vehicle_interest: Option<VehicleInterest>,
}

/// Request body of the status-transition operation
///
/// `status` is a raw string rather than the enum so an unknown value can be
/// rejected by the transition validator instead of the JSON layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLeadStatusRequest {
    pub status: String,
    #[serde(rename = "lostReason")]
    pub lost_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetFinanceStatusRequest {
    #[serde(rename = "financeStatus")]
    pub finance_status: Option<FinanceStatus>,
}

/// Optional list filters; all conjunctive
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LeadListFilter {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub temperature: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lead_defaults() {
        let lead = Lead::new_for_insert(
            "LD-001".into(),
            "Rajesh Kumar".into(),
            " 9876543210 ".into(),
            "Rajesh.Kumar@Email.com".into(),
            LeadSource::WalkIn,
            None,
            55,
            None,
        );
        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.phone, "9876543210");
        assert_eq!(lead.email, "rajesh.kumar@email.com");
        assert_eq!(lead.temperature, Temperature::Warm);
        assert!(lead.lost_reason.is_none());
        assert!(lead.finance_status.is_none());
    }

    #[test]
    fn test_set_status_clears_lost_reason_on_reopen() {
        let mut lead = Lead::new_for_insert(
            "LD-002".into(),
            "A".into(),
            "111".into(),
            "a@x.com".into(),
            LeadSource::Website,
            None,
            10,
            None,
        );
        lead.set_status(LeadStatus::Lost, Some("Price too high".into()));
        assert_eq!(lead.lost_reason.as_deref(), Some("Price too high"));
        lead.set_status(LeadStatus::Contacted, None);
        assert!(lead.lost_reason.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_email_and_score() {
        let mut lead = Lead::new_for_insert(
            "LD-003".into(),
            "B".into(),
            "222".into(),
            "not-an-email".into(),
            LeadSource::Referral,
            None,
            10,
            None,
        );
        assert!(lead.validate().is_err());
        lead.email = "b@x.com".into();
        lead.score = 250;
        assert!(lead.validate().is_err());
        lead.score = 80;
        assert!(lead.validate().is_ok());
    }
}
