use serde::{Deserialize, Serialize};

/// Finance flag of a lead, independent of its pipeline status
///
/// The only observed value is `Pre-Approved`; absence of the flag is modelled
/// as `Option::None` on the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinanceStatus {
    #[serde(rename = "Pre-Approved")]
    PreApproved,
}

impl FinanceStatus {
    pub fn code(&self) -> &'static str {
        match self {
            FinanceStatus::PreApproved => "pre_approved",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FinanceStatus::PreApproved => "Pre-Approved",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pre_approved" => Some(FinanceStatus::PreApproved),
            _ => None,
        }
    }
}
