use serde::{Deserialize, Serialize};

/// Origin of a lead; set at creation and immutable afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LeadSource {
    #[default]
    #[serde(rename = "Walk-in")]
    WalkIn,
    Website,
    Referral,
    #[serde(rename = "Social Media")]
    SocialMedia,
    Exhibition,
}

impl LeadSource {
    /// Stable code stored in the DB
    pub fn code(&self) -> &'static str {
        match self {
            LeadSource::WalkIn => "walk_in",
            LeadSource::Website => "website",
            LeadSource::Referral => "referral",
            LeadSource::SocialMedia => "social_media",
            LeadSource::Exhibition => "exhibition",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LeadSource::WalkIn => "Walk-in",
            LeadSource::Website => "Website",
            LeadSource::Referral => "Referral",
            LeadSource::SocialMedia => "Social Media",
            LeadSource::Exhibition => "Exhibition",
        }
    }

    pub fn all() -> Vec<LeadSource> {
        vec![
            LeadSource::WalkIn,
            LeadSource::Website,
            LeadSource::Referral,
            LeadSource::SocialMedia,
            LeadSource::Exhibition,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }

    /// Parse either the wire name or the DB code
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|v| v.display_name() == s || v.code() == s)
    }
}
