use serde::{Deserialize, Serialize};

/// Pipeline status of a lead; drives board placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    #[serde(rename = "Test Drive")]
    TestDrive,
    Negotiation,
    Won,
    Lost,
}

impl LeadStatus {
    /// Stable code stored in the DB
    pub fn code(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::TestDrive => "test_drive",
            LeadStatus::Negotiation => "negotiation",
            LeadStatus::Won => "won",
            LeadStatus::Lost => "lost",
        }
    }

    /// Human-readable name; also the wire form used by the API
    pub fn display_name(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::TestDrive => "Test Drive",
            LeadStatus::Negotiation => "Negotiation",
            LeadStatus::Won => "Won",
            LeadStatus::Lost => "Lost",
        }
    }

    pub fn all() -> Vec<LeadStatus> {
        vec![
            LeadStatus::New,
            LeadStatus::Contacted,
            LeadStatus::TestDrive,
            LeadStatus::Negotiation,
            LeadStatus::Won,
            LeadStatus::Lost,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }

    /// Parse either the wire name ("Test Drive") or the DB code ("test_drive")
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|v| v.display_name() == s || v.code() == s)
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_wire_and_code() {
        assert_eq!(LeadStatus::parse("Test Drive"), Some(LeadStatus::TestDrive));
        assert_eq!(LeadStatus::parse("test_drive"), Some(LeadStatus::TestDrive));
        assert_eq!(LeadStatus::parse("Won"), Some(LeadStatus::Won));
        assert_eq!(LeadStatus::parse("Archived"), None);
    }

    #[test]
    fn test_wire_form_matches_serde() {
        let json = serde_json::to_string(&LeadStatus::TestDrive).unwrap();
        assert_eq!(json, "\"Test Drive\"");
        let back: LeadStatus = serde_json::from_str("\"New\"").unwrap();
        assert_eq!(back, LeadStatus::New);
    }
}
