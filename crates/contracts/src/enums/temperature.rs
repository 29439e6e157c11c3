use serde::{Deserialize, Serialize};

/// Editorial urgency tier of a lead
///
/// Stored directly on the record and independently settable; it may disagree
/// with the numeric score. `from_score` is only used to prefill the tier when
/// the caller does not supply one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Temperature {
    Hot,
    #[default]
    Warm,
    Cold,
}

impl Temperature {
    pub fn code(&self) -> &'static str {
        match self {
            Temperature::Hot => "hot",
            Temperature::Warm => "warm",
            Temperature::Cold => "cold",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Temperature::Hot => "Hot",
            Temperature::Warm => "Warm",
            Temperature::Cold => "Cold",
        }
    }

    pub fn all() -> Vec<Temperature> {
        vec![Temperature::Hot, Temperature::Warm, Temperature::Cold]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.code() == code)
    }

    /// Suggested tier for a 0-100 score
    pub fn from_score(score: i32) -> Self {
        if score >= 70 {
            Temperature::Hot
        } else if score >= 40 {
            Temperature::Warm
        } else {
            Temperature::Cold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_tier_boundaries() {
        assert_eq!(Temperature::from_score(0), Temperature::Cold);
        assert_eq!(Temperature::from_score(39), Temperature::Cold);
        assert_eq!(Temperature::from_score(40), Temperature::Warm);
        assert_eq!(Temperature::from_score(69), Temperature::Warm);
        assert_eq!(Temperature::from_score(70), Temperature::Hot);
        assert_eq!(Temperature::from_score(100), Temperature::Hot);
    }
}
