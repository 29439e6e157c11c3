use contracts::enums::LeadStatus;

use crate::shared::error::DomainError;

/// Decide whether a requested status change is permitted
///
/// Any status is reachable from any other (and from creation); the board
/// imposes no forward-only ordering. The one rule with side data: entering
/// `Lost` requires a non-empty reason. Callers get a validation error back
/// and are expected to prompt for a reason and retry.
pub fn validate_transition(
    _current: Option<LeadStatus>,
    requested: &str,
    lost_reason: Option<&str>,
) -> Result<LeadStatus, DomainError> {
    let target = LeadStatus::parse(requested)
        .ok_or_else(|| DomainError::InvalidStatus(requested.to_string()))?;

    if target == LeadStatus::Lost {
        let has_reason = lost_reason.map(|r| !r.trim().is_empty()).unwrap_or(false);
        if !has_reason {
            return Err(DomainError::validation(
                "A lost reason is required when marking a lead as Lost",
            ));
        }
    }

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_any_is_allowed() {
        for from in LeadStatus::all() {
            for to in LeadStatus::all().into_iter().filter(|s| *s != LeadStatus::Lost) {
                let result = validate_transition(Some(from), to.display_name(), None);
                assert_eq!(result.unwrap(), to);
            }
        }
    }

    #[test]
    fn test_creation_has_no_current_status() {
        assert_eq!(
            validate_transition(None, "Contacted", None).unwrap(),
            LeadStatus::Contacted
        );
    }

    #[test]
    fn test_lost_requires_reason() {
        let err = validate_transition(Some(LeadStatus::Negotiation), "Lost", None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err =
            validate_transition(Some(LeadStatus::Negotiation), "Lost", Some("   ")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let ok = validate_transition(
            Some(LeadStatus::Negotiation),
            "Lost",
            Some("Price too high"),
        );
        assert_eq!(ok.unwrap(), LeadStatus::Lost);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = validate_transition(Some(LeadStatus::New), "Archived", None).unwrap_err();
        assert!(matches!(err, DomainError::InvalidStatus(_)));
    }

    #[test]
    fn test_won_can_reopen() {
        // Deliberately permissive: a Won lead can be dragged back anywhere.
        let result = validate_transition(Some(LeadStatus::Won), "Contacted", None);
        assert_eq!(result.unwrap(), LeadStatus::Contacted);
    }
}
