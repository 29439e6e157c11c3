use contracts::domain::a001_lead::aggregate::{
    normalize_email, normalize_phone, Lead, LeadDto, LeadListFilter, SetFinanceStatusRequest,
    UpdateLeadStatusRequest, VehicleInterest,
};
use contracts::enums::LeadSource;
use uuid::Uuid;

use super::{repository, transitions};
use crate::shared::error::DomainError;

fn generate_code() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("LD-{}", &id[..8])
}

/// Create a new lead
///
/// Runs the duplicate-detection guard before inserting: a matching phone or
/// email on any live lead rejects the creation outright, no merge.
pub async fn create(dto: LeadDto) -> Result<Lead, DomainError> {
    let phone = normalize_phone(&dto.phone);
    let email = normalize_email(&dto.email);

    if repository::find_duplicate(&phone, &email)
        .await
        .map_err(map_repo_err)?
        .is_some()
    {
        return Err(DomainError::DuplicateLead);
    }

    let code = dto.code.clone().unwrap_or_else(generate_code);
    let mut aggregate = Lead::new_for_insert(
        code,
        dto.name,
        phone,
        email,
        dto.source.unwrap_or_default(),
        dto.temperature,
        dto.score.unwrap_or(0),
        dto.vehicle_interest,
    );

    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await.map_err(map_repo_err)?;
    Ok(aggregate)
}

pub async fn list(filter: &LeadListFilter) -> Result<Vec<Lead>, DomainError> {
    repository::list_all(filter).await.map_err(map_repo_err)
}

pub async fn get_by_id(id: Uuid) -> Result<Lead, DomainError> {
    repository::get_by_id(id)
        .await
        .map_err(map_repo_err)?
        .ok_or(DomainError::NotFound)
}

/// Update the mutable contact/editorial fields of an existing lead
pub async fn update(id: Uuid, dto: LeadDto) -> Result<Lead, DomainError> {
    let mut aggregate = get_by_id(id).await?;

    aggregate.update(&dto);
    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.base.metadata.increment_version();
    aggregate.before_write();

    repository::update(&aggregate).await.map_err(map_repo_err)?;
    Ok(aggregate)
}

/// Move a lead to a new pipeline status
///
/// The transition validator decides admissibility; on success the stored
/// status is overwritten. No history of prior statuses is kept, and there is
/// no version check on this path: two concurrent transitions race and the
/// last write wins.
pub async fn update_status(id: Uuid, req: UpdateLeadStatusRequest) -> Result<Lead, DomainError> {
    let mut aggregate = get_by_id(id).await?;

    let target = transitions::validate_transition(
        Some(aggregate.status),
        &req.status,
        req.lost_reason.as_deref(),
    )?;

    aggregate.set_status(target, req.lost_reason);
    aggregate.base.metadata.increment_version();
    aggregate.before_write();

    repository::update(&aggregate).await.map_err(map_repo_err)?;
    Ok(aggregate)
}

pub async fn set_finance_status(
    id: Uuid,
    req: SetFinanceStatusRequest,
) -> Result<Lead, DomainError> {
    let mut aggregate = get_by_id(id).await?;

    aggregate.finance_status = req.finance_status;
    aggregate.base.metadata.increment_version();
    aggregate.before_write();

    repository::update(&aggregate).await.map_err(map_repo_err)?;
    Ok(aggregate)
}

/// Soft delete; the row stays out of every listing afterwards
pub async fn delete(id: Uuid) -> Result<bool, DomainError> {
    repository::soft_delete(id).await.map_err(map_repo_err)
}

/// Render the live register as CSV (one row per lead, newest first)
pub async fn export_csv() -> anyhow::Result<String> {
    let leads = repository::list_all(&LeadListFilter::default()).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "code",
        "name",
        "phone",
        "email",
        "source",
        "status",
        "temperature",
        "score",
        "finance_status",
        "vehicle_model",
        "lost_reason",
        "created_at",
    ])?;

    for lead in &leads {
        writer.write_record([
            lead.base.code.clone(),
            lead.name.clone(),
            lead.phone.clone(),
            lead.email.clone(),
            lead.source.display_name().to_string(),
            lead.status.display_name().to_string(),
            lead.temperature.display_name().to_string(),
            lead.score.to_string(),
            lead.finance_status
                .map(|f| f.display_name().to_string())
                .unwrap_or_default(),
            lead.vehicle_interest
                .as_ref()
                .map(|v| v.model.clone())
                .unwrap_or_default(),
            lead.lost_reason.clone().unwrap_or_default(),
            lead.base.metadata.created_at.to_rfc3339(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("CSV buffer error: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Sample rows for a fresh showroom database
pub async fn insert_test_data() -> Result<(), DomainError> {
    let data = vec![
        LeadDto {
            name: "Rajesh Kumar".into(),
            phone: "9876543210".into(),
            email: "rajesh.kumar@email.com".into(),
            source: Some(LeadSource::WalkIn),
            score: Some(75),
            vehicle_interest: Some(VehicleInterest {
                model: "Altara ZX".into(),
            }),
            ..Default::default()
        },
        LeadDto {
            name: "Priya Sharma".into(),
            phone: "9812045673".into(),
            email: "priya.sharma@email.com".into(),
            source: Some(LeadSource::Website),
            score: Some(48),
            vehicle_interest: Some(VehicleInterest {
                model: "Verno Sport".into(),
            }),
            ..Default::default()
        },
        LeadDto {
            name: "Amit Patel".into(),
            phone: "9900112233".into(),
            email: "amit.patel@email.com".into(),
            source: Some(LeadSource::Exhibition),
            score: Some(22),
            ..Default::default()
        },
    ];

    for dto in data {
        match create(dto).await {
            Ok(_) => {}
            // Re-running the seed endpoint must not fail on existing rows
            Err(DomainError::DuplicateLead) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

fn map_repo_err(e: anyhow::Error) -> DomainError {
    match e.downcast::<sea_orm::DbErr>() {
        Ok(db) => DomainError::Database(db),
        Err(other) => DomainError::validation(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db;
    use contracts::enums::{FinanceStatus, LeadStatus, Temperature};

    async fn setup() {
        db::initialize_test_database().await;
    }

    fn dto(name: &str, phone: &str, email: &str) -> LeadDto {
        LeadDto {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            source: Some(LeadSource::WalkIn),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_then_list_roundtrip() {
        setup().await;

        let created = create(dto(
            "Rajesh Kumar",
            "9876543210",
            "rajesh.kumar@email.com",
        ))
        .await
        .unwrap();
        assert_eq!(created.status, LeadStatus::New);

        let listed = list(&LeadListFilter::default()).await.unwrap();
        let found = listed
            .iter()
            .find(|l| l.base.id == created.base.id)
            .expect("created lead must appear in the listing");
        assert_eq!(found.name, "Rajesh Kumar");
        assert_eq!(found.phone, "9876543210");
        assert_eq!(found.email, "rajesh.kumar@email.com");
        assert_eq!(found.source, LeadSource::WalkIn);
        assert_eq!(found.status, LeadStatus::New);
    }

    #[tokio::test]
    async fn test_duplicate_phone_is_rejected() {
        setup().await;

        create(dto("A", "111", "a@x.com")).await.unwrap();
        let before = list(&LeadListFilter::default()).await.unwrap().len();

        // Same phone, different email
        let err = create(dto("B", "111", "b@x.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateLead));

        // No insert happened
        let after = list(&LeadListFilter::default()).await.unwrap().len();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected_case_insensitively() {
        setup().await;

        create(dto("C", "222", "c@x.com")).await.unwrap();
        let err = create(dto("D", "333", "  C@X.COM ")).await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateLead));
    }

    #[tokio::test]
    async fn test_status_update_on_unknown_id_is_not_found() {
        setup().await;

        let err = update_status(
            Uuid::new_v4(),
            UpdateLeadStatusRequest {
                status: "Contacted".into(),
                lost_reason: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DomainError::NotFound));
    }

    #[tokio::test]
    async fn test_lost_without_reason_rejected_then_retry_succeeds() {
        setup().await;

        let lead = create(dto("E", "444", "e@x.com")).await.unwrap();
        let id = lead.base.id.value();

        update_status(
            id,
            UpdateLeadStatusRequest {
                status: "Negotiation".into(),
                lost_reason: None,
            },
        )
        .await
        .unwrap();

        // First attempt: no reason
        let err = update_status(
            id,
            UpdateLeadStatusRequest {
                status: "Lost".into(),
                lost_reason: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // The rejected attempt must not have touched the record
        let unchanged = get_by_id(id).await.unwrap();
        assert_eq!(unchanged.status, LeadStatus::Negotiation);

        // Retry with a reason
        let updated = update_status(
            id,
            UpdateLeadStatusRequest {
                status: "Lost".into(),
                lost_reason: Some("Price too high".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.status, LeadStatus::Lost);
        assert_eq!(updated.lost_reason.as_deref(), Some("Price too high"));

        let stored = get_by_id(id).await.unwrap();
        assert_eq!(stored.status, LeadStatus::Lost);
        assert_eq!(stored.lost_reason.as_deref(), Some("Price too high"));
    }

    #[tokio::test]
    async fn test_won_lead_can_move_backwards() {
        setup().await;

        let lead = create(dto("F", "555", "f@x.com")).await.unwrap();
        let id = lead.base.id.value();

        for status in ["Test Drive", "Won", "Contacted"] {
            let updated = update_status(
                id,
                UpdateLeadStatusRequest {
                    status: status.into(),
                    lost_reason: None,
                },
            )
            .await
            .unwrap();
            assert_eq!(updated.status.display_name(), status);
        }
    }

    #[tokio::test]
    async fn test_unknown_status_is_invalid() {
        setup().await;

        let lead = create(dto("G", "666", "g@x.com")).await.unwrap();
        let err = update_status(
            lead.base.id.value(),
            UpdateLeadStatusRequest {
                status: "Archived".into(),
                lost_reason: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidStatus(_)));
    }

    #[tokio::test]
    async fn test_finance_status_set_and_clear() {
        setup().await;

        let lead = create(dto("H", "777", "h@x.com")).await.unwrap();
        let id = lead.base.id.value();

        let updated = set_finance_status(
            id,
            SetFinanceStatusRequest {
                finance_status: Some(FinanceStatus::PreApproved),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.finance_status, Some(FinanceStatus::PreApproved));

        let cleared = set_finance_status(
            id,
            SetFinanceStatusRequest {
                finance_status: None,
            },
        )
        .await
        .unwrap();
        assert!(cleared.finance_status.is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_from_listing_and_lookup() {
        setup().await;

        let lead = create(dto("I", "888", "i@x.com")).await.unwrap();
        let id = lead.base.id.value();

        assert!(delete(id).await.unwrap());
        // Second delete finds nothing
        assert!(!delete(id).await.unwrap());

        let err = get_by_id(id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound));

        let listed = list(&LeadListFilter::default()).await.unwrap();
        assert!(listed.iter().all(|l| l.base.id.value() != id));
    }

    #[tokio::test]
    async fn test_temperature_prefilled_from_score() {
        setup().await;

        let mut d = dto("J", "999", "j@x.com");
        d.score = Some(85);
        let lead = create(d).await.unwrap();
        assert_eq!(lead.temperature, Temperature::Hot);

        // Explicit tier wins over the score
        let mut d2 = dto("K", "1010", "k@x.com");
        d2.score = Some(85);
        d2.temperature = Some(Temperature::Cold);
        let lead2 = create(d2).await.unwrap();
        assert_eq!(lead2.temperature, Temperature::Cold);
    }

    #[tokio::test]
    async fn test_list_filter_by_status() {
        setup().await;

        let lead = create(dto("L", "1111", "l@x.com")).await.unwrap();
        update_status(
            lead.base.id.value(),
            UpdateLeadStatusRequest {
                status: "Test Drive".into(),
                lost_reason: None,
            },
        )
        .await
        .unwrap();

        let filter = LeadListFilter {
            status: Some("Test Drive".into()),
            ..Default::default()
        };
        let listed = list(&filter).await.unwrap();
        assert!(listed.iter().any(|l| l.base.id == lead.base.id));
        assert!(listed.iter().all(|l| l.status == LeadStatus::TestDrive));
    }
}
