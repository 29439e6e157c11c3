use contracts::domain::a002_quotation::aggregate::{
    Quotation, QuotationDto, QuotationPreviewRequest, QuotationPreviewResponse, QuotationView,
};
use contracts::domain::a002_quotation::pricing;
use uuid::Uuid;

use super::repository;
use crate::domain::a001_lead;
use crate::shared::error::DomainError;

fn generate_code() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("QT-{}", &id[..8])
}

fn map_repo_err(e: anyhow::Error) -> DomainError {
    match e.downcast::<sea_orm::DbErr>() {
        Ok(db) => DomainError::Database(db),
        Err(other) => DomainError::validation(other.to_string()),
    }
}

/// Create a quotation for an existing lead
pub async fn create(dto: QuotationDto) -> Result<QuotationView, DomainError> {
    let lead_id = Uuid::parse_str(&dto.lead_id)
        .map_err(|_| DomainError::validation("Invalid lead id"))?;
    // The referenced lead must be alive
    a001_lead::service::get_by_id(lead_id).await?;

    let code = dto.code.clone().unwrap_or_else(generate_code);
    let mut aggregate = Quotation::new_for_insert(
        code,
        lead_id.to_string(),
        dto.vehicle_model,
        dto.ex_showroom_price,
        dto.rto_pct,
        dto.insurance_pct,
        dto.accessories,
        dto.discount,
        dto.down_payment,
        dto.annual_rate_pct,
        dto.tenure_months,
    );

    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await.map_err(map_repo_err)?;
    Ok(aggregate.into())
}

/// Update an existing quotation's inputs; derived figures follow
pub async fn update(dto: QuotationDto) -> Result<QuotationView, DomainError> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| DomainError::validation("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await
        .map_err(map_repo_err)?
        .ok_or(DomainError::NotFound)?;

    aggregate.update(&dto);
    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.base.metadata.increment_version();
    aggregate.before_write();

    repository::update(&aggregate).await.map_err(map_repo_err)?;
    Ok(aggregate.into())
}

pub async fn get_by_id(id: Uuid) -> Result<QuotationView, DomainError> {
    repository::get_by_id(id)
        .await
        .map_err(map_repo_err)?
        .map(Into::into)
        .ok_or(DomainError::NotFound)
}

pub async fn list(lead_id: Option<Uuid>) -> Result<Vec<QuotationView>, DomainError> {
    let items = repository::list_all(lead_id).await.map_err(map_repo_err)?;
    Ok(items.into_iter().map(Into::into).collect())
}

pub async fn delete(id: Uuid) -> Result<bool, DomainError> {
    repository::soft_delete(id).await.map_err(map_repo_err)
}

/// Stateless pricing preview; nothing is persisted
pub fn preview(req: &QuotationPreviewRequest) -> QuotationPreviewResponse {
    let breakdown = pricing::price_breakdown(
        req.ex_showroom_price,
        req.rto_pct,
        req.insurance_pct,
        req.accessories,
        req.discount,
    );
    let principal = breakdown.on_road_price - req.down_payment;
    let monthly_installment =
        pricing::monthly_installment(principal, req.annual_rate_pct, req.tenure_months);
    QuotationPreviewResponse {
        breakdown,
        monthly_installment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db;
    use contracts::domain::a001_lead::aggregate::LeadDto;
    use contracts::enums::LeadSource;

    async fn setup() {
        db::initialize_test_database().await;
    }

    async fn insert_lead(phone: &str, email: &str) -> Uuid {
        let lead = a001_lead::service::create(LeadDto {
            name: "Quotation Buyer".into(),
            phone: phone.into(),
            email: email.into(),
            source: Some(LeadSource::Website),
            ..Default::default()
        })
        .await
        .unwrap();
        lead.base.id.value()
    }

    fn dto(lead_id: Uuid) -> QuotationDto {
        QuotationDto {
            lead_id: lead_id.to_string(),
            vehicle_model: "Altara ZX".into(),
            ex_showroom_price: 800_000.0,
            rto_pct: 9.0,
            insurance_pct: 4.0,
            accessories: 15_000.0,
            discount: 20_000.0,
            down_payment: 99_000.0,
            annual_rate_pct: 10.0,
            tenure_months: 60,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_read_back_with_derived_figures() {
        setup().await;

        let lead_id = insert_lead("7001", "q1@x.com").await;
        let created = create(dto(lead_id)).await.unwrap();
        assert!((created.breakdown.on_road_price - 899_000.0).abs() < 0.01);

        let fetched = get_by_id(created.quotation.base.id.value()).await.unwrap();
        assert_eq!(fetched.quotation.vehicle_model, "Altara ZX");
        // 800k financed over 60 months at 10% p.a.
        assert!((fetched.monthly_installment - 16_997.63).abs() < 1.0);
    }

    #[tokio::test]
    async fn test_create_for_unknown_lead_is_not_found() {
        setup().await;

        let err = create(dto(Uuid::new_v4())).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound));
    }

    #[tokio::test]
    async fn test_list_filters_by_lead() {
        setup().await;

        let lead_a = insert_lead("7002", "q2@x.com").await;
        let lead_b = insert_lead("7003", "q3@x.com").await;
        create(dto(lead_a)).await.unwrap();
        create(dto(lead_a)).await.unwrap();
        create(dto(lead_b)).await.unwrap();

        let for_a = list(Some(lead_a)).await.unwrap();
        assert_eq!(for_a.len(), 2);
        assert!(for_a
            .iter()
            .all(|q| q.quotation.lead_id == lead_a.to_string()));
    }

    #[tokio::test]
    async fn test_preview_is_pure() {
        let req = QuotationPreviewRequest {
            ex_showroom_price: 800_000.0,
            rto_pct: 9.0,
            insurance_pct: 4.0,
            accessories: 15_000.0,
            discount: 20_000.0,
            down_payment: 399_000.0,
            annual_rate_pct: 10.0,
            tenure_months: 60,
        };
        let resp = preview(&req);
        assert!((resp.breakdown.on_road_price - 899_000.0).abs() < 0.01);
        // 500k financed -> the textbook 10623.52
        assert!((resp.monthly_installment - 10_623.52).abs() < 0.01);
    }
}
