use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::domain::a002_quotation::pricing::{self, PriceBreakdown};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuotationId(pub Uuid);

impl QuotationId {
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

impl AggregateId for QuotationId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(QuotationId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotation {
    #[serde(flatten)]
    pub base: BaseAggregate<QuotationId>,

    /// Lead this quotation was prepared for
    #[serde(rename = "leadId")]
    pub lead_id: String,

    #[serde(rename = "vehicleModel")]
    pub vehicle_model: String,
    #[serde(rename = "exShowroomPrice")]
    pub ex_showroom_price: f64,
    #[serde(rename = "rtoPct")]
    pub rto_pct: f64,
    #[serde(rename = "insurancePct")]
    pub insurance_pct: f64,
    pub accessories: f64,
    pub discount: f64,

    // Finance terms
    #[serde(rename = "downPayment")]
    pub down_payment: f64,
    #[serde(rename = "annualRatePct")]
    pub annual_rate_pct: f64,
    #[serde(rename = "tenureMonths")]
    pub tenure_months: i32,
}

impl Quotation {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        lead_id: String,
        vehicle_model: String,
        ex_showroom_price: f64,
        rto_pct: f64,
        insurance_pct: f64,
        accessories: f64,
        discount: f64,
        down_payment: f64,
        annual_rate_pct: f64,
        tenure_months: i32,
    ) -> Self {
        Self {
            base: BaseAggregate::new(QuotationId::new_v4(), code),
            lead_id,
            vehicle_model,
            ex_showroom_price,
            rto_pct,
            insurance_pct,
            accessories,
            discount,
            down_payment,
            annual_rate_pct,
            tenure_months,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    pub fn update(&mut self, dto: &QuotationDto) {
        self.vehicle_model = dto.vehicle_model.clone();
        self.ex_showroom_price = dto.ex_showroom_price;
        self.rto_pct = dto.rto_pct;
        self.insurance_pct = dto.insurance_pct;
        self.accessories = dto.accessories;
        self.discount = dto.discount;
        self.down_payment = dto.down_payment;
        self.annual_rate_pct = dto.annual_rate_pct;
        self.tenure_months = dto.tenure_months;
    }

    pub fn price_breakdown(&self) -> PriceBreakdown {
        pricing::price_breakdown(
            self.ex_showroom_price,
            self.rto_pct,
            self.insurance_pct,
            self.accessories,
            self.discount,
        )
    }

    /// Monthly installment on the financed part of the on-road price
    pub fn monthly_installment(&self) -> f64 {
        let principal = self.price_breakdown().on_road_price - self.down_payment;
        pricing::monthly_installment(principal, self.annual_rate_pct, self.tenure_months)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.vehicle_model.trim().is_empty() {
            return Err("Vehicle model cannot be empty".into());
        }
        if self.ex_showroom_price <= 0.0 {
            return Err("Ex-showroom price must be positive".into());
        }
        if self.rto_pct < 0.0 || self.insurance_pct < 0.0 {
            return Err("Percentages cannot be negative".into());
        }
        if self.tenure_months < 0 {
            return Err("Tenure cannot be negative".into());
        }
        if self.down_payment < 0.0 || self.down_payment > self.price_breakdown().on_road_price {
            return Err("Down payment out of range".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for Quotation {
    type Id = QuotationId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "quotation"
    }

    fn element_name() -> &'static str {
        "Quotation"
    }

    fn list_name() -> &'static str {
        "Quotations"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuotationDto {
    pub id: Option<String>,
    pub code: Option<String>,
    #[serde(rename = "leadId")]
    pub lead_id: String,
    #[serde(rename = "vehicleModel")]
    pub vehicle_model: String,
    #[serde(rename = "exShowroomPrice")]
    pub ex_showroom_price: f64,
    #[serde(rename = "rtoPct", default)]
    pub rto_pct: f64,
    #[serde(rename = "insurancePct", default)]
    pub insurance_pct: f64,
    #[serde(default)]
    pub accessories: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(rename = "downPayment", default)]
    pub down_payment: f64,
    #[serde(rename = "annualRatePct", default)]
    pub annual_rate_pct: f64,
    #[serde(rename = "tenureMonths", default)]
    pub tenure_months: i32,
}

/// Response shape for quotation reads: the stored inputs plus the derived
/// figures, so clients never recompute the formulas themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotationView {
    #[serde(flatten)]
    pub quotation: Quotation,
    pub breakdown: PriceBreakdown,
    #[serde(rename = "monthlyInstallment")]
    pub monthly_installment: f64,
}

impl From<Quotation> for QuotationView {
    fn from(q: Quotation) -> Self {
        let breakdown = q.price_breakdown();
        let monthly_installment = q.monthly_installment();
        Self {
            quotation: q,
            breakdown,
            monthly_installment,
        }
    }
}

/// Request of the stateless pricing preview (nothing persisted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotationPreviewRequest {
    #[serde(rename = "exShowroomPrice")]
    pub ex_showroom_price: f64,
    #[serde(rename = "rtoPct", default)]
    pub rto_pct: f64,
    #[serde(rename = "insurancePct", default)]
    pub insurance_pct: f64,
    #[serde(default)]
    pub accessories: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(rename = "downPayment", default)]
    pub down_payment: f64,
    #[serde(rename = "annualRatePct", default)]
    pub annual_rate_pct: f64,
    #[serde(rename = "tenureMonths", default)]
    pub tenure_months: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotationPreviewResponse {
    pub breakdown: PriceBreakdown,
    #[serde(rename = "monthlyInstallment")]
    pub monthly_installment: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Quotation {
        Quotation::new_for_insert(
            "QT-001".into(),
            Uuid::new_v4().to_string(),
            "Altara ZX".into(),
            800_000.0,
            9.0,
            4.0,
            15_000.0,
            20_000.0,
            200_000.0,
            9.5,
            48,
        )
    }

    #[test]
    fn test_view_derives_from_inputs() {
        let view: QuotationView = sample().into();
        assert!((view.breakdown.on_road_price - 899_000.0).abs() < 0.01);
        assert!(view.monthly_installment > 0.0);
    }

    #[test]
    fn test_validate_down_payment_range() {
        let mut q = sample();
        q.down_payment = 10_000_000.0;
        assert!(q.validate().is_err());
    }
}
