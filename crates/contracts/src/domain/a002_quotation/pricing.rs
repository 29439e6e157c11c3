use serde::{Deserialize, Serialize};

/// On-road price breakdown
///
/// Fixed-formula arithmetic: RTO and insurance are percentages of the
/// ex-showroom price, accessories add, discount subtracts. Never persisted;
/// recomputed from the quotation inputs on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    #[serde(rename = "exShowroomPrice")]
    pub ex_showroom_price: f64,
    #[serde(rename = "rtoAmount")]
    pub rto_amount: f64,
    #[serde(rename = "insuranceAmount")]
    pub insurance_amount: f64,
    pub accessories: f64,
    pub discount: f64,
    #[serde(rename = "onRoadPrice")]
    pub on_road_price: f64,
}

pub fn price_breakdown(
    ex_showroom_price: f64,
    rto_pct: f64,
    insurance_pct: f64,
    accessories: f64,
    discount: f64,
) -> PriceBreakdown {
    let rto_amount = ex_showroom_price * rto_pct / 100.0;
    let insurance_amount = ex_showroom_price * insurance_pct / 100.0;
    let on_road_price = ex_showroom_price + rto_amount + insurance_amount + accessories - discount;
    PriceBreakdown {
        ex_showroom_price,
        rto_amount,
        insurance_amount,
        accessories,
        discount,
        on_road_price,
    }
}

/// Monthly installment for a financed principal
///
/// Standard amortization: E = P * r * (1+r)^n / ((1+r)^n - 1) with the
/// monthly rate r = annual/12/100. A zero rate degenerates to P/n.
pub fn monthly_installment(principal: f64, annual_rate_pct: f64, tenure_months: i32) -> f64 {
    if tenure_months <= 0 || principal <= 0.0 {
        return 0.0;
    }
    let n = tenure_months as f64;
    let r = annual_rate_pct / 12.0 / 100.0;
    if r == 0.0 {
        return principal / n;
    }
    let factor = (1.0 + r).powf(n);
    principal * r * factor / (factor - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_on_road_price_formula() {
        // 8L ex-showroom, 9% RTO, 4% insurance, 15k accessories, 20k discount
        let b = price_breakdown(800_000.0, 9.0, 4.0, 15_000.0, 20_000.0);
        assert!(close(b.rto_amount, 72_000.0));
        assert!(close(b.insurance_amount, 32_000.0));
        assert!(close(b.on_road_price, 899_000.0));
    }

    #[test]
    fn test_emi_known_value() {
        // 5L over 60 months at 10% p.a. -> 10623.52
        let emi = monthly_installment(500_000.0, 10.0, 60);
        assert!(close(emi, 10_623.52));
    }

    #[test]
    fn test_emi_zero_rate_is_linear() {
        let emi = monthly_installment(120_000.0, 0.0, 12);
        assert!(close(emi, 10_000.0));
    }

    #[test]
    fn test_emi_degenerate_inputs() {
        assert_eq!(monthly_installment(500_000.0, 10.0, 0), 0.0);
        assert_eq!(monthly_installment(0.0, 10.0, 36), 0.0);
    }
}
