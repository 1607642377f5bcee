use super::domain::{CreditType, MaritalStatus};
use serde::{Deserialize, Serialize};

pub const BASE_CREDIT_FACTOR: i16 = 20;
pub const MIN_CREDIT_FACTOR: u8 = 20;
pub const MAX_CREDIT_FACTOR: u8 = 50;

/// Rule that contributed to the final factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorRule {
    Base,
    AgeBracket,
    CreditType,
    MaritalStatus,
}

/// Discrete contribution to the credit factor, kept for the results summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorAdjustment {
    pub rule: FactorRule,
    pub points: i16,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditFactorBreakdown {
    pub adjustments: Vec<FactorAdjustment>,
    pub raw_total: i16,
    pub factor: u8,
}

impl CreditFactorBreakdown {
    pub fn was_clamped(&self) -> bool {
        i16::from(self.factor) != self.raw_total
    }
}

/// Multiplier applied to the monthly salary, always within `[20, 50]`.
pub fn compute_credit_factor(age: u32, credit_type: CreditType, marital_status: MaritalStatus) -> u8 {
    credit_factor_breakdown(age, credit_type, marital_status).factor
}

pub fn credit_factor_breakdown(
    age: u32,
    credit_type: CreditType,
    marital_status: MaritalStatus,
) -> CreditFactorBreakdown {
    let mut adjustments = Vec::with_capacity(4);
    let mut raw_total = BASE_CREDIT_FACTOR;

    adjustments.push(FactorAdjustment {
        rule: FactorRule::Base,
        points: BASE_CREDIT_FACTOR,
        notes: "base factor".to_string(),
    });

    let (age_points, age_notes) = match age {
        0..=30 => (10, "age 30 or under"),
        31..=40 => (5, "age between 31 and 40"),
        41..=50 => (0, "age between 41 and 50"),
        _ => (-5, "age over 50"),
    };
    adjustments.push(FactorAdjustment {
        rule: FactorRule::AgeBracket,
        points: age_points,
        notes: format!("{age_notes} ({age})"),
    });
    raw_total += age_points;

    let credit_points = match credit_type {
        CreditType::Traditional => 0,
        CreditType::Cofinavit => 10,
        CreditType::Mejoravit => 15,
    };
    adjustments.push(FactorAdjustment {
        rule: FactorRule::CreditType,
        points: credit_points,
        notes: credit_type.label().to_string(),
    });
    raw_total += credit_points;

    let marital_points = match marital_status {
        MaritalStatus::Single => 0,
        MaritalStatus::Married => 5,
    };
    adjustments.push(FactorAdjustment {
        rule: FactorRule::MaritalStatus,
        points: marital_points,
        notes: marital_status.label().to_string(),
    });
    raw_total += marital_points;

    let factor = raw_total.clamp(i16::from(MIN_CREDIT_FACTOR), i16::from(MAX_CREDIT_FACTOR)) as u8;

    CreditFactorBreakdown {
        adjustments,
        raw_total,
        factor,
    }
}
