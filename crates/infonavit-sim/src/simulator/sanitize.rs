//! Input-boundary coercion for text typed into the simulator.
//!
//! Malformed or negative numbers become `0` instead of failing; only values that
//! would make the math meaningless (a yield below -100%, a term outside the offer)
//! are rejected.

use super::fields::FieldError;
use super::domain::LoanTerm;

pub const MIN_SAVINGS_YIELD_PERCENT: f64 = -100.0;

pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

pub(crate) fn savings_yield(value: f64) -> f64 {
    if value.is_finite() {
        value.max(MIN_SAVINGS_YIELD_PERCENT)
    } else {
        0.0
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, ',' | '$' | ' ' | '%'))
        .collect();
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse an amount, turning anything unusable into `0`.
pub fn coerce_non_negative(raw: &str) -> f64 {
    parse_number(raw).map(non_negative).unwrap_or(0.0)
}

/// Whole years of age; fractional input is truncated.
pub fn coerce_age(raw: &str) -> u32 {
    let value = coerce_non_negative(raw).trunc();
    if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value as u32
    }
}

/// Yield percentages may be negative, but not below -100.
pub fn parse_savings_yield(raw: &str) -> Result<f64, FieldError> {
    match parse_number(raw) {
        Some(value) if value < MIN_SAVINGS_YIELD_PERCENT => {
            Err(FieldError::YieldBelowFloor { found: value })
        }
        Some(value) => Ok(value),
        None => Ok(0.0),
    }
}

pub fn parse_term(raw: &str) -> Result<LoanTerm, FieldError> {
    parse_number(raw)
        .filter(|value| value.fract() == 0.0 && *value >= 0.0 && *value <= f64::from(u32::MAX))
        .and_then(|value| LoanTerm::from_years(value as u32))
        .ok_or_else(|| FieldError::InvalidTerm {
            raw: raw.trim().to_string(),
        })
}

pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "si" | "sí" | "on"
    )
}
