//! Savings accumulation and loan amortization math.

/// Share of the monthly salary the employer contributes to the housing sub-account.
pub const EMPLOYER_CONTRIBUTION_RATE: f64 = 0.05;

const MONTHS_PER_YEAR: f64 = 12.0;

/// Pull a figure back into the finite range: overflow saturates at `f64::MAX`, NaN becomes `0`.
pub(crate) fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(f64::MIN, f64::MAX)
    }
}

/// Mandatory contributions accumulated over the years of service.
///
/// Callers are expected to pass non-negative values; no clamping happens here.
pub fn accumulate_base_savings(monthly_salary: f64, years_of_service: f64) -> f64 {
    saturate(monthly_salary * EMPLOYER_CONTRIBUTION_RATE * years_of_service * MONTHS_PER_YEAR)
}

/// Project `base_savings` forward at `annual_yield_percent`, compounded once per year.
pub fn apply_compound_yield(base_savings: f64, annual_yield_percent: f64, years: f64) -> f64 {
    let growth = 1.0 + annual_yield_percent / 100.0;
    if growth <= 0.0 {
        // -100% wipes the balance; anything lower is rejected before reaching here.
        return 0.0;
    }
    if base_savings == 0.0 {
        return 0.0;
    }
    saturate(base_savings * growth.powf(years))
}

/// Fixed monthly payment that amortizes `principal` over `term_years`.
///
/// A zero rate degrades to straight-line repayment and a zero term means the
/// whole principal is due at once. Overflow saturates, so the result is always finite.
pub fn amortized_payment(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    if principal == 0.0 {
        return 0.0;
    }

    let periods = term_years as f64 * MONTHS_PER_YEAR;
    if periods == 0.0 {
        return principal;
    }

    let monthly_rate = annual_rate_percent / 100.0 / MONTHS_PER_YEAR;
    if monthly_rate == 0.0 {
        return principal / periods;
    }

    let factor = (1.0 + monthly_rate).powf(periods);
    let denominator = factor - 1.0;
    if denominator == 0.0 || !denominator.is_finite() {
        return principal / periods;
    }

    saturate(principal * (monthly_rate * factor / denominator))
}

/// Sum of every scheduled payment.
pub fn total_paid(monthly_payment: f64, term_years: u32) -> f64 {
    saturate(monthly_payment * term_years as f64 * MONTHS_PER_YEAR)
}

/// Interest portion of the schedule; never negative.
pub fn total_interest(principal: f64, monthly_payment: f64, term_years: u32) -> f64 {
    (total_paid(monthly_payment, term_years) - principal).max(0.0)
}
