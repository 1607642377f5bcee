use super::credit_factor::compute_credit_factor;
use super::domain::{SimulationInputs, SimulationResults};
use super::formulas::{accumulate_base_savings, amortized_payment, apply_compound_yield, saturate};
use super::sanitize::{non_negative, savings_yield};

/// Derive every result figure from one input snapshot.
///
/// Pure and total: the same inputs always produce bit-identical results.
pub fn calculate(inputs: &SimulationInputs) -> SimulationResults {
    let monthly_salary = non_negative(inputs.monthly_salary);
    let years_of_service = non_negative(inputs.years_of_service);
    let yield_percent = savings_yield(inputs.annual_savings_yield_percent);
    let interest_percent = non_negative(inputs.annual_interest_percent);

    let base_savings = accumulate_base_savings(monthly_salary, years_of_service);
    let compounded_savings = apply_compound_yield(base_savings, yield_percent, years_of_service);
    let credit_factor =
        compute_credit_factor(inputs.age, inputs.credit_type, inputs.marital_status);
    let estimated_credit = saturate(monthly_salary * f64::from(credit_factor) + compounded_savings);
    // Savings are counted once inside the credit and once more on top.
    let total_available_amount = saturate(estimated_credit + compounded_savings);
    let estimated_monthly_payment = amortized_payment(
        estimated_credit,
        interest_percent,
        inputs.desired_term_years.years(),
    );

    SimulationResults {
        base_savings,
        compounded_savings,
        credit_factor,
        estimated_credit,
        total_available_amount,
        estimated_monthly_payment,
    }
}
