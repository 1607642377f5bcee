//! End-to-end scenarios driven through the public simulator API: a worker fills in
//! the wizard, reviews the figures, jumps to property search, and leaves contact data.

use std::sync::{Arc, Mutex};

use infonavit_sim::simulator::{
    calculate, compute_credit_factor, to_search_query, ContactRecord, CreditType, FieldUpdate,
    LeadError, LeadPublisher, LoanTerm, MaritalStatus, PropertyType, SimulationInputs,
    SimulationSession, WizardStep,
};
use proptest::prelude::{prop_assert, prop_assert_eq, prop_oneof, proptest, Just};

#[derive(Default)]
struct RecordingPublisher {
    records: Mutex<Vec<ContactRecord>>,
}

impl LeadPublisher for RecordingPublisher {
    fn publish(&self, record: ContactRecord) -> Result<(), LeadError> {
        self.records
            .lock()
            .expect("publisher mutex poisoned")
            .push(record);
        Ok(())
    }
}

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual}, tolerance {tol}"
    );
}

#[test]
fn worker_walks_the_wizard_and_submits() {
    let mut session = SimulationSession::new();

    session.set_field(FieldUpdate::FullName("Ana López".to_string()));
    session.set_field(FieldUpdate::Age(25));
    session.set_field(FieldUpdate::MonthlySalary(15_000.0));
    session.set_field(FieldUpdate::YearsOfService(5.0));
    session.advance();

    session.set_field(FieldUpdate::AnnualSavingsYieldPercent(5.0));
    assert_close(session.results().base_savings, 45_000.0, 1e-6);
    assert_close(session.results().compounded_savings, 57_432.67, 0.01);
    session.advance();

    assert_eq!(session.results().credit_factor, 30);
    assert_close(session.results().estimated_credit, 507_432.67, 0.01);
    session.advance();

    session.set_field(FieldUpdate::DesiredTermYears(LoanTerm::Twenty));
    session.set_field(FieldUpdate::AnnualInterestPercent(0.0));
    assert_close(
        session.results().estimated_monthly_payment,
        session.results().estimated_credit / 240.0,
        1e-9,
    );
    session.advance();
    session.advance();
    assert_eq!(session.current_step(), WizardStep::Contact);

    let query = to_search_query(session.results(), None);
    assert_eq!(query.max_price, 507_433);
    assert_eq!(query.min_price, 253_716);
    assert_eq!(query.property_type, PropertyType::House);

    let publisher = Arc::new(RecordingPublisher::default());
    assert!(infonavit_sim::simulator::submit(
        session.inputs(),
        session.results(),
        publisher.as_ref()
    )
    .is_err());

    session.set_field(FieldUpdate::ContactEmail("ana@example.com".to_string()));
    session.set_field(FieldUpdate::ContactPhone("5512345678".to_string()));
    session.set_field(FieldUpdate::ConsentGiven(true));

    let record = infonavit_sim::simulator::submit(
        session.inputs(),
        session.results(),
        publisher.as_ref(),
    )
    .expect("submission accepted");
    assert_eq!(record.estimated_credit, session.results().estimated_credit);
    assert_eq!(
        publisher.records.lock().expect("publisher mutex").len(),
        1
    );
}

#[test]
fn total_available_amount_counts_savings_twice() {
    let inputs = SimulationInputs {
        age: 25,
        monthly_salary: 15_000.0,
        years_of_service: 5.0,
        annual_savings_yield_percent: 5.0,
        ..SimulationInputs::default()
    };

    let results = calculate(&inputs);

    assert_close(
        results.total_available_amount,
        15_000.0 * 30.0 + 2.0 * results.compounded_savings,
        1e-6,
    );
}

fn credit_types() -> impl proptest::strategy::Strategy<Value = CreditType> {
    prop_oneof![
        Just(CreditType::Traditional),
        Just(CreditType::Cofinavit),
        Just(CreditType::Mejoravit),
    ]
}

fn marital_statuses() -> impl proptest::strategy::Strategy<Value = MaritalStatus> {
    prop_oneof![Just(MaritalStatus::Single), Just(MaritalStatus::Married)]
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(128))]

    #[test]
    fn prop_credit_factor_is_bounded(
        age in 0u32..120,
        credit_type in credit_types(),
        marital_status in marital_statuses()
    ) {
        let factor = compute_credit_factor(age, credit_type, marital_status);
        prop_assert!((20..=50).contains(&factor));
    }

    #[test]
    fn prop_session_results_never_go_stale(
        salary in 0u32..150_000,
        years in 0u32..40,
        age in 18u32..70,
        yield_bp in 0u32..1_500,
        rate_bp in 0u32..2_000,
        term_index in 0usize..5
    ) {
        let mut session = SimulationSession::new();
        session.set_field(FieldUpdate::MonthlySalary(salary as f64));
        session.set_field(FieldUpdate::YearsOfService(years as f64));
        session.set_field(FieldUpdate::Age(age));
        session.set_field(FieldUpdate::AnnualSavingsYieldPercent(yield_bp as f64 / 100.0));
        session.set_field(FieldUpdate::AnnualInterestPercent(rate_bp as f64 / 100.0));
        session.set_field(FieldUpdate::DesiredTermYears(LoanTerm::ordered()[term_index]));

        let expected = calculate(session.inputs());
        prop_assert_eq!(*session.results(), expected);
        prop_assert!(expected.estimated_monthly_payment.is_finite());
    }

    #[test]
    fn prop_extreme_inputs_keep_every_figure_finite(
        salary in 0.0f64..1e15,
        years in 0.0f64..1e6,
        yield_percent in -100.0f64..1e4,
        rate in 0.0f64..1e4,
        term_index in 0usize..5
    ) {
        let mut session = SimulationSession::new();
        session.set_field(FieldUpdate::MonthlySalary(salary));
        session.set_field(FieldUpdate::YearsOfService(years));
        session.set_field(FieldUpdate::AnnualSavingsYieldPercent(yield_percent));
        session.set_field(FieldUpdate::AnnualInterestPercent(rate));
        session.set_field(FieldUpdate::DesiredTermYears(LoanTerm::ordered()[term_index]));

        let results = *session.results();
        for figure in [
            results.base_savings,
            results.compounded_savings,
            results.estimated_credit,
            results.total_available_amount,
            results.estimated_monthly_payment,
        ] {
            prop_assert!(figure.is_finite());
            prop_assert!(figure >= 0.0);
        }
        prop_assert_eq!(results, calculate(session.inputs()));
    }
}
