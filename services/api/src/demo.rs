use crate::infra::{parse_property_type, InMemoryLeadSink};
use clap::Args;
use infonavit_sim::error::AppError;
use infonavit_sim::simulator::{
    credit_factor_breakdown, submit, to_search_query, BatchScenarioImporter, FieldUpdate,
    PropertyType, SimulationInputs, SimulationServiceError, SimulationSession, WizardStep,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    /// Worker's full name
    #[arg(long, default_value = "")]
    pub(crate) name: String,
    /// Age in years
    #[arg(long, default_value = "0")]
    pub(crate) age: String,
    /// Gross monthly salary
    #[arg(long, default_value = "0")]
    pub(crate) salary: String,
    /// Years of registered service
    #[arg(long, default_value = "0")]
    pub(crate) years: String,
    /// traditional, cofinavit or mejoravit
    #[arg(long, default_value = "traditional")]
    pub(crate) credit_type: String,
    /// single or married
    #[arg(long, default_value = "single")]
    pub(crate) marital_status: String,
    /// Annual yield of the housing sub-account, in percent
    #[arg(long, default_value = "0")]
    pub(crate) savings_yield: String,
    /// Loan term in years (5, 10, 15, 20 or 30)
    #[arg(long, default_value = "20")]
    pub(crate) term: String,
    /// Annual interest rate, in percent
    #[arg(long, default_value = "0")]
    pub(crate) interest: String,
    /// Also print the property-search handoff
    #[arg(long)]
    pub(crate) search: bool,
    /// Property type for the search handoff (defaults to house)
    #[arg(long, value_parser = parse_property_type)]
    pub(crate) property_type: Option<PropertyType>,
    /// Print the session snapshot as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with one scenario per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Property type for the search handoff (defaults to house)
    #[arg(long, value_parser = parse_property_type)]
    pub(crate) property_type: Option<PropertyType>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Stop at the contact step without submitting
    #[arg(long)]
    pub(crate) skip_submit: bool,
}

pub(crate) fn run_simulation(args: SimulateArgs) -> Result<(), AppError> {
    let fields = [
        ("fullName", args.name.as_str()),
        ("age", args.age.as_str()),
        ("monthlySalary", args.salary.as_str()),
        ("yearsOfService", args.years.as_str()),
        ("creditType", args.credit_type.as_str()),
        ("maritalStatus", args.marital_status.as_str()),
        ("annualSavingsYieldPercent", args.savings_yield.as_str()),
        ("desiredTermYears", args.term.as_str()),
        ("annualInterestPercent", args.interest.as_str()),
    ];

    let mut session = SimulationSession::new();
    for (name, raw) in fields {
        session
            .set_named_field(name, raw)
            .map_err(SimulationServiceError::from)?;
    }

    if args.json {
        let rendered = serde_json::to_string_pretty(&session.snapshot())
            .map_err(|err| AppError::Io(err.into()))?;
        println!("{rendered}");
        return Ok(());
    }

    render_results(&session);

    if args.search {
        let query = to_search_query(session.results(), args.property_type);
        println!("\nProperty search");
        println!("- price range: {} - {}", query.min_price, query.max_price);
        println!("- type: {}", query.property_type);
        println!("- query: {}", query.to_query_string());
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let scenarios = BatchScenarioImporter::from_path(&args.csv)?;

    println!("Batch simulation ({} scenarios)", scenarios.len());
    println!(
        "{:<24} {:>6} {:>14} {:>12} {:>25}",
        "Worker", "Factor", "Credit", "Payment", "Price range"
    );
    for inputs in scenarios {
        let session = SimulationSession::with_inputs(inputs);
        let results = session.results();
        let query = to_search_query(results, args.property_type);
        let name = if session.inputs().full_name.is_empty() {
            "(unnamed)"
        } else {
            session.inputs().full_name.as_str()
        };
        println!(
            "{:<24} {:>6} {:>14.2} {:>12.2} {:>25}",
            name,
            results.credit_factor,
            results.estimated_credit,
            results.estimated_monthly_payment,
            format!("{} - {}", query.min_price, query.max_price)
        );
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Credit simulator demo");
    let mut session = SimulationSession::new();

    for step in WizardStep::ordered() {
        println!("\nStep {}: {}", step.index(), step.label());
        for update in demo_updates(step) {
            session.set_field(update);
        }
        describe_step(&session, step);
        session.advance();
    }

    if args.skip_submit {
        println!("\nSubmission skipped");
        return Ok(());
    }

    let sink = InMemoryLeadSink::default();
    let record = submit(session.inputs(), session.results(), &sink)
        .map_err(SimulationServiceError::from)?;
    println!(
        "\nLead sent for {} <{}>",
        record.full_name, record.contact_email
    );
    for lead in sink.leads() {
        println!("- received at {}", lead.received_at.to_rfc3339());
    }

    Ok(())
}

fn demo_updates(step: WizardStep) -> Vec<FieldUpdate> {
    let sample = demo_inputs();
    match step {
        WizardStep::WorkerData => vec![
            FieldUpdate::FullName(sample.full_name),
            FieldUpdate::Age(sample.age),
            FieldUpdate::MonthlySalary(sample.monthly_salary),
            FieldUpdate::YearsOfService(sample.years_of_service),
            FieldUpdate::MaritalStatus(sample.marital_status),
        ],
        WizardStep::SavingsEstimate => vec![FieldUpdate::AnnualSavingsYieldPercent(
            sample.annual_savings_yield_percent,
        )],
        WizardStep::CreditCalculation => vec![FieldUpdate::CreditType(sample.credit_type)],
        WizardStep::PaymentEstimate => vec![
            FieldUpdate::DesiredTermYears(sample.desired_term_years),
            FieldUpdate::AnnualInterestPercent(sample.annual_interest_percent),
        ],
        WizardStep::ResultsSummary => Vec::new(),
        WizardStep::Contact => vec![
            FieldUpdate::ContactEmail(sample.contact_email),
            FieldUpdate::ContactPhone(sample.contact_phone),
            FieldUpdate::ConsentGiven(sample.consent_given),
        ],
    }
}

fn demo_inputs() -> SimulationInputs {
    SimulationInputs {
        full_name: "Ana López".to_string(),
        age: 25,
        monthly_salary: 15_000.0,
        years_of_service: 5.0,
        annual_savings_yield_percent: 5.0,
        annual_interest_percent: 10.0,
        contact_email: "ana@example.com".to_string(),
        contact_phone: "5512345678".to_string(),
        consent_given: true,
        ..SimulationInputs::default()
    }
}

fn describe_step(session: &SimulationSession, step: WizardStep) {
    let results = session.results();
    match step {
        WizardStep::WorkerData => println!(
            "- salary {:.2}, {} years of service",
            session.inputs().monthly_salary,
            session.inputs().years_of_service
        ),
        WizardStep::SavingsEstimate => println!(
            "- base savings {:.2}, compounded {:.2}",
            results.base_savings, results.compounded_savings
        ),
        WizardStep::CreditCalculation => {
            let inputs = session.inputs();
            let breakdown =
                credit_factor_breakdown(inputs.age, inputs.credit_type, inputs.marital_status);
            for adjustment in &breakdown.adjustments {
                println!("- {:+} {}", adjustment.points, adjustment.notes);
            }
            println!(
                "- factor {} -> estimated credit {:.2}",
                breakdown.factor, results.estimated_credit
            );
        }
        WizardStep::PaymentEstimate => println!(
            "- {} at {:.2}% -> {:.2} per month",
            session.inputs().desired_term_years,
            session.inputs().annual_interest_percent,
            results.estimated_monthly_payment
        ),
        WizardStep::ResultsSummary => render_results(session),
        WizardStep::Contact => println!(
            "- ready to submit: {}",
            if session.snapshot().can_submit {
                "yes"
            } else {
                "no"
            }
        ),
    }
}

fn render_results(session: &SimulationSession) {
    let view = session.snapshot();
    let results = view.results;
    println!("Simulation results");
    println!("- base savings: {:.2}", results.base_savings);
    println!("- compounded savings: {:.2}", results.compounded_savings);
    println!("- credit factor: {}", results.credit_factor);
    println!("- estimated credit: {:.2}", results.estimated_credit);
    println!(
        "- total available amount: {:.2}",
        results.total_available_amount
    );
    println!(
        "- monthly payment: {:.2} over {}",
        results.estimated_monthly_payment, view.inputs.desired_term_years
    );
    println!("- total paid: {:.2}", view.total_paid);
    println!("- total interest: {:.2}", view.total_interest);
}
