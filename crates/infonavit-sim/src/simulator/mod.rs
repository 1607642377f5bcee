//! Mortgage-credit eligibility simulator: savings and credit math, the six-step
//! wizard session, the property-search handoff, and the contact submission gate.

pub mod batch;
pub mod calculator;
pub mod credit_factor;
pub mod domain;
pub mod fields;
pub mod formulas;
pub mod repository;
pub mod router;
pub mod sanitize;
pub mod search;
pub mod service;
pub mod session;
pub mod submission;

#[cfg(test)]
mod tests;

pub use batch::{BatchImportError, BatchScenarioImporter};
pub use calculator::calculate;
pub use credit_factor::{
    compute_credit_factor, credit_factor_breakdown, CreditFactorBreakdown, FactorAdjustment,
    FactorRule,
};
pub use domain::{
    CreditType, LoanTerm, MaritalStatus, PropertyType, SimulationInputs, SimulationResults,
    WizardStep,
};
pub use fields::{FieldError, FieldUpdate, SimulationField};
pub use formulas::{
    accumulate_base_savings, amortized_payment, apply_compound_yield, total_interest, total_paid,
};
pub use repository::{
    ContactRecord, LeadError, LeadPublisher, SessionId, SessionStore, SessionStoreError,
};
pub use router::simulation_router;
pub use sanitize::{coerce_age, coerce_non_negative, parse_savings_yield, parse_term};
pub use search::{to_search_query, SearchQuery};
pub use service::{SimulationService, SimulationServiceError};
pub use session::{SessionView, SimulationSession};
pub use submission::{can_submit, submission_issues, submit, SubmissionError, SubmissionIssue};
