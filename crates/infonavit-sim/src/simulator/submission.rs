use super::domain::{SimulationInputs, SimulationResults};
use super::repository::{ContactRecord, LeadError, LeadPublisher};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Gating condition that is not yet satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionIssue {
    MissingConsent,
    MissingEmail,
    MissingPhone,
}

impl SubmissionIssue {
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingConsent => "Debes aceptar el aviso de privacidad",
            Self::MissingEmail => "Ingresa tu correo electrónico",
            Self::MissingPhone => "Ingresa tu número de teléfono",
        }
    }
}

impl fmt::Display for SubmissionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Every reason the contact step cannot be submitted yet. Format checks on the
/// email and phone belong to the form layer.
pub fn submission_issues(inputs: &SimulationInputs) -> Vec<SubmissionIssue> {
    let mut issues = Vec::new();
    if !inputs.consent_given {
        issues.push(SubmissionIssue::MissingConsent);
    }
    if inputs.contact_email.trim().is_empty() {
        issues.push(SubmissionIssue::MissingEmail);
    }
    if inputs.contact_phone.trim().is_empty() {
        issues.push(SubmissionIssue::MissingPhone);
    }
    issues
}

pub fn can_submit(inputs: &SimulationInputs) -> bool {
    submission_issues(inputs).is_empty()
}

impl ContactRecord {
    pub fn from_simulation(inputs: &SimulationInputs, results: &SimulationResults) -> Self {
        Self {
            full_name: inputs.full_name.clone(),
            contact_email: inputs.contact_email.trim().to_string(),
            contact_phone: inputs.contact_phone.trim().to_string(),
            estimated_credit: results.estimated_credit,
            estimated_monthly_payment: results.estimated_monthly_payment,
        }
    }
}

/// Hand the contact record to `publisher` once the gate passes.
///
/// Inputs are never modified; a failed gate can be retried after editing fields.
pub fn submit<P>(
    inputs: &SimulationInputs,
    results: &SimulationResults,
    publisher: &P,
) -> Result<ContactRecord, SubmissionError>
where
    P: LeadPublisher + ?Sized,
{
    let issues = submission_issues(inputs);
    if !issues.is_empty() {
        return Err(SubmissionError::Incomplete(issues));
    }

    let record = ContactRecord::from_simulation(inputs, results);
    publisher.publish(record.clone())?;
    info!(
        estimated_credit = record.estimated_credit,
        "simulation lead submitted"
    );
    Ok(record)
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission incomplete: {}", join_issues(.0))]
    Incomplete(Vec<SubmissionIssue>),
    #[error(transparent)]
    Publisher(#[from] LeadError),
}

impl SubmissionError {
    pub fn issues(&self) -> &[SubmissionIssue] {
        match self {
            SubmissionError::Incomplete(issues) => issues,
            SubmissionError::Publisher(_) => &[],
        }
    }
}

fn join_issues(issues: &[SubmissionIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message())
        .collect::<Vec<_>>()
        .join("; ")
}
