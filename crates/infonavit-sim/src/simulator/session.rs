use super::calculator::calculate;
use super::credit_factor::{credit_factor_breakdown, CreditFactorBreakdown};
use super::domain::{SimulationInputs, SimulationResults, WizardStep};
use super::fields::{FieldError, FieldUpdate};
use super::formulas::{total_interest, total_paid};
use super::submission::can_submit;
use serde::Serialize;
use tracing::debug;

/// Wizard state: the raw inputs, the step being shown, and results that always
/// match the inputs.
#[derive(Debug, Clone)]
pub struct SimulationSession {
    inputs: SimulationInputs,
    step: WizardStep,
    results: SimulationResults,
}

impl Default for SimulationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationSession {
    pub fn new() -> Self {
        Self::with_inputs(SimulationInputs::default())
    }

    /// Start at the first step with a pre-filled snapshot.
    pub fn with_inputs(inputs: SimulationInputs) -> Self {
        let results = calculate(&inputs);
        Self {
            inputs,
            step: WizardStep::default(),
            results,
        }
    }

    pub fn inputs(&self) -> &SimulationInputs {
        &self.inputs
    }

    pub fn results(&self) -> &SimulationResults {
        &self.results
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    /// Move forward one step; stays put on the contact step.
    pub fn advance(&mut self) -> WizardStep {
        if let Some(next) = self.step.next() {
            debug!(from = ?self.step, to = ?next, "simulation step advanced");
            self.step = next;
        }
        self.step
    }

    /// Move back one step; stays put on the first step.
    pub fn retreat(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            debug!(from = ?self.step, to = ?previous, "simulation step retreated");
            self.step = previous;
        }
        self.step
    }

    /// Apply one field mutation and recompute results before returning.
    pub fn set_field(&mut self, update: FieldUpdate) -> &SimulationResults {
        let field = update.field();
        update.apply(&mut self.inputs);
        self.results = calculate(&self.inputs);
        debug!(
            field = field.name(),
            credit_factor = self.results.credit_factor,
            estimated_credit = self.results.estimated_credit,
            "simulation recomputed"
        );
        &self.results
    }

    /// Text-boundary variant of [`Self::set_field`]. A rejected value leaves the
    /// session untouched.
    pub fn set_named_field(
        &mut self,
        name: &str,
        raw: &str,
    ) -> Result<&SimulationResults, FieldError> {
        let update = FieldUpdate::parse_named(name, raw)?;
        Ok(self.set_field(update))
    }

    pub fn credit_factor_breakdown(&self) -> CreditFactorBreakdown {
        credit_factor_breakdown(
            self.inputs.age,
            self.inputs.credit_type,
            self.inputs.marital_status,
        )
    }

    pub fn snapshot(&self) -> SessionView {
        let term_years = self.inputs.desired_term_years.years();
        SessionView {
            step: self.step,
            step_index: self.step.index(),
            step_label: self.step.label(),
            inputs: self.inputs.clone(),
            results: self.results,
            total_paid: total_paid(self.results.estimated_monthly_payment, term_years),
            total_interest: total_interest(
                self.results.estimated_credit,
                self.results.estimated_monthly_payment,
                term_years,
            ),
            can_submit: can_submit(&self.inputs),
        }
    }
}

/// Serializable picture of a session for API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub step: WizardStep,
    pub step_index: u8,
    pub step_label: &'static str,
    pub inputs: SimulationInputs,
    pub results: SimulationResults,
    pub total_paid: f64,
    pub total_interest: f64,
    pub can_submit: bool,
}
