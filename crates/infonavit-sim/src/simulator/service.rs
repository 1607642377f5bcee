use std::sync::Arc;

use uuid::Uuid;

use super::calculator::calculate;
use super::domain::{PropertyType, SimulationInputs, SimulationResults};
use super::fields::{FieldError, FieldUpdate};
use super::repository::{ContactRecord, LeadPublisher, SessionId, SessionStore, SessionStoreError};
use super::search::{to_search_query, SearchQuery};
use super::session::{SessionView, SimulationSession};
use super::submission::{submit, SubmissionError};

/// Service composing the session store, the lead publisher, and the search bridge.
pub struct SimulationService<S, L> {
    store: Arc<S>,
    leads: Arc<L>,
    default_property_type: PropertyType,
}

/// Random v4 id; session ids must not be enumerable.
fn next_session_id() -> SessionId {
    SessionId(format!("sim-{}", Uuid::new_v4().simple()))
}

impl<S, L> SimulationService<S, L>
where
    S: SessionStore + 'static,
    L: LeadPublisher + 'static,
{
    pub fn new(store: Arc<S>, leads: Arc<L>) -> Self {
        Self::with_property_type(store, leads, PropertyType::default())
    }

    pub fn with_property_type(
        store: Arc<S>,
        leads: Arc<L>,
        default_property_type: PropertyType,
    ) -> Self {
        Self {
            store,
            leads,
            default_property_type,
        }
    }

    /// Stateless calculation for callers that do not need the wizard.
    pub fn calculate(&self, inputs: &SimulationInputs) -> SimulationResults {
        calculate(inputs)
    }

    /// Open a new session on the first step.
    pub fn create(
        &self,
        inputs: Option<SimulationInputs>,
    ) -> Result<(SessionId, SessionView), SimulationServiceError> {
        let session = inputs
            .map(SimulationSession::with_inputs)
            .unwrap_or_default();
        let id = next_session_id();
        let view = session.snapshot();
        self.store.insert(id.clone(), session)?;
        Ok((id, view))
    }

    pub fn get(&self, id: &SessionId) -> Result<SessionView, SimulationServiceError> {
        Ok(self.load(id)?.snapshot())
    }

    /// Parse and apply one field; the stored session is left untouched on rejection.
    pub fn set_field(
        &self,
        id: &SessionId,
        name: &str,
        raw: &str,
    ) -> Result<SessionView, SimulationServiceError> {
        let update = FieldUpdate::parse_named(name, raw)?;
        self.mutate(id, |session| {
            session.set_field(update.clone());
        })
    }

    pub fn advance(&self, id: &SessionId) -> Result<SessionView, SimulationServiceError> {
        self.mutate(id, |session| {
            session.advance();
        })
    }

    pub fn retreat(&self, id: &SessionId) -> Result<SessionView, SimulationServiceError> {
        self.mutate(id, |session| {
            session.retreat();
        })
    }

    pub fn search(
        &self,
        id: &SessionId,
        property_type: Option<PropertyType>,
    ) -> Result<SearchQuery, SimulationServiceError> {
        let session = self.load(id)?;
        Ok(to_search_query(
            session.results(),
            Some(property_type.unwrap_or(self.default_property_type)),
        ))
    }

    pub fn submit(&self, id: &SessionId) -> Result<ContactRecord, SimulationServiceError> {
        let session = self.load(id)?;
        let record = submit(session.inputs(), session.results(), self.leads.as_ref())?;
        Ok(record)
    }

    fn load(&self, id: &SessionId) -> Result<SimulationSession, SimulationServiceError> {
        let session = self.store.fetch(id)?.ok_or(SessionStoreError::NotFound)?;
        Ok(session)
    }

    fn mutate<F>(&self, id: &SessionId, mut change: F) -> Result<SessionView, SimulationServiceError>
    where
        F: FnMut(&mut SimulationSession),
    {
        let session = self.store.modify(id, &mut change)?;
        Ok(session.snapshot())
    }
}

/// Error raised by the simulation service.
#[derive(Debug, thiserror::Error)]
pub enum SimulationServiceError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Store(#[from] SessionStoreError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}
