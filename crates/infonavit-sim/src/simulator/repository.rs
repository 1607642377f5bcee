use serde::{Deserialize, Serialize};

use super::session::SimulationSession;

/// Identifier wrapper for live simulation sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Storage abstraction so the service module can be exercised in isolation.
pub trait SessionStore: Send + Sync {
    fn insert(&self, id: SessionId, session: SimulationSession) -> Result<(), SessionStoreError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SimulationSession>, SessionStoreError>;
    /// Apply `change` to the stored session atomically and return the updated copy.
    ///
    /// Implementations must hold whatever guards the session for the whole
    /// read-change-write cycle so concurrent edits to one session never drop each other.
    fn modify(
        &self,
        id: &SessionId,
        change: &mut dyn FnMut(&mut SimulationSession),
    ) -> Result<SimulationSession, SessionStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store full ({capacity} sessions)")]
    Full { capacity: usize },
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Structured lead emitted after a successful submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub full_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub estimated_credit: f64,
    pub estimated_monthly_payment: f64,
}

/// Outbound hook for CRM or notification adapters.
pub trait LeadPublisher: Send + Sync {
    fn publish(&self, record: ContactRecord) -> Result<(), LeadError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LeadError {
    #[error("lead transport unavailable: {0}")]
    Transport(String),
}
