use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::simulator::domain::{CreditType, LoanTerm, MaritalStatus, SimulationInputs};
use crate::simulator::repository::{
    ContactRecord, LeadError, LeadPublisher, SessionId, SessionStore, SessionStoreError,
};
use crate::simulator::session::SimulationSession;
use crate::simulator::{simulation_router, SimulationService};

/// Worker from the reference walkthrough: 25 years old, 15k salary, 5 years of service.
pub(super) fn worker_inputs() -> SimulationInputs {
    SimulationInputs {
        full_name: "Ana López".to_string(),
        age: 25,
        monthly_salary: 15_000.0,
        years_of_service: 5.0,
        credit_type: CreditType::Traditional,
        marital_status: MaritalStatus::Single,
        annual_savings_yield_percent: 5.0,
        desired_term_years: LoanTerm::Twenty,
        annual_interest_percent: 10.0,
        ..SimulationInputs::default()
    }
}

pub(super) fn contactable_inputs() -> SimulationInputs {
    SimulationInputs {
        contact_email: "ana@example.com".to_string(),
        contact_phone: "5512345678".to_string(),
        consent_given: true,
        ..worker_inputs()
    }
}

pub(super) fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual}, tolerance {tol}"
    );
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    sessions: Arc<Mutex<HashMap<SessionId, SimulationSession>>>,
}

impl SessionStore for MemoryStore {
    fn insert(&self, id: SessionId, session: SimulationSession) -> Result<(), SessionStoreError> {
        let mut guard = self.sessions.lock().expect("store mutex poisoned");
        if guard.contains_key(&id) {
            return Err(SessionStoreError::Conflict);
        }
        guard.insert(id, session);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SimulationSession>, SessionStoreError> {
        let guard = self.sessions.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn modify(
        &self,
        id: &SessionId,
        change: &mut dyn FnMut(&mut SimulationSession),
    ) -> Result<SimulationSession, SessionStoreError> {
        let mut guard = self.sessions.lock().expect("store mutex poisoned");
        let session = guard.get_mut(id).ok_or(SessionStoreError::NotFound)?;
        change(session);
        Ok(session.clone())
    }
}

pub(super) struct UnavailableStore;

impl SessionStore for UnavailableStore {
    fn insert(&self, _id: SessionId, _session: SimulationSession) -> Result<(), SessionStoreError> {
        Err(SessionStoreError::Unavailable("maintenance".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<SimulationSession>, SessionStoreError> {
        Err(SessionStoreError::Unavailable("maintenance".to_string()))
    }

    fn modify(
        &self,
        _id: &SessionId,
        _change: &mut dyn FnMut(&mut SimulationSession),
    ) -> Result<SimulationSession, SessionStoreError> {
        Err(SessionStoreError::Unavailable("maintenance".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryLeads {
    records: Arc<Mutex<Vec<ContactRecord>>>,
}

impl LeadPublisher for MemoryLeads {
    fn publish(&self, record: ContactRecord) -> Result<(), LeadError> {
        self.records.lock().expect("lead mutex poisoned").push(record);
        Ok(())
    }
}

impl MemoryLeads {
    pub(super) fn records(&self) -> Vec<ContactRecord> {
        self.records.lock().expect("lead mutex poisoned").clone()
    }
}

pub(super) struct OfflineLeads;

impl LeadPublisher for OfflineLeads {
    fn publish(&self, _record: ContactRecord) -> Result<(), LeadError> {
        Err(LeadError::Transport("crm offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    Arc<SimulationService<MemoryStore, MemoryLeads>>,
    Arc<MemoryStore>,
    Arc<MemoryLeads>,
) {
    let store = Arc::new(MemoryStore::default());
    let leads = Arc::new(MemoryLeads::default());
    let service = Arc::new(SimulationService::new(store.clone(), leads.clone()));
    (service, store, leads)
}

pub(super) fn router_with_service(
    service: Arc<SimulationService<MemoryStore, MemoryLeads>>,
) -> axum::Router {
    simulation_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
