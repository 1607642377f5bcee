use chrono::{DateTime, Duration, Utc};
use infonavit_sim::simulator::{
    ContactRecord, LeadError, LeadPublisher, PropertyType, SessionId, SessionStore,
    SessionStoreError, SimulationSession,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

pub(crate) const DEFAULT_SESSION_CAPACITY: usize = 10_000;
pub(crate) const DEFAULT_SESSION_IDLE_MINUTES: u32 = 30;
pub(crate) const MAX_RETAINED_LEADS: usize = 1_000;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

struct StoredSession {
    session: SimulationSession,
    last_touched: DateTime<Utc>,
}

/// Session map with a hard capacity; idle sessions are evicted when room is needed.
#[derive(Clone)]
pub(crate) struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, StoredSession>>>,
    capacity: usize,
    idle_ttl: Duration,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_limits(
            DEFAULT_SESSION_CAPACITY,
            Duration::minutes(i64::from(DEFAULT_SESSION_IDLE_MINUTES)),
        )
    }
}

impl InMemorySessionStore {
    pub(crate) fn with_limits(capacity: usize, idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            capacity,
            idle_ttl,
        }
    }

    fn is_expired(&self, entry: &StoredSession, now: DateTime<Utc>) -> bool {
        now - entry.last_touched >= self.idle_ttl
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, id: SessionId, session: SimulationSession) -> Result<(), SessionStoreError> {
        let now = Utc::now();
        let mut guard = self.sessions.lock().expect("session store mutex poisoned");
        if guard.contains_key(&id) {
            return Err(SessionStoreError::Conflict);
        }
        if guard.len() >= self.capacity {
            let before = guard.len();
            guard.retain(|_, entry| !self.is_expired(entry, now));
            debug!(evicted = before - guard.len(), "idle simulator sessions evicted");
        }
        if guard.len() >= self.capacity {
            return Err(SessionStoreError::Full {
                capacity: self.capacity,
            });
        }
        guard.insert(
            id,
            StoredSession {
                session,
                last_touched: now,
            },
        );
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SimulationSession>, SessionStoreError> {
        let now = Utc::now();
        let mut guard = self.sessions.lock().expect("session store mutex poisoned");
        let expired = match guard.get(id) {
            Some(entry) => self.is_expired(entry, now),
            None => return Ok(None),
        };
        if expired {
            guard.remove(id);
            return Ok(None);
        }

        Ok(guard.get_mut(id).map(|entry| {
            entry.last_touched = now;
            entry.session.clone()
        }))
    }

    fn modify(
        &self,
        id: &SessionId,
        change: &mut dyn FnMut(&mut SimulationSession),
    ) -> Result<SimulationSession, SessionStoreError> {
        let now = Utc::now();
        let mut guard = self.sessions.lock().expect("session store mutex poisoned");
        let expired = match guard.get(id) {
            Some(entry) => self.is_expired(entry, now),
            None => return Err(SessionStoreError::NotFound),
        };
        if expired {
            guard.remove(id);
            return Err(SessionStoreError::NotFound);
        }

        let entry = guard.get_mut(id).ok_or(SessionStoreError::NotFound)?;
        change(&mut entry.session);
        entry.last_touched = now;
        Ok(entry.session.clone())
    }
}

/// Lead received from the simulator, stamped on arrival.
#[derive(Debug, Clone)]
pub(crate) struct ReceivedLead {
    pub(crate) record: ContactRecord,
    pub(crate) received_at: DateTime<Utc>,
}

/// Stand-in for the CRM: logs each lead and keeps the most recent ones in memory.
#[derive(Clone)]
pub(crate) struct InMemoryLeadSink {
    leads: Arc<Mutex<VecDeque<ReceivedLead>>>,
    retain: usize,
}

impl Default for InMemoryLeadSink {
    fn default() -> Self {
        Self::with_retention(MAX_RETAINED_LEADS)
    }
}

impl LeadPublisher for InMemoryLeadSink {
    fn publish(&self, record: ContactRecord) -> Result<(), LeadError> {
        let received_at = Utc::now();
        info!(
            email = %record.contact_email,
            estimated_credit = record.estimated_credit,
            %received_at,
            "simulator lead received"
        );
        let mut guard = self.leads.lock().expect("lead sink mutex poisoned");
        while guard.len() >= self.retain {
            guard.pop_front();
        }
        guard.push_back(ReceivedLead {
            record,
            received_at,
        });
        Ok(())
    }
}

impl InMemoryLeadSink {
    pub(crate) fn with_retention(retain: usize) -> Self {
        Self {
            leads: Arc::default(),
            retain: retain.max(1),
        }
    }

    pub(crate) fn leads(&self) -> Vec<ReceivedLead> {
        self.leads
            .lock()
            .expect("lead sink mutex poisoned")
            .iter()
            .cloned()
            .collect()
    }
}

pub(crate) fn parse_property_type(raw: &str) -> Result<PropertyType, String> {
    PropertyType::parse(raw).ok_or_else(|| {
        format!("unknown property type '{raw}' (expected house, apartment, land or commercial)")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_type_parser_reports_bad_values() {
        assert_eq!(parse_property_type("casa"), Ok(PropertyType::House));
        assert!(parse_property_type("castle")
            .unwrap_err()
            .contains("castle"));
    }

    fn ana_lead(email: &str) -> ContactRecord {
        ContactRecord {
            full_name: "Ana López".to_string(),
            contact_email: email.to_string(),
            contact_phone: "5512345678".to_string(),
            estimated_credit: 507_432.67,
            estimated_monthly_payment: 4_896.0,
        }
    }

    #[test]
    fn store_refuses_sessions_past_capacity() {
        let store = InMemorySessionStore::with_limits(1, Duration::minutes(30));
        store
            .insert(SessionId("a".to_string()), SimulationSession::new())
            .expect("first insert");

        let err = store
            .insert(SessionId("b".to_string()), SimulationSession::new())
            .unwrap_err();
        assert!(matches!(err, SessionStoreError::Full { capacity: 1 }));
    }

    #[test]
    fn idle_sessions_make_room_for_new_ones() {
        let store = InMemorySessionStore::with_limits(1, Duration::zero());
        store
            .insert(SessionId("a".to_string()), SimulationSession::new())
            .expect("first insert");

        store
            .insert(SessionId("b".to_string()), SimulationSession::new())
            .expect("idle session evicted");

        assert!(store
            .fetch(&SessionId("a".to_string()))
            .expect("store reachable")
            .is_none());
    }

    #[test]
    fn modify_requires_existing_session() {
        let store = InMemorySessionStore::default();
        let err = store
            .modify(&SessionId("missing".to_string()), &mut |session| {
                session.advance();
            })
            .unwrap_err();
        assert!(matches!(err, SessionStoreError::NotFound));
    }

    #[test]
    fn modify_applies_change_and_returns_updated_copy() {
        let store = InMemorySessionStore::default();
        let id = SessionId("a".to_string());
        store
            .insert(id.clone(), SimulationSession::new())
            .expect("insert");

        let updated = store
            .modify(&id, &mut |session| {
                session.advance();
            })
            .expect("modify");

        let stored = store.fetch(&id).expect("fetch").expect("present");
        assert_eq!(updated.current_step(), stored.current_step());
        assert_eq!(stored.current_step().index(), 2);
    }

    #[test]
    fn lead_sink_stamps_each_record() {
        let sink = InMemoryLeadSink::default();
        let before = Utc::now();
        sink.publish(ana_lead("ana@example.com"))
            .expect("publish succeeds");

        let leads = sink.leads();
        assert_eq!(leads.len(), 1);
        assert!(leads[0].received_at >= before);
        assert_eq!(leads[0].record.full_name, "Ana López");
    }

    #[test]
    fn lead_sink_keeps_only_the_newest_records() {
        let sink = InMemoryLeadSink::with_retention(2);
        for email in ["a@example.com", "b@example.com", "c@example.com"] {
            sink.publish(ana_lead(email)).expect("publish succeeds");
        }

        let emails: Vec<String> = sink
            .leads()
            .into_iter()
            .map(|lead| lead.record.contact_email)
            .collect();
        assert_eq!(emails, vec!["b@example.com", "c@example.com"]);
    }
}
