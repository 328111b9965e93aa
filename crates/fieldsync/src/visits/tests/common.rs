use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::geo::GeoPoint;
use crate::visits::domain::{
    AgentId, NewVisitEvent, SubjectId, SubjectType, TenantId, VisitEvent, VisitEventId,
    VisitSubmission,
};
use crate::visits::fraud::FraudConfig;
use crate::visits::geofence::GeofencePolicy;
use crate::visits::service::VisitIntegrityService;
use crate::visits::store::{ProximityStore, VisitStoreError};

pub(super) fn tenant() -> TenantId {
    TenantId("tenant-acacia".to_string())
}

pub(super) fn agent(code: &str) -> AgentId {
    AgentId(format!("agent-{code}"))
}

/// Timestamp on the shared test date (2026-03-05) in a +03:00 tenant zone.
pub(super) fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
    on_day(5, hour, minute)
}

pub(super) fn on_day(day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(3 * 3600)
        .expect("valid offset")
        .with_ymd_and_hms(2026, 3, day, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn submission(
    agent_code: &str,
    subject_type: SubjectType,
    subject_code: &str,
    location: Option<GeoPoint>,
    recorded_at: DateTime<FixedOffset>,
) -> VisitSubmission {
    VisitSubmission {
        tenant_id: tenant(),
        agent_id: agent(agent_code),
        subject_type,
        subject_id: SubjectId(format!("subject-{subject_code}")),
        location,
        gps_accuracy_meters: Some(8.0),
        recorded_at,
    }
}

pub(super) fn seed_visit(
    store: &MemoryVisitLog,
    agent_code: &str,
    subject_type: SubjectType,
    subject_code: &str,
    location: Option<GeoPoint>,
    recorded_at: DateTime<FixedOffset>,
) -> VisitEvent {
    store
        .insert_visit(NewVisitEvent::from_submission(&submission(
            agent_code,
            subject_type,
            subject_code,
            location,
            recorded_at,
        )))
        .expect("seed visit")
}

pub(super) fn build_service() -> (Arc<VisitIntegrityService<MemoryVisitLog>>, Arc<MemoryVisitLog>)
{
    let store = Arc::new(MemoryVisitLog::default());
    let service = Arc::new(VisitIntegrityService::new(
        store.clone(),
        GeofencePolicy::default(),
        FraudConfig::default(),
    ));
    (service, store)
}

/// In-memory visit log enforcing the per-day uniqueness key under one lock.
#[derive(Default)]
pub(super) struct MemoryVisitLog {
    events: Mutex<Vec<VisitEvent>>,
    sequence: AtomicU64,
}

impl MemoryVisitLog {
    pub(super) fn events(&self) -> Vec<VisitEvent> {
        self.events.lock().expect("visit log mutex poisoned").clone()
    }
}

impl ProximityStore for MemoryVisitLog {
    fn find_visit(
        &self,
        tenant_id: &TenantId,
        agent_id: &AgentId,
        subject_type: SubjectType,
        subject_id: &SubjectId,
        on: NaiveDate,
    ) -> Result<Option<VisitEvent>, VisitStoreError> {
        let guard = self.events.lock().expect("visit log mutex poisoned");
        Ok(guard
            .iter()
            .find(|event| {
                event.tenant_id == *tenant_id
                    && event.agent_id == *agent_id
                    && event.subject_type == subject_type
                    && event.subject_id == *subject_id
                    && event.visit_date == on
            })
            .cloned())
    }

    fn visits_since(
        &self,
        tenant_id: &TenantId,
        subject_type: SubjectType,
        since: DateTime<Utc>,
        require_coords: bool,
    ) -> Result<Vec<VisitEvent>, VisitStoreError> {
        let guard = self.events.lock().expect("visit log mutex poisoned");
        Ok(guard
            .iter()
            .filter(|event| {
                event.tenant_id == *tenant_id
                    && event.subject_type == subject_type
                    && event.visit_timestamp >= since
                    && (!require_coords || event.location.is_some())
            })
            .cloned()
            .collect())
    }

    fn count_agent_visits_since(
        &self,
        tenant_id: &TenantId,
        agent_id: &AgentId,
        subject_type: SubjectType,
        since: DateTime<Utc>,
    ) -> Result<usize, VisitStoreError> {
        let guard = self.events.lock().expect("visit log mutex poisoned");
        Ok(guard
            .iter()
            .filter(|event| {
                event.tenant_id == *tenant_id
                    && event.agent_id == *agent_id
                    && event.subject_type == subject_type
                    && event.visit_timestamp >= since
            })
            .count())
    }

    fn insert_visit(&self, event: NewVisitEvent) -> Result<VisitEvent, VisitStoreError> {
        let mut guard = self.events.lock().expect("visit log mutex poisoned");
        let collides = guard.iter().any(|existing| {
            existing.tenant_id == event.tenant_id
                && existing.agent_id == event.agent_id
                && existing.subject_type == event.subject_type
                && existing.subject_id == event.subject_id
                && existing.visit_date == event.visit_date
        });
        if collides {
            return Err(VisitStoreError::DuplicateVisit);
        }

        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let stored = VisitEvent {
            event_id: VisitEventId(format!("visit-{id:06}")),
            tenant_id: event.tenant_id,
            agent_id: event.agent_id,
            subject_type: event.subject_type,
            subject_id: event.subject_id,
            visit_date: event.visit_date,
            visit_timestamp: event.visit_timestamp,
            location: event.location,
            gps_accuracy_meters: event.gps_accuracy_meters,
        };
        guard.push(stored.clone());
        Ok(stored)
    }
}

pub(super) struct UnavailableVisitLog;

impl ProximityStore for UnavailableVisitLog {
    fn find_visit(
        &self,
        _tenant_id: &TenantId,
        _agent_id: &AgentId,
        _subject_type: SubjectType,
        _subject_id: &SubjectId,
        _on: NaiveDate,
    ) -> Result<Option<VisitEvent>, VisitStoreError> {
        Err(VisitStoreError::Unavailable("database offline".to_string()))
    }

    fn visits_since(
        &self,
        _tenant_id: &TenantId,
        _subject_type: SubjectType,
        _since: DateTime<Utc>,
        _require_coords: bool,
    ) -> Result<Vec<VisitEvent>, VisitStoreError> {
        Err(VisitStoreError::Unavailable("database offline".to_string()))
    }

    fn count_agent_visits_since(
        &self,
        _tenant_id: &TenantId,
        _agent_id: &AgentId,
        _subject_type: SubjectType,
        _since: DateTime<Utc>,
    ) -> Result<usize, VisitStoreError> {
        Err(VisitStoreError::Unavailable("database offline".to_string()))
    }

    fn insert_visit(&self, _event: NewVisitEvent) -> Result<VisitEvent, VisitStoreError> {
        Err(VisitStoreError::Unavailable("database offline".to_string()))
    }
}

/// Reads come back clean but every insert collides, mimicking a lost commit
/// race against a concurrent duplicate.
pub(super) struct DuplicateVisitLog;

impl ProximityStore for DuplicateVisitLog {
    fn find_visit(
        &self,
        _tenant_id: &TenantId,
        _agent_id: &AgentId,
        _subject_type: SubjectType,
        _subject_id: &SubjectId,
        _on: NaiveDate,
    ) -> Result<Option<VisitEvent>, VisitStoreError> {
        Ok(None)
    }

    fn visits_since(
        &self,
        _tenant_id: &TenantId,
        _subject_type: SubjectType,
        _since: DateTime<Utc>,
        _require_coords: bool,
    ) -> Result<Vec<VisitEvent>, VisitStoreError> {
        Ok(Vec::new())
    }

    fn count_agent_visits_since(
        &self,
        _tenant_id: &TenantId,
        _agent_id: &AgentId,
        _subject_type: SubjectType,
        _since: DateTime<Utc>,
    ) -> Result<usize, VisitStoreError> {
        Ok(0)
    }

    fn insert_visit(&self, _event: NewVisitEvent) -> Result<VisitEvent, VisitStoreError> {
        Err(VisitStoreError::DuplicateVisit)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
