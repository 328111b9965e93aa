use chrono::{DateTime, NaiveDate, Utc};

use super::domain::{AgentId, NewVisitEvent, SubjectId, SubjectType, TenantId, VisitEvent};

/// Storage abstraction over the per-tenant visit history log.
///
/// Reads feed the scorer; the insert carries the authoritative
/// one-visit-per-subject-per-day guarantee. Implementations enforce the
/// (tenant, agent, subject type, subject, visit date) key atomically inside
/// `insert_visit`, never by a prior read.
pub trait ProximityStore: Send + Sync {
    /// Visit committed by this agent for this subject on the given
    /// tenant-local calendar date, if one exists.
    fn find_visit(
        &self,
        tenant_id: &TenantId,
        agent_id: &AgentId,
        subject_type: SubjectType,
        subject_id: &SubjectId,
        on: NaiveDate,
    ) -> Result<Option<VisitEvent>, VisitStoreError>;

    /// Visits across the tenant for a subject kind recorded at or after
    /// `since`, optionally restricted to events carrying coordinates.
    fn visits_since(
        &self,
        tenant_id: &TenantId,
        subject_type: SubjectType,
        since: DateTime<Utc>,
        require_coords: bool,
    ) -> Result<Vec<VisitEvent>, VisitStoreError>;

    /// Number of visits by one agent for a subject kind at or after `since`.
    fn count_agent_visits_since(
        &self,
        tenant_id: &TenantId,
        agent_id: &AgentId,
        subject_type: SubjectType,
        since: DateTime<Utc>,
    ) -> Result<usize, VisitStoreError>;

    /// Append a visit fact, enforcing the per-day uniqueness key.
    fn insert_visit(&self, event: NewVisitEvent) -> Result<VisitEvent, VisitStoreError>;
}

/// Error enumeration for visit store failures.
#[derive(Debug, thiserror::Error)]
pub enum VisitStoreError {
    #[error("visit already registered for this subject and date")]
    DuplicateVisit,
    #[error("visit store unavailable: {0}")]
    Unavailable(String),
}
