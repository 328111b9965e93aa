use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// Identifier wrapper for tenants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(pub String);

/// Identifier wrapper for field agents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub String);

/// Identifier wrapper for visit subjects (customers or individuals).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub String);

/// Identifier wrapper for committed visit events, issued by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisitEventId(pub String);

/// Visit target kind: a registered customer or an ad-hoc individual contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectType {
    Customer,
    Individual,
}

impl SubjectType {
    pub const fn label(self) -> &'static str {
        match self {
            SubjectType::Customer => "customer",
            SubjectType::Individual => "individual",
        }
    }
}

/// Raised when boundary input names an unknown subject kind.
#[derive(Debug, thiserror::Error)]
#[error("invalid subject type: {value}")]
pub struct InvalidSubjectType {
    pub value: String,
}

impl FromStr for SubjectType {
    type Err = InvalidSubjectType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "customer" => Ok(SubjectType::Customer),
            "individual" => Ok(SubjectType::Individual),
            other => Err(InvalidSubjectType {
                value: other.to_string(),
            }),
        }
    }
}

/// Inbound visit claim as handed over by the route layer.
///
/// `recorded_at` carries the tenant-local UTC offset so calendar-date
/// derivation and window arithmetic never consult the wall clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitSubmission {
    pub tenant_id: TenantId,
    pub agent_id: AgentId,
    pub subject_type: SubjectType,
    pub subject_id: SubjectId,
    pub location: Option<GeoPoint>,
    pub gps_accuracy_meters: Option<f64>,
    pub recorded_at: DateTime<FixedOffset>,
}

impl VisitSubmission {
    /// Tenant-local calendar date of the claim.
    pub fn visit_date(&self) -> NaiveDate {
        self.recorded_at.date_naive()
    }

    /// The claim instant normalized to UTC for window comparisons.
    pub fn instant(&self) -> DateTime<Utc> {
        self.recorded_at.with_timezone(&Utc)
    }
}

/// Append-only visit fact; the fraud audit trail. Never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitEvent {
    pub event_id: VisitEventId,
    pub tenant_id: TenantId,
    pub agent_id: AgentId,
    pub subject_type: SubjectType,
    pub subject_id: SubjectId,
    pub visit_date: NaiveDate,
    pub visit_timestamp: DateTime<Utc>,
    pub location: Option<GeoPoint>,
    pub gps_accuracy_meters: Option<f64>,
}

/// Insert payload for a visit fact; the store issues the event id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVisitEvent {
    pub tenant_id: TenantId,
    pub agent_id: AgentId,
    pub subject_type: SubjectType,
    pub subject_id: SubjectId,
    pub visit_date: NaiveDate,
    pub visit_timestamp: DateTime<Utc>,
    pub location: Option<GeoPoint>,
    pub gps_accuracy_meters: Option<f64>,
}

impl NewVisitEvent {
    pub fn from_submission(submission: &VisitSubmission) -> Self {
        Self {
            tenant_id: submission.tenant_id.clone(),
            agent_id: submission.agent_id.clone(),
            subject_type: submission.subject_type,
            subject_id: submission.subject_id.clone(),
            visit_date: submission.visit_date(),
            visit_timestamp: submission.instant(),
            location: submission.location,
            gps_accuracy_meters: submission.gps_accuracy_meters,
        }
    }
}
