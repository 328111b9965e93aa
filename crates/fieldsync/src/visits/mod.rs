//! Visit intake integrity: geofence gate, multi-signal fraud scoring, and
//! the atomic visit registrar, composed over a shared per-tenant visit log.

pub mod domain;
pub(crate) mod fraud;
pub(crate) mod geofence;
pub(crate) mod registrar;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    AgentId, InvalidSubjectType, NewVisitEvent, SubjectId, SubjectType, TenantId, VisitEvent,
    VisitEventId, VisitSubmission,
};
pub use fraud::{
    BlockReason, FraudAssessment, FraudConfig, FraudDecision, FraudIndicator, FraudScorer,
};
pub use geofence::{GeofenceCheck, GeofenceError, GeofencePolicy};
pub use registrar::VisitRegistrar;
pub use router::{visit_router, LocationCheckRequest};
pub use service::{VisitIntegrityService, VisitOutcome, VisitResolution};
pub use store::{ProximityStore, VisitStoreError};
