use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{VisitEvent, VisitSubmission};
use super::fraud::{BlockReason, FraudAssessment, FraudConfig, FraudDecision, FraudScorer};
use super::geofence::{GeofenceCheck, GeofenceError, GeofencePolicy};
use super::registrar::VisitRegistrar;
use super::store::{ProximityStore, VisitStoreError};
use crate::geo::GeoPoint;

/// Service composing the geofence gate, fraud scorer, and registrar over one
/// shared visit store.
pub struct VisitIntegrityService<S> {
    geofence: GeofencePolicy,
    scorer: FraudScorer<S>,
    registrar: VisitRegistrar<S>,
}

/// What the engine decided about a claim, plus what became of it.
///
/// The assessment is response payload only; it is never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitOutcome {
    pub assessment: FraudAssessment,
    pub resolution: VisitResolution,
}

/// Terminal state of a submitted claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VisitResolution {
    Registered {
        event: VisitEvent,
        flagged_for_review: bool,
    },
    Rejected {
        reason: BlockReason,
    },
}

impl VisitOutcome {
    pub fn is_registered(&self) -> bool {
        matches!(self.resolution, VisitResolution::Registered { .. })
    }
}

impl<S> VisitIntegrityService<S>
where
    S: ProximityStore,
{
    pub fn new(store: Arc<S>, geofence: GeofencePolicy, config: FraudConfig) -> Self {
        Self {
            geofence,
            scorer: FraudScorer::new(store.clone(), config),
            registrar: VisitRegistrar::new(store),
        }
    }

    /// Advisory location gate; performs no writes.
    pub fn validate_location(
        &self,
        subject: Option<GeoPoint>,
        agent: GeoPoint,
    ) -> Result<GeofenceCheck, GeofenceError> {
        self.geofence.check(subject, agent)
    }

    /// Score the claim and, unless blocked, commit it to the visit log.
    ///
    /// A reviewed claim is committed with the review flag set. A commit that
    /// loses the uniqueness race is reported as rejected with the same
    /// standing as a scored same-day block.
    pub fn submit(&self, submission: &VisitSubmission) -> Result<VisitOutcome, VisitStoreError> {
        let assessment = self.scorer.assess(submission)?;

        if let FraudDecision::Block { reason } = assessment.decision {
            warn!(
                tenant_id = %submission.tenant_id.0,
                agent_id = %submission.agent_id.0,
                subject_id = %submission.subject_id.0,
                fraud_score = assessment.fraud_score,
                reason = reason.code(),
                "visit blocked"
            );
            return Ok(VisitOutcome {
                assessment,
                resolution: VisitResolution::Rejected { reason },
            });
        }

        match self.registrar.commit(submission) {
            Ok(event) => {
                let flagged_for_review = assessment.requires_review();
                info!(
                    tenant_id = %submission.tenant_id.0,
                    agent_id = %submission.agent_id.0,
                    event_id = %event.event_id.0,
                    fraud_score = assessment.fraud_score,
                    flagged_for_review,
                    "visit registered"
                );
                Ok(VisitOutcome {
                    assessment,
                    resolution: VisitResolution::Registered {
                        event,
                        flagged_for_review,
                    },
                })
            }
            Err(VisitStoreError::DuplicateVisit) => {
                warn!(
                    tenant_id = %submission.tenant_id.0,
                    agent_id = %submission.agent_id.0,
                    subject_id = %submission.subject_id.0,
                    "visit lost the commit race to a concurrent duplicate"
                );
                Ok(VisitOutcome {
                    assessment,
                    resolution: VisitResolution::Rejected {
                        reason: BlockReason::DuplicateVisitSameDay,
                    },
                })
            }
            Err(error) => Err(error),
        }
    }
}
