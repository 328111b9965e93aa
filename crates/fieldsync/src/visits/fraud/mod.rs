mod config;
mod indicators;

pub use config::FraudConfig;
pub use indicators::{BlockReason, FraudDecision, FraudIndicator};

use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::domain::{SubjectType, VisitSubmission};
use super::store::{ProximityStore, VisitStoreError};
use crate::geo::distance_meters;

/// Multi-signal scorer over recent visit history.
///
/// Reads only; never writes. The same-day check here is advisory; the
/// registrar's atomic insert is what actually prevents double commits.
pub struct FraudScorer<S> {
    store: Arc<S>,
    config: FraudConfig,
}

/// Composite score, evidence trail, and gate decision for one claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudAssessment {
    pub fraud_score: f64,
    pub indicators: Vec<FraudIndicator>,
    pub decision: FraudDecision,
}

impl FraudAssessment {
    pub fn is_blocked(&self) -> bool {
        self.decision.is_block()
    }

    pub fn requires_review(&self) -> bool {
        matches!(self.decision, FraudDecision::Review)
    }
}

impl<S> FraudScorer<S>
where
    S: ProximityStore,
{
    pub fn new(store: Arc<S>, config: FraudConfig) -> Self {
        Self { store, config }
    }

    /// Assess one claim against the tenant's recent history.
    ///
    /// Indicators accumulate independently and the score is clamped to
    /// [0, 1]; only a same-day duplicate short-circuits. Missing data
    /// (no coordinates, no accuracy) contributes nothing and is never an
    /// error. All windows are relative to the submission's own timestamp.
    pub fn assess(&self, submission: &VisitSubmission) -> Result<FraudAssessment, VisitStoreError> {
        if let Some(existing) = self.store.find_visit(
            &submission.tenant_id,
            &submission.agent_id,
            submission.subject_type,
            &submission.subject_id,
            submission.visit_date(),
        )? {
            let indicator = FraudIndicator::DuplicateVisitSameDay {
                matched_event_id: existing.event_id,
            };
            let fraud_score = indicator.weight();
            return Ok(FraudAssessment {
                fraud_score,
                indicators: vec![indicator],
                decision: FraudDecision::Block {
                    reason: BlockReason::DuplicateVisitSameDay,
                },
            });
        }

        let mut indicators = Vec::new();
        let mut fraud_score = 0.0_f64;
        let instant = submission.instant();

        if submission.subject_type == SubjectType::Individual {
            if let Some(location) = submission.location {
                let since = instant - Duration::minutes(self.config.proximity_window_minutes);
                let recent = self.store.visits_since(
                    &submission.tenant_id,
                    SubjectType::Individual,
                    since,
                    true,
                )?;

                for event in recent {
                    if let Some(event_location) = event.location {
                        let distance = distance_meters(location, event_location);
                        if distance <= self.config.proximity_radius_meters {
                            let minutes_apart = (instant - event.visit_timestamp).num_minutes();
                            let indicator = FraudIndicator::GpsProximityDuplicate {
                                matched_event_id: event.event_id,
                                distance_meters: (distance * 10.0).round() / 10.0,
                                minutes_apart,
                            };
                            fraud_score += indicator.weight();
                            indicators.push(indicator);
                        }
                    }
                }
            }
        }

        if let Some(accuracy) = submission.gps_accuracy_meters {
            if accuracy > self.config.max_gps_accuracy_meters {
                let indicator = FraudIndicator::LowGpsAccuracy {
                    accuracy_meters: accuracy,
                };
                fraud_score += indicator.weight();
                indicators.push(indicator);
            }
        }

        if submission.subject_type == SubjectType::Individual {
            let since = instant - Duration::minutes(self.config.rapid_succession_window_minutes);
            let recent_visits = self.store.count_agent_visits_since(
                &submission.tenant_id,
                &submission.agent_id,
                SubjectType::Individual,
                since,
            )?;
            if recent_visits > 0 {
                let indicator = FraudIndicator::RapidSuccessionVisits { recent_visits };
                fraud_score += indicator.weight();
                indicators.push(indicator);
            }
        }

        let fraud_score = fraud_score.clamp(0.0, 1.0);
        let decision = if fraud_score >= self.config.block_threshold {
            FraudDecision::Block {
                reason: BlockReason::FraudDetected,
            }
        } else if fraud_score >= self.config.review_threshold {
            FraudDecision::Review
        } else {
            FraudDecision::Allow
        };

        Ok(FraudAssessment {
            fraud_score,
            indicators,
            decision,
        })
    }
}
