use serde::{Deserialize, Serialize};

use super::super::domain::VisitEventId;

/// Evidence-bearing signal contributing to the fraud score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FraudIndicator {
    /// The same agent already visited this subject on this calendar date.
    DuplicateVisitSameDay { matched_event_id: VisitEventId },
    /// Another individual visit in the tenant was recorded within meters of
    /// this claim inside the proximity window.
    GpsProximityDuplicate {
        matched_event_id: VisitEventId,
        distance_meters: f64,
        minutes_apart: i64,
    },
    /// The device reported a GPS accuracy too coarse to trust.
    LowGpsAccuracy { accuracy_meters: f64 },
    /// The agent logged other individual visits moments before this one.
    RapidSuccessionVisits { recent_visits: usize },
}

impl FraudIndicator {
    /// Fixed contribution the signal adds to the score.
    pub const fn weight(&self) -> f64 {
        match self {
            FraudIndicator::DuplicateVisitSameDay { .. } => 0.9,
            FraudIndicator::GpsProximityDuplicate { .. } => 0.7,
            FraudIndicator::LowGpsAccuracy { .. } => 0.3,
            FraudIndicator::RapidSuccessionVisits { .. } => 0.5,
        }
    }

    /// Stable machine code reported alongside the evidence.
    pub const fn code(&self) -> &'static str {
        match self {
            FraudIndicator::DuplicateVisitSameDay { .. } => "DUPLICATE_VISIT_SAME_DAY",
            FraudIndicator::GpsProximityDuplicate { .. } => "GPS_PROXIMITY_DUPLICATE",
            FraudIndicator::LowGpsAccuracy { .. } => "LOW_GPS_ACCURACY",
            FraudIndicator::RapidSuccessionVisits { .. } => "RAPID_SUCCESSION_VISITS",
        }
    }
}

/// Why a claim was refused outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockReason {
    DuplicateVisitSameDay,
    FraudDetected,
}

impl BlockReason {
    pub const fn code(self) -> &'static str {
        match self {
            BlockReason::DuplicateVisitSameDay => "DUPLICATE_VISIT_SAME_DAY",
            BlockReason::FraudDetected => "FRAUD_DETECTED",
        }
    }
}

/// Gate decision derived from the accumulated score.
///
/// `Review` is not a refusal: a reviewed claim is still committed, carrying
/// the flag for a human to look at later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FraudDecision {
    Block { reason: BlockReason },
    Review,
    Allow,
}

impl FraudDecision {
    pub const fn is_block(self) -> bool {
        matches!(self, FraudDecision::Block { .. })
    }

    pub fn summary(&self) -> String {
        match self {
            FraudDecision::Block { reason } => {
                format!("blocked ({})", reason.code())
            }
            FraudDecision::Review => "allowed, flagged for review".to_string(),
            FraudDecision::Allow => "allowed".to_string(),
        }
    }
}
