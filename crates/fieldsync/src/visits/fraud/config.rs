use serde::{Deserialize, Serialize};

/// Window and threshold configuration backing the fraud heuristics.
///
/// Indicator weights are fixed on the indicators themselves; only the
/// windows and cut lines are dials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudConfig {
    /// Two individual visits closer than this are treated as one location.
    pub proximity_radius_meters: f64,
    /// Lookback for the cross-subject proximity sweep.
    pub proximity_window_minutes: i64,
    /// Reported GPS accuracy above this is considered unreliable.
    pub max_gps_accuracy_meters: f64,
    /// Lookback for the rapid-succession count.
    pub rapid_succession_window_minutes: i64,
    /// Score at or above which a claim is blocked outright.
    pub block_threshold: f64,
    /// Score at or above which a committed claim is flagged for review.
    pub review_threshold: f64,
}

impl Default for FraudConfig {
    fn default() -> Self {
        Self {
            proximity_radius_meters: 20.0,
            proximity_window_minutes: 60,
            max_gps_accuracy_meters: 20.0,
            rapid_succession_window_minutes: 5,
            block_threshold: 0.7,
            review_threshold: 0.5,
        }
    }
}
