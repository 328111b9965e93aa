use serde::{Deserialize, Serialize};

use crate::geo::{distance_meters, GeoPoint};

const DEFAULT_RADIUS_METERS: f64 = 10.0;

/// Validation error raised before any distance math can run.
#[derive(Debug, thiserror::Error)]
pub enum GeofenceError {
    #[error("subject has no registered location")]
    SubjectLocationMissing,
}

/// Fixed-radius gate around a subject's registered coordinate.
///
/// The radius is a deployment constant, never a per-call parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofencePolicy {
    pub radius_meters: f64,
}

impl Default for GeofencePolicy {
    fn default() -> Self {
        Self {
            radius_meters: DEFAULT_RADIUS_METERS,
        }
    }
}

/// Advisory result of a location check; the caller gates visit creation on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofenceCheck {
    pub within_range: bool,
    pub distance_meters: f64,
    pub message: String,
}

impl GeofencePolicy {
    pub fn new(radius_meters: f64) -> Self {
        Self { radius_meters }
    }

    /// Check the agent's live coordinate against the subject's registered one.
    ///
    /// A distance exactly equal to the radius counts as inside the fence. The
    /// reported distance is rounded to 0.1 m; the comparison is not. Performs
    /// no writes.
    pub fn check(
        &self,
        subject: Option<GeoPoint>,
        agent: GeoPoint,
    ) -> Result<GeofenceCheck, GeofenceError> {
        let subject = subject.ok_or(GeofenceError::SubjectLocationMissing)?;

        let distance = distance_meters(agent, subject);
        let within_range = distance <= self.radius_meters;
        let rounded = (distance * 10.0).round() / 10.0;

        let message = if within_range {
            "Agent is within acceptable range of the subject location".to_string()
        } else {
            format!(
                "Agent is {rounded}m away from the subject location. Required: within {}m",
                self.radius_meters
            )
        };

        Ok(GeofenceCheck {
            within_range,
            distance_meters: rounded,
            message,
        })
    }
}
