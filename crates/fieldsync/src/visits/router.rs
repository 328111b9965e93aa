use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::VisitSubmission;
use super::geofence::GeofenceError;
use super::service::{VisitIntegrityService, VisitResolution};
use super::store::{ProximityStore, VisitStoreError};
use crate::geo::GeoPoint;

/// Router builder exposing the location gate and visit submission endpoints.
pub fn visit_router<S>(service: Arc<VisitIntegrityService<S>>) -> Router
where
    S: ProximityStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/visits/location-checks",
            post(location_check_handler::<S>),
        )
        .route("/api/v1/visits", post(submit_visit_handler::<S>))
        .with_state(service)
}

/// Payload for the advisory location gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCheckRequest {
    pub subject_location: Option<GeoPoint>,
    pub agent_location: GeoPoint,
}

pub(crate) async fn location_check_handler<S>(
    State(service): State<Arc<VisitIntegrityService<S>>>,
    axum::Json(request): axum::Json<LocationCheckRequest>,
) -> Response
where
    S: ProximityStore + 'static,
{
    match service.validate_location(request.subject_location, request.agent_location) {
        Ok(check) => (StatusCode::OK, axum::Json(check)).into_response(),
        Err(error @ GeofenceError::SubjectLocationMissing) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn submit_visit_handler<S>(
    State(service): State<Arc<VisitIntegrityService<S>>>,
    axum::Json(submission): axum::Json<VisitSubmission>,
) -> Response
where
    S: ProximityStore + 'static,
{
    match service.submit(&submission) {
        Ok(outcome) => {
            let status = match outcome.resolution {
                VisitResolution::Registered { .. } => StatusCode::CREATED,
                VisitResolution::Rejected { .. } => StatusCode::CONFLICT,
            };
            (status, axum::Json(outcome)).into_response()
        }
        Err(VisitStoreError::Unavailable(message)) => {
            let payload = json!({
                "error": format!("visit store unavailable: {message}"),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
