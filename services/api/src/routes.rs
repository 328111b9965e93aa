use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use fieldsync::commissions::{
    review_placement, settle_visit, ActivityClaim, BoardProfile, ImageAnalysisConfig,
    ImageMetadata, PlacementReview, PlacementSubmission, RateCard, VisitSettlement,
};
use fieldsync::error::AppError;
use fieldsync::surveys::{
    survey_router, DedupeQuestionSource, SurveyDedupeEngine, SurveyDedupeStore,
};
use fieldsync::visits::{visit_router, ProximityStore, VisitIntegrityService};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct PlacementReviewRequest {
    pub(crate) board: BoardProfile,
    pub(crate) board_image: ImageMetadata,
    pub(crate) storefront_image: ImageMetadata,
    /// Overrides the default confidence gate when present.
    #[serde(default)]
    pub(crate) confidence_threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SettlementRequest {
    /// Tenant rate card; the standard card applies when omitted.
    #[serde(default)]
    pub(crate) rates: Option<RateCard>,
    pub(crate) activities: Vec<ActivityClaim>,
}

pub(crate) fn with_engine_routes<V, Q, S>(
    visits: Arc<VisitIntegrityService<V>>,
    surveys: Arc<SurveyDedupeEngine<Q, S>>,
) -> axum::Router
where
    V: ProximityStore + 'static,
    Q: DedupeQuestionSource + 'static,
    S: SurveyDedupeStore + 'static,
{
    visit_router(visits)
        .merge(survey_router(surveys))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/boards/placement-reviews",
            axum::routing::post(placement_review_endpoint),
        )
        .route(
            "/api/v1/visits/settlements",
            axum::routing::post(settlement_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn placement_review_endpoint(
    Json(payload): Json<PlacementReviewRequest>,
) -> Result<Json<PlacementReview>, AppError> {
    let PlacementReviewRequest {
        board,
        board_image,
        storefront_image,
        confidence_threshold,
    } = payload;

    let config = match confidence_threshold {
        Some(confidence_threshold) => ImageAnalysisConfig {
            confidence_threshold,
        },
        None => ImageAnalysisConfig::default(),
    };
    let submission = PlacementSubmission {
        board_image,
        storefront_image,
    };
    let review = review_placement(&board, &submission, &config)?;
    Ok(Json(review))
}

pub(crate) async fn settlement_endpoint(
    Json(payload): Json<SettlementRequest>,
) -> Json<VisitSettlement> {
    let SettlementRequest { rates, activities } = payload;
    let rates = rates.unwrap_or_default();
    Json(settle_visit(&rates, &activities))
}
