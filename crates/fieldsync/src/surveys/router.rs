use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::SurveySubmission;
use super::engine::SurveyDedupeEngine;
use super::store::{DedupeQuestionSource, SurveyDedupeStore, SurveyStoreError};

/// Router builder exposing the duplicate check and submission endpoints.
pub fn survey_router<Q, S>(engine: Arc<SurveyDedupeEngine<Q, S>>) -> Router
where
    Q: DedupeQuestionSource + 'static,
    S: SurveyDedupeStore + 'static,
{
    Router::new()
        .route("/api/v1/surveys/checks", post(check_survey_handler::<Q, S>))
        .route(
            "/api/v1/surveys/submissions",
            post(submit_survey_handler::<Q, S>),
        )
        .with_state(engine)
}

pub(crate) async fn check_survey_handler<Q, S>(
    State(engine): State<Arc<SurveyDedupeEngine<Q, S>>>,
    axum::Json(submission): axum::Json<SurveySubmission>,
) -> Response
where
    Q: DedupeQuestionSource + 'static,
    S: SurveyDedupeStore + 'static,
{
    match engine.check_duplicate(&submission) {
        Ok(check) => (StatusCode::OK, axum::Json(check)).into_response(),
        Err(error) => store_error_response(error),
    }
}

pub(crate) async fn submit_survey_handler<Q, S>(
    State(engine): State<Arc<SurveyDedupeEngine<Q, S>>>,
    axum::Json(submission): axum::Json<SurveySubmission>,
) -> Response
where
    Q: DedupeQuestionSource + 'static,
    S: SurveyDedupeStore + 'static,
{
    match engine.submit(&submission) {
        Ok(outcome) => {
            let status = if outcome.is_duplicate() {
                StatusCode::CONFLICT
            } else {
                StatusCode::CREATED
            };
            (status, axum::Json(outcome)).into_response()
        }
        Err(error) => store_error_response(error),
    }
}

fn store_error_response(error: SurveyStoreError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
}
