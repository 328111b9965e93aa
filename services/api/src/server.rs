use crate::cli::ServeArgs;
use crate::infra::{
    default_dedupe_catalog, AppState, InMemorySurveyRegistry, InMemoryVisitStore,
};
use crate::routes::with_engine_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fieldsync::config::AppConfig;
use fieldsync::error::AppError;
use fieldsync::surveys::SurveyDedupeEngine;
use fieldsync::telemetry;
use fieldsync::visits::{FraudConfig, GeofencePolicy, VisitIntegrityService};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let visit_store = Arc::new(InMemoryVisitStore::default());
    let visit_service = Arc::new(VisitIntegrityService::new(
        visit_store,
        GeofencePolicy::default(),
        FraudConfig::default(),
    ));
    let survey_engine = Arc::new(SurveyDedupeEngine::new(
        Arc::new(default_dedupe_catalog()),
        Arc::new(InMemorySurveyRegistry::default()),
    ));

    let app = with_engine_routes(visit_service, survey_engine)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "field visit integrity service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
