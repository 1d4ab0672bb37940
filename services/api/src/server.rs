use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApplicantStore, InMemoryFieldStore};
use crate::routes::with_applicant_routes;
use applicant_hub::applicants::ApplicantService;
use applicant_hub::config::AppConfig;
use applicant_hub::error::AppError;
use applicant_hub::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    let store = Arc::new(InMemoryApplicantStore::default());
    let registry = Arc::new(InMemoryFieldStore::default());
    let applicant_service = Arc::new(ApplicantService::new(store, registry));

    let app = with_applicant_routes(applicant_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "applicant hub ready");

    axum::serve(listener, app).await?;
    Ok(())
}
