use crate::cli::ServeArgs;
use crate::infra::{build_store, AppState, StoreBackend};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use emp_status::config::{AppConfig, AppEnvironment};
use emp_status::employees::{EmployeeRepository, EmployeeStatusService};
use emp_status::error::AppError;
use emp_status::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

const PROBE_NATIONAL_NUMBER: i64 = 123456789;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let store = build_store(&config, args.memory)?;
    let store_label = store.label();
    match store {
        StoreBackend::Postgres(repository) => serve(config, repository, store_label).await,
        StoreBackend::Memory(repository) => serve(config, repository, store_label).await,
    }
}

async fn serve<R>(
    config: AppConfig,
    repository: Arc<R>,
    store: &'static str,
) -> Result<(), AppError>
where
    R: EmployeeRepository + 'static,
{
    let service = Arc::new(EmployeeStatusService::new(repository));

    if config.environment == AppEnvironment::Development {
        probe_store(&service).await;
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        environment: config.environment,
        store,
        started_at: chrono::Utc::now(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any);

    let app = with_operational_routes(service)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, store, "employee status service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Startup connectivity check; a failure is logged and the server still starts.
async fn probe_store<R>(service: &EmployeeStatusService<R>)
where
    R: EmployeeRepository + 'static,
{
    match service.check_national_number_exists(PROBE_NATIONAL_NUMBER).await {
        Ok(found) => info!(
            national_number = PROBE_NATIONAL_NUMBER,
            found, "employee store connection verified"
        ),
        Err(error) => warn!(%error, "employee store connection failed; check DATABASE_URL"),
    }
}
