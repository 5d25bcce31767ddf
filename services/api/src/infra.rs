use chrono::{DateTime, Utc};
use emp_status::config::{AppConfig, AppEnvironment};
use emp_status::employees::{seed, InMemoryEmployeeRepository, PgEmployeeRepository};
use emp_status::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) environment: AppEnvironment,
    pub(crate) store: &'static str,
    pub(crate) started_at: DateTime<Utc>,
}

/// Employee store selected at startup.
pub(crate) enum StoreBackend {
    Postgres(Arc<PgEmployeeRepository>),
    Memory(Arc<InMemoryEmployeeRepository>),
}

impl StoreBackend {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            StoreBackend::Postgres(_) => "PostgreSQL",
            StoreBackend::Memory(_) => "in-memory sample data",
        }
    }
}

pub(crate) fn build_store(config: &AppConfig, memory: bool) -> Result<StoreBackend, AppError> {
    if memory {
        return Ok(StoreBackend::Memory(Arc::new(seed::repository())));
    }

    let repository = PgEmployeeRepository::connect_lazy(&config.database)?;
    Ok(StoreBackend::Postgres(Arc::new(repository)))
}
