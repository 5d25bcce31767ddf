use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use emp_status::employees::router::{FRAMEWORK, SERVICE_VERSION};
use emp_status::employees::seed::SAMPLE_CASES;
use emp_status::employees::{employee_router, EmployeeRepository, EmployeeStatusService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_operational_routes<R>(service: Arc<EmployeeStatusService<R>>) -> Router
where
    R: EmployeeRepository + 'static,
{
    employee_router(service)
        .route("/", get(root_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn root_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<serde_json::Value> {
    let test_employees: Vec<serde_json::Value> = SAMPLE_CASES
        .iter()
        .filter_map(|case| {
            case.expected.map(|status| {
                json!({
                    "nat": case.national_number.to_string(),
                    "name": case.username,
                    "expectedStatus": status.label(),
                })
            })
        })
        .collect();

    Json(json!({
        "message": "GetEmpStatus Web API",
        "version": SERVICE_VERSION,
        "framework": FRAMEWORK,
        "database": state.store,
        "environment": state.environment.label(),
        "endpoints": [
            "GET /api/employee/status/{nationalNumber} - Get employee status",
            "GET /api/employee/health - Health check",
            "GET /api/employee/info - Service information",
        ],
        "testEmployees": test_employees,
        "deployedAt": state.started_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    }))
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
