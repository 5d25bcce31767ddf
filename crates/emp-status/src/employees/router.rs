use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Local;
use serde_json::json;
use tracing::error;

use super::domain::{parse_national_number, NationalNumberError};
use super::repository::EmployeeRepository;
use super::seed::SAMPLE_CASES;
use super::service::{EmployeeStatusService, StatusOutcome};
use super::statistics::PerformanceStatus;

pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const FRAMEWORK: &str = "Rust / axum 0.8";
pub const STORE_CLIENT: &str = "sqlx 0.8 (PostgreSQL)";

/// Local wall-clock timestamp attached to boundary responses.
pub fn timestamp() -> String {
    Local::now().format("%y-%m-%d %H:%M:%S").to_string()
}

/// Router builder exposing the employee status lookup and its companion endpoints.
pub fn employee_router<R>(service: Arc<EmployeeStatusService<R>>) -> Router
where
    R: EmployeeRepository + 'static,
{
    Router::new()
        .route("/api/employee/status", get(missing_national_number_handler))
        .route("/api/employee/status/", get(missing_national_number_handler))
        .route(
            "/api/employee/status/{national_number}",
            get(status_handler::<R>),
        )
        .route("/api/employee/health", get(health_handler))
        .route("/api/employee/info", get(info_handler))
        .with_state(service)
}

fn rejection_response(rejection: NationalNumberError) -> Response {
    let payload = json!({
        "success": false,
        "message": rejection.to_string(),
        "timestamp": timestamp(),
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

pub(crate) async fn missing_national_number_handler() -> Response {
    rejection_response(NationalNumberError::Missing)
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<EmployeeStatusService<R>>>,
    Path(raw): Path<String>,
) -> Response
where
    R: EmployeeRepository + 'static,
{
    let national_number = match parse_national_number(&raw) {
        Ok(value) => value,
        Err(rejection) => return rejection_response(rejection),
    };

    let task = tokio::spawn(async move { service.process_employee_request(national_number).await });

    match task.await {
        Ok(outcome) => {
            let status = match outcome {
                StatusOutcome::Success(_) => StatusCode::OK,
                StatusOutcome::NotFound { .. } | StatusOutcome::Failure { .. } => {
                    StatusCode::NOT_FOUND
                }
            };
            (status, Json(outcome.to_response())).into_response()
        }
        Err(join_error) => {
            error!(national_number, error = %join_error, "employee status task aborted");
            let payload = json!({
                "success": false,
                "message": "An error occured while processing the request",
                "error": join_error.to_string(),
                "timestamp": timestamp(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "message": "GetEmpStatus Web API is running successfully",
        "timestamp": timestamp(),
        "version": SERVICE_VERSION,
        "framework": FRAMEWORK,
        "storeClient": STORE_CLIENT,
    }))
}

pub(crate) async fn info_handler() -> Json<serde_json::Value> {
    let test_cases: Vec<serde_json::Value> = SAMPLE_CASES
        .iter()
        .map(|case| {
            json!({
                "nationalNumber": case.national_number.to_string(),
                "expectedStatus": case.expected.map_or("ERROR", |status| status.label()),
                "description": case.description,
            })
        })
        .collect();

    let legend: serde_json::Map<String, serde_json::Value> = [
        PerformanceStatus::Green,
        PerformanceStatus::Red,
        PerformanceStatus::Orange,
    ]
    .iter()
    .map(|status| (status.label().to_string(), json!(status.legend())))
    .collect();

    Json(json!({
        "success": true,
        "message": "Service information retrieved successfully",
        "version": SERVICE_VERSION,
        "framework": FRAMEWORK,
        "description": "Employee Status Management Web API",
        "endpoints": [
            {
                "method": "GET",
                "path": "/api/employee/status/{nationalNumber}",
                "description": "Get employee status by National Number",
            },
            {
                "method": "GET",
                "path": "/api/employee/health",
                "description": "Health check endpoint",
            },
            {
                "method": "GET",
                "path": "/api/employee/info",
                "description": "Service information",
            },
        ],
        "testCases": test_cases,
        "statusLegend": legend,
        "timestamp": timestamp(),
    }))
}
