//! End-to-end scenarios over the public service facade and router, backed by the seeded
//! in-memory store so no database is required.

use std::str::FromStr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use rust_decimal::Decimal;
use tower::ServiceExt;

use emp_status::employees::seed::{self, SAMPLE_CASES};
use emp_status::employees::{
    employee_router, EmployeeRepository, EmployeeStatusService, InMemoryEmployeeRepository,
    Month, PerformanceStatus, StatusOutcome,
};

fn dec(raw: &str) -> Decimal {
    Decimal::from_str(raw).expect("valid decimal literal")
}

fn seeded_service() -> EmployeeStatusService<InMemoryEmployeeRepository> {
    EmployeeStatusService::new(Arc::new(seed::repository()))
}

#[tokio::test]
async fn documented_sample_cases_produce_expected_statuses() {
    let service = seeded_service();

    for case in SAMPLE_CASES {
        let outcome = service.process_employee_request(case.national_number).await;
        match (case.expected, outcome) {
            (Some(expected), StatusOutcome::Success(view)) => {
                assert_eq!(view.status, expected, "{}", case.description);
                assert_eq!(view.username, case.username);
            }
            (None, StatusOutcome::NotFound { message }) => {
                assert_eq!(message, "Invalid National Number - Employee not found");
            }
            (expected, outcome) => {
                panic!("{}: expected {expected:?}, got {outcome:?}", case.description)
            }
        }
    }
}

#[tokio::test]
async fn seeded_totals_match_their_tiers() {
    let service = seeded_service();
    let expectations = [
        (123456789, "2500.00", PerformanceStatus::Green),
        (555666777, "2000.00", PerformanceStatus::Orange),
        (987654321, "1500.00", PerformanceStatus::Red),
    ];

    for (national_number, total, status) in expectations {
        let StatusOutcome::Success(view) = service.process_employee_request(national_number).await
        else {
            panic!("expected success for {national_number}");
        };
        assert_eq!(view.total_salary, dec(total));
        assert_eq!(view.status, status);
    }
}

#[tokio::test]
async fn seeded_salaries_come_back_newest_first() {
    let repository = seed::repository();

    let salaries = repository
        .list_salaries_for_employee(1)
        .await
        .expect("salaries listed");

    let order: Vec<(i32, Month)> = salaries.iter().map(|s| (s.year, s.month)).collect();
    assert_eq!(
        order,
        vec![
            (2024, Month::February),
            (2024, Month::January),
            (2023, Month::December)
        ]
    );
}

#[tokio::test]
async fn inactive_employee_is_reported_but_not_rejected() {
    let service = seeded_service();

    let StatusOutcome::Success(view) = service.process_employee_request(444555666).await else {
        panic!("inactive employees still resolve");
    };

    assert!(!view.is_active);
    assert_eq!(view.status, PerformanceStatus::Red);
}

#[tokio::test]
async fn router_serves_the_documented_lookup() {
    let router = employee_router(Arc::new(seeded_service()));

    let response = router
        .oneshot(
            Request::get("/api/employee/status/555666777")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(body["data"]["status"], "ORANGE");
    assert_eq!(body["data"]["averageSalary"].as_f64(), Some(1000.0));
    assert_eq!(body["data"]["isActive"], true);
}
