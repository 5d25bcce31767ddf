use std::future::Future;

use super::domain::{Employee, Salary};

/// Read access to the employee store so the status service can be exercised in isolation.
///
/// Implementations receive raw caller-supplied keys; validation belongs to the service.
pub trait EmployeeRepository: Send + Sync {
    /// `Ok(false)` when no user row carries the national number.
    fn exists_by_national_number(
        &self,
        national_number: i64,
    ) -> impl Future<Output = Result<bool, DataAccessError>> + Send;

    /// The matching employee with an empty salary list, or `None`.
    fn find_employee_by_national_number(
        &self,
        national_number: i64,
    ) -> impl Future<Output = Result<Option<Employee>, DataAccessError>> + Send;

    /// Salaries owned by the employee, newest first (year, then calendar month, descending).
    fn list_salaries_for_employee(
        &self,
        employee_id: i64,
    ) -> impl Future<Output = Result<Vec<Salary>, DataAccessError>> + Send;
}

/// Store failures, tagged with the operation that was running.
#[derive(Debug, thiserror::Error)]
pub enum DataAccessError {
    #[error("PostgreSQL error {operation}: {source}")]
    Database {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("unreadable row while {operation}: {detail}")]
    Mapping {
        operation: &'static str,
        detail: String,
    },
    #[error("employee store unavailable: {0}")]
    Unavailable(String),
}

impl DataAccessError {
    /// Adapter for `map_err` that tags a driver error with its operation.
    pub fn database(operation: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Database { operation, source }
    }
}
