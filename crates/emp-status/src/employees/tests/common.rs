use std::str::FromStr;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::employees::domain::{Employee, Month, Salary};
use crate::employees::memory::InMemoryEmployeeRepository;
use crate::employees::repository::{DataAccessError, EmployeeRepository};
use crate::employees::service::EmployeeStatusService;

pub(super) fn dec(raw: &str) -> Decimal {
    Decimal::from_str(raw).expect("valid decimal literal")
}

pub(super) fn employee(id: i64, national_number: i64, is_active: bool) -> Employee {
    Employee {
        id,
        username: format!("employee-{id}"),
        national_number,
        email: format!("employee-{id}@company.com"),
        phone: "+1-555-0199".to_string(),
        is_active,
        salaries: Vec::new(),
    }
}

/// Salaries for `employee_id`, one per month starting in January 2024.
pub(super) fn salaries(employee_id: i64, amounts: &[&str]) -> Vec<Salary> {
    amounts
        .iter()
        .enumerate()
        .map(|(index, amount)| Salary {
            id: employee_id * 100 + index as i64,
            year: 2024,
            month: Month::ALL[index % 12],
            amount: dec(amount),
            employee_id,
        })
        .collect()
}

pub(super) fn repository_with(
    employee: Employee,
    amounts: &[&str],
) -> Arc<RecordingRepository> {
    let salaries = salaries(employee.id, amounts);
    Arc::new(RecordingRepository::new(
        InMemoryEmployeeRepository::with_records([employee], salaries),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Call {
    Exists(i64),
    Find(i64),
    Salaries(i64),
}

/// Delegates to the in-memory store and records every call it receives.
pub(super) struct RecordingRepository {
    inner: InMemoryEmployeeRepository,
    calls: Mutex<Vec<Call>>,
}

impl RecordingRepository {
    pub(super) fn new(inner: InMemoryEmployeeRepository) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock").clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("lock").push(call);
    }
}

impl EmployeeRepository for RecordingRepository {
    async fn exists_by_national_number(
        &self,
        national_number: i64,
    ) -> Result<bool, DataAccessError> {
        self.record(Call::Exists(national_number));
        self.inner.exists_by_national_number(national_number).await
    }

    async fn find_employee_by_national_number(
        &self,
        national_number: i64,
    ) -> Result<Option<Employee>, DataAccessError> {
        self.record(Call::Find(national_number));
        self.inner.find_employee_by_national_number(national_number).await
    }

    async fn list_salaries_for_employee(
        &self,
        employee_id: i64,
    ) -> Result<Vec<Salary>, DataAccessError> {
        self.record(Call::Salaries(employee_id));
        self.inner.list_salaries_for_employee(employee_id).await
    }
}

/// Every operation fails as if the database were offline.
pub(super) struct UnavailableRepository;

impl EmployeeRepository for UnavailableRepository {
    async fn exists_by_national_number(
        &self,
        _national_number: i64,
    ) -> Result<bool, DataAccessError> {
        Err(DataAccessError::Unavailable("database offline".to_string()))
    }

    async fn find_employee_by_national_number(
        &self,
        _national_number: i64,
    ) -> Result<Option<Employee>, DataAccessError> {
        Err(DataAccessError::Unavailable("database offline".to_string()))
    }

    async fn list_salaries_for_employee(
        &self,
        _employee_id: i64,
    ) -> Result<Vec<Salary>, DataAccessError> {
        Err(DataAccessError::Unavailable("database offline".to_string()))
    }
}

/// Reports the national number as present but loses the row before it is read.
pub(super) struct VanishingRepository;

impl EmployeeRepository for VanishingRepository {
    async fn exists_by_national_number(
        &self,
        _national_number: i64,
    ) -> Result<bool, DataAccessError> {
        Ok(true)
    }

    async fn find_employee_by_national_number(
        &self,
        _national_number: i64,
    ) -> Result<Option<Employee>, DataAccessError> {
        Ok(None)
    }

    async fn list_salaries_for_employee(
        &self,
        _employee_id: i64,
    ) -> Result<Vec<Salary>, DataAccessError> {
        Ok(Vec::new())
    }
}

/// Finds the employee but fails while listing salaries.
pub(super) struct BrokenSalaryRepository;

impl EmployeeRepository for BrokenSalaryRepository {
    async fn exists_by_national_number(
        &self,
        _national_number: i64,
    ) -> Result<bool, DataAccessError> {
        Ok(true)
    }

    async fn find_employee_by_national_number(
        &self,
        national_number: i64,
    ) -> Result<Option<Employee>, DataAccessError> {
        Ok(Some(employee(42, national_number, true)))
    }

    async fn list_salaries_for_employee(
        &self,
        _employee_id: i64,
    ) -> Result<Vec<Salary>, DataAccessError> {
        Err(DataAccessError::Mapping {
            operation: "retrieving salaries",
            detail: "salary 7 has unknown month 'Smarch'".to_string(),
        })
    }
}

pub(super) fn service_over<R>(repository: Arc<R>) -> EmployeeStatusService<R>
where
    R: EmployeeRepository + 'static,
{
    EmployeeStatusService::new(repository)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
