use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::domain::{parse_national_number, Employee, NationalNumberError};
use super::repository::{DataAccessError, EmployeeRepository};
use super::statistics::{PerformanceStatus, SalaryStatistics, StatisticsError};

pub const INVALID_NATIONAL_NUMBER: &str = "Invalid National Number - Employee not found";
pub const EMPLOYEE_RECORD_MISSING: &str = "Employee information could not be found!";
pub const EMPLOYEE_RETRIEVED: &str = "Employee information retrieved successfully!";

/// Payload returned for a successfully processed lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStatusView {
    pub employee_id: i64,
    pub username: String,
    pub national_number: i64,
    pub email: String,
    pub phone: String,
    pub is_active: bool,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub highest_salary: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub average_salary: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_salary: Decimal,
    pub status: PerformanceStatus,
    pub salary_count: usize,
}

impl EmployeeStatusView {
    pub fn assemble(
        employee: &Employee,
        statistics: &SalaryStatistics,
        status: PerformanceStatus,
    ) -> Self {
        Self {
            employee_id: employee.id,
            username: employee.username.clone(),
            national_number: employee.national_number,
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            is_active: employee.is_active,
            highest_salary: statistics.highest,
            average_salary: statistics.rounded_average(),
            total_salary: statistics.total,
            status,
            salary_count: employee.salary_count(),
        }
    }
}

/// Result of one lookup; the HTTP layer matches on the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    Success(EmployeeStatusView),
    NotFound { message: String },
    Failure { message: String },
}

impl StatusOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success(_) => EMPLOYEE_RETRIEVED,
            Self::NotFound { message } | Self::Failure { message } => message,
        }
    }

    pub fn to_response(&self) -> StatusResponse {
        StatusResponse {
            success: self.is_success(),
            message: self.message().to_string(),
            data: match self {
                Self::Success(view) => Some(view.clone()),
                Self::NotFound { .. } | Self::Failure { .. } => None,
            },
        }
    }
}

impl From<StatusError> for StatusOutcome {
    fn from(error: StatusError) -> Self {
        match error {
            StatusError::NotFound(message) => Self::NotFound { message },
            StatusError::Validation(rejection) => Self::Failure {
                message: rejection.to_string(),
            },
            other => Self::Failure {
                message: format!("Error while processing employee request: {other}"),
            },
        }
    }
}

/// Wire shape of a [`StatusOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
    pub data: Option<EmployeeStatusView>,
}

/// Error kinds raised inside the pipeline, each carrying the stage that produced it.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("{context}: {source}")]
    DataAccess {
        context: &'static str,
        #[source]
        source: DataAccessError,
    },
    #[error(transparent)]
    Validation(#[from] NationalNumberError),
    #[error("Error calculating employee salary statistics: {0}")]
    Statistics(#[from] StatisticsError),
    #[error("{0}")]
    NotFound(String),
}

impl StatusError {
    fn data_access(context: &'static str) -> impl FnOnce(DataAccessError) -> Self {
        move |source| Self::DataAccess { context, source }
    }
}

/// Orchestrates existence check, retrieval, aggregation and classification.
pub struct EmployeeStatusService<R> {
    repository: Arc<R>,
}

impl<R> Clone for EmployeeStatusService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> EmployeeStatusService<R>
where
    R: EmployeeRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Runs the full lookup. Never fails: store errors become [`StatusOutcome::Failure`].
    pub async fn process_employee_request(&self, national_number: i64) -> StatusOutcome {
        match self.evaluate(national_number).await {
            Ok(view) => {
                info!(
                    national_number,
                    status = view.status.label(),
                    salary_count = view.salary_count,
                    "employee status computed"
                );
                StatusOutcome::Success(view)
            }
            Err(StatusError::NotFound(message)) => {
                info!(national_number, %message, "employee lookup missed");
                StatusOutcome::NotFound { message }
            }
            Err(error) => {
                warn!(national_number, %error, "employee lookup failed");
                StatusOutcome::from(error)
            }
        }
    }

    /// Validates raw caller input before running [`Self::process_employee_request`].
    pub async fn process_raw_request(&self, raw: &str) -> StatusOutcome {
        match parse_national_number(raw) {
            Ok(national_number) => self.process_employee_request(national_number).await,
            Err(rejection) => StatusOutcome::from(StatusError::from(rejection)),
        }
    }

    /// Stage-by-stage pipeline; not-found outcomes surface as [`StatusError::NotFound`].
    pub async fn evaluate(&self, national_number: i64) -> Result<EmployeeStatusView, StatusError> {
        if !self.check_national_number_exists(national_number).await? {
            return Err(StatusError::NotFound(INVALID_NATIONAL_NUMBER.to_string()));
        }

        let employee = self
            .employee_information(national_number)
            .await?
            .ok_or_else(|| StatusError::NotFound(EMPLOYEE_RECORD_MISSING.to_string()))?;

        if !employee.is_active {
            debug!(employee_id = employee.id, "processing inactive employee");
        }

        let statistics = SalaryStatistics::from_salaries(&employee.salaries)?;
        let status = statistics.status();

        Ok(EmployeeStatusView::assemble(&employee, &statistics, status))
    }

    pub async fn check_national_number_exists(
        &self,
        national_number: i64,
    ) -> Result<bool, StatusError> {
        self.repository
            .exists_by_national_number(national_number)
            .await
            .map_err(StatusError::data_access(
                "Error checking National Number existence",
            ))
    }

    /// Employee record with its salaries attached, or `None` when the row is gone.
    pub async fn employee_information(
        &self,
        national_number: i64,
    ) -> Result<Option<Employee>, StatusError> {
        let context = "Error getting employee information";
        let Some(mut employee) = self
            .repository
            .find_employee_by_national_number(national_number)
            .await
            .map_err(StatusError::data_access(context))?
        else {
            return Ok(None);
        };

        employee.salaries = self
            .repository
            .list_salaries_for_employee(employee.id)
            .await
            .map_err(StatusError::data_access(context))?;

        Ok(Some(employee))
    }
}
