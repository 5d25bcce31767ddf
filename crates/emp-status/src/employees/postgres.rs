//! Postgres-backed [`EmployeeRepository`].
//!
//! Every operation acquires its own pooled connection, runs one parameterized query and hands
//! the connection back when the guard drops, whichever way the call returns.

use rust_decimal::Decimal;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Postgres;
use tracing::debug;

use super::domain::{Employee, Month, Salary};
use super::repository::{DataAccessError, EmployeeRepository};
use crate::config::{ConfigError, DatabaseConfig};

const EXISTS_BY_NATIONAL_NUMBER: &str =
    "SELECT COUNT(*) FROM users WHERE national_number = $1";

const FIND_EMPLOYEE_BY_NATIONAL_NUMBER: &str =
    "SELECT id, username, national_number, email, phone, is_active \
     FROM users \
     WHERE national_number = $1";

const LIST_SALARIES_FOR_EMPLOYEE: &str = "SELECT id, year, month, salary, user_id \
     FROM salaries \
     WHERE user_id = $1 \
     ORDER BY year DESC, \
     CASE initcap(regexp_replace(month, '^\\s+|\\s+$', '', 'g')) \
         WHEN 'January' THEN 1 WHEN 'February' THEN 2 WHEN 'March' THEN 3 \
         WHEN 'April' THEN 4 WHEN 'May' THEN 5 WHEN 'June' THEN 6 \
         WHEN 'July' THEN 7 WHEN 'August' THEN 8 WHEN 'September' THEN 9 \
         WHEN 'October' THEN 10 WHEN 'November' THEN 11 WHEN 'December' THEN 12 \
     END DESC";

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    national_number: i64,
    email: String,
    phone: String,
    is_active: bool,
}

impl From<UserRow> for Employee {
    fn from(row: UserRow) -> Self {
        Employee {
            id: row.id,
            username: row.username,
            national_number: row.national_number,
            email: row.email,
            phone: row.phone,
            is_active: row.is_active,
            salaries: Vec::new(),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SalaryRow {
    id: i64,
    year: i32,
    month: String,
    salary: Decimal,
    user_id: i64,
}

impl TryFrom<SalaryRow> for Salary {
    type Error = DataAccessError;

    fn try_from(row: SalaryRow) -> Result<Self, Self::Error> {
        let month = Month::from_name(&row.month).ok_or_else(|| DataAccessError::Mapping {
            operation: "retrieving salaries",
            detail: format!("salary {} has unknown month '{}'", row.id, row.month),
        })?;

        Ok(Salary {
            id: row.id,
            year: row.year,
            month,
            amount: row.salary,
            employee_id: row.user_id,
        })
    }
}

/// Employee store reached through a shared `sqlx` connection pool.
#[derive(Debug, Clone)]
pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds the pool without opening a connection; the first query connects.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, PgRepositoryError> {
        let url = config.require_url()?;
        let pool = pool_options(config)
            .connect_lazy(url)
            .map_err(DataAccessError::database("configuring the connection pool"))?;
        Ok(Self { pool })
    }

    /// Builds the pool and opens one connection up front.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, PgRepositoryError> {
        let url = config.require_url()?;
        let pool = pool_options(config)
            .connect(url)
            .await
            .map_err(DataAccessError::database("connecting to the employee store"))?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn acquire(
        &self,
        operation: &'static str,
    ) -> Result<PoolConnection<Postgres>, DataAccessError> {
        self.pool
            .acquire()
            .await
            .map_err(DataAccessError::database(operation))
    }
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
}

impl EmployeeRepository for PgEmployeeRepository {
    async fn exists_by_national_number(
        &self,
        national_number: i64,
    ) -> Result<bool, DataAccessError> {
        const OPERATION: &str = "checking national number";
        let mut connection = self.acquire(OPERATION).await?;

        let count: i64 = sqlx::query_scalar(EXISTS_BY_NATIONAL_NUMBER)
            .bind(national_number)
            .fetch_one(&mut *connection)
            .await
            .map_err(DataAccessError::database(OPERATION))?;

        debug!(national_number, count, "national number lookup");
        Ok(count > 0)
    }

    async fn find_employee_by_national_number(
        &self,
        national_number: i64,
    ) -> Result<Option<Employee>, DataAccessError> {
        const OPERATION: &str = "retrieving employee";
        let mut connection = self.acquire(OPERATION).await?;

        let row: Option<UserRow> = sqlx::query_as(FIND_EMPLOYEE_BY_NATIONAL_NUMBER)
            .bind(national_number)
            .fetch_optional(&mut *connection)
            .await
            .map_err(DataAccessError::database(OPERATION))?;

        debug!(national_number, found = row.is_some(), "employee lookup");
        Ok(row.map(Employee::from))
    }

    async fn list_salaries_for_employee(
        &self,
        employee_id: i64,
    ) -> Result<Vec<Salary>, DataAccessError> {
        const OPERATION: &str = "retrieving salaries";
        let mut connection = self.acquire(OPERATION).await?;

        let rows: Vec<SalaryRow> = sqlx::query_as(LIST_SALARIES_FOR_EMPLOYEE)
            .bind(employee_id)
            .fetch_all(&mut *connection)
            .await
            .map_err(DataAccessError::database(OPERATION))?;

        debug!(employee_id, rows = rows.len(), "salary listing");
        rows.into_iter().map(Salary::try_from).collect()
    }
}

/// Failure while constructing a [`PgEmployeeRepository`].
#[derive(Debug, thiserror::Error)]
pub enum PgRepositoryError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    DataAccess(#[from] DataAccessError),
}
