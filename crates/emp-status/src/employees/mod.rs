//! Employee status lookup: store access, salary aggregation, classification and routing.

pub mod domain;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod router;
pub mod seed;
pub mod service;
pub mod statistics;

#[cfg(test)]
mod tests;

pub use domain::{
    parse_national_number, sort_for_display, Employee, Month, NationalNumberError, Salary,
};
pub use memory::InMemoryEmployeeRepository;
pub use postgres::{PgEmployeeRepository, PgRepositoryError};
pub use repository::{DataAccessError, EmployeeRepository};
pub use router::employee_router;
pub use service::{
    EmployeeStatusService, EmployeeStatusView, StatusError, StatusOutcome, StatusResponse,
};
pub use statistics::{PerformanceStatus, SalaryStatistics, StatisticsError};
