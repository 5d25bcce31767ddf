//! Employee salary status lookup.
//!
//! Given a national identification number, the [`employees::EmployeeStatusService`] loads the
//! employee record and salary history through an [`employees::EmployeeRepository`], aggregates
//! the salaries and classifies the employee into a three-tier performance status.

pub mod config;
pub mod employees;
pub mod error;
pub mod telemetry;
