//! Reference employees mirrored by `sql/seed.sql`, used by the offline mode and tests.

use rust_decimal::Decimal;

use super::domain::{Employee, Month, Salary};
use super::memory::InMemoryEmployeeRepository;
use super::statistics::PerformanceStatus;

/// A documented lookup and the status it is expected to produce.
#[derive(Debug, Clone, Copy)]
pub struct SampleCase {
    pub national_number: i64,
    pub username: &'static str,
    pub expected: Option<PerformanceStatus>,
    pub description: &'static str,
}

pub const SAMPLE_CASES: [SampleCase; 5] = [
    SampleCase {
        national_number: 123456789,
        username: "John Doe",
        expected: Some(PerformanceStatus::Green),
        description: "John Doe - High Performer",
    },
    SampleCase {
        national_number: 987654321,
        username: "Jane Smith",
        expected: Some(PerformanceStatus::Red),
        description: "Jane Smith - Needs Improvement",
    },
    SampleCase {
        national_number: 555666777,
        username: "Ahmed Hassan",
        expected: Some(PerformanceStatus::Orange),
        description: "Ahmed Hassan - Meets Minimum",
    },
    SampleCase {
        national_number: 444555666,
        username: "Mike Johnson",
        expected: Some(PerformanceStatus::Red),
        description: "Mike Johnson - Inactive Employee",
    },
    SampleCase {
        national_number: 999999999,
        username: "",
        expected: None,
        description: "Invalid National Number",
    },
];

fn employee(
    id: i64,
    username: &str,
    national_number: i64,
    phone: &str,
    is_active: bool,
) -> Employee {
    let email = format!("{}@company.com", username.to_ascii_lowercase().replace(' ', "."));
    Employee {
        id,
        username: username.to_string(),
        national_number,
        email,
        phone: phone.to_string(),
        is_active,
        salaries: Vec::new(),
    }
}

fn salary(id: i64, employee_id: i64, year: i32, month: Month, cents: i64) -> Salary {
    Salary {
        id,
        year,
        month,
        amount: Decimal::new(cents, 2),
        employee_id,
    }
}

pub fn employees() -> Vec<Employee> {
    vec![
        employee(1, "John Doe", 123456789, "+1-555-0101", true),
        employee(2, "Jane Smith", 987654321, "+1-555-0102", true),
        employee(3, "Ahmed Hassan", 555666777, "+1-555-0103", true),
        employee(4, "Mike Johnson", 444555666, "+1-555-0104", false),
    ]
}

pub fn salaries() -> Vec<Salary> {
    vec![
        // John Doe: 2500.00
        salary(1, 1, 2024, Month::January, 80000),
        salary(2, 1, 2024, Month::February, 85000),
        salary(3, 1, 2023, Month::December, 85000),
        // Jane Smith: 1500.00
        salary(4, 2, 2024, Month::March, 50000),
        salary(5, 2, 2024, Month::April, 50000),
        salary(6, 2, 2024, Month::May, 50000),
        // Ahmed Hassan: 2000.00
        salary(7, 3, 2024, Month::June, 100000),
        salary(8, 3, 2024, Month::July, 100000),
        // Mike Johnson: 900.00
        salary(9, 4, 2023, Month::November, 45000),
        salary(10, 4, 2023, Month::October, 45000),
    ]
}

pub fn repository() -> InMemoryEmployeeRepository {
    InMemoryEmployeeRepository::with_records(employees(), salaries())
}
