use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Calendar month as stored in the `salaries.month` column.
///
/// Variants are declared in calendar order so the derived `Ord` follows the calendar rather
/// than the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Parses an English month name, ignoring case and surrounding whitespace.
    pub fn from_name(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|month| month.name().eq_ignore_ascii_case(trimmed))
    }

    /// One-based calendar index (January = 1).
    pub fn index(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single monthly salary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salary {
    pub id: i64,
    pub year: i32,
    pub month: Month,
    pub amount: Decimal,
    pub employee_id: i64,
}

impl Salary {
    /// Newest first: year descending, then calendar month descending.
    pub fn display_order(a: &Salary, b: &Salary) -> Ordering {
        b.year.cmp(&a.year).then_with(|| b.month.cmp(&a.month))
    }
}

pub fn sort_for_display(salaries: &mut [Salary]) {
    salaries.sort_by(Salary::display_order);
}

/// Employee record as loaded for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub username: String,
    pub national_number: i64,
    pub email: String,
    pub phone: String,
    pub is_active: bool,
    pub salaries: Vec<Salary>,
}

impl Employee {
    pub fn salary_count(&self) -> usize {
        self.salaries.len()
    }
}

/// Rejection of a raw national number before any store access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NationalNumberError {
    #[error("National number is required")]
    Missing,
    #[error("Invalid National Number format. Please enter a valid numeric National Number.")]
    InvalidFormat,
}

/// Validates caller input into the numeric business key.
pub fn parse_national_number(raw: &str) -> Result<i64, NationalNumberError> {
    if raw.is_empty() {
        return Err(NationalNumberError::Missing);
    }

    raw.trim()
        .parse::<i64>()
        .map_err(|_| NationalNumberError::InvalidFormat)
}
