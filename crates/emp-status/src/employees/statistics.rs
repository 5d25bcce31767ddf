use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::domain::Salary;

/// Total salary separating the RED and GREEN tiers. Landing exactly on it is ORANGE.
pub const PERFORMANCE_THRESHOLD: Decimal = Decimal::from_parts(2000, 0, 0, false, 0);

/// Fractional digits kept on the reported average.
pub const AVERAGE_SCALE: u32 = 2;

/// Aggregates derived from an employee's salary list. Never rounded except via
/// [`SalaryStatistics::rounded_average`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryStatistics {
    pub highest: Decimal,
    pub average: Decimal,
    pub total: Decimal,
    pub count: usize,
}

impl SalaryStatistics {
    pub fn empty() -> Self {
        Self {
            highest: Decimal::ZERO,
            average: Decimal::ZERO,
            total: Decimal::ZERO,
            count: 0,
        }
    }

    pub fn from_salaries(salaries: &[Salary]) -> Result<Self, StatisticsError> {
        let Some(first) = salaries.first() else {
            return Ok(Self::empty());
        };

        let mut highest = first.amount;
        let mut total = Decimal::ZERO;
        for salary in salaries {
            highest = highest.max(salary.amount);
            total = total
                .checked_add(salary.amount)
                .ok_or(StatisticsError::TotalOverflow)?;
        }

        let count = salaries.len();
        let average = total
            .checked_div(Decimal::from(count))
            .ok_or(StatisticsError::AverageOverflow)?;

        Ok(Self {
            highest,
            average,
            total,
            count,
        })
    }

    /// Average rounded half-to-even for the response payload.
    pub fn rounded_average(&self) -> Decimal {
        self.average
            .round_dp_with_strategy(AVERAGE_SCALE, RoundingStrategy::MidpointNearestEven)
    }

    pub fn status(&self) -> PerformanceStatus {
        PerformanceStatus::classify(self.total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatisticsError {
    #[error("salary total exceeds the supported decimal range")]
    TotalOverflow,
    #[error("salary average could not be represented")]
    AverageOverflow,
}

/// Three-tier performance label derived from the exact salary total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PerformanceStatus {
    Green,
    Orange,
    Red,
}

impl PerformanceStatus {
    pub fn classify(total: Decimal) -> Self {
        match total.cmp(&PERFORMANCE_THRESHOLD) {
            std::cmp::Ordering::Greater => Self::Green,
            std::cmp::Ordering::Less => Self::Red,
            std::cmp::Ordering::Equal => Self::Orange,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Green => "GREEN",
            Self::Orange => "ORANGE",
            Self::Red => "RED",
        }
    }

    pub fn legend(&self) -> &'static str {
        match self {
            Self::Green => "Total salary > $2000 (High Performer)",
            Self::Orange => "Total salary = $2000 (Meets Minimum)",
            Self::Red => "Total salary < $2000 (Needs Improvement)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employees::domain::Month;
    use std::str::FromStr;

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).expect("valid decimal literal")
    }

    fn salaries(amounts: &[&str]) -> Vec<Salary> {
        amounts
            .iter()
            .enumerate()
            .map(|(index, amount)| Salary {
                id: index as i64 + 1,
                year: 2024,
                month: Month::ALL[index % 12],
                amount: dec(amount),
                employee_id: 7,
            })
            .collect()
    }

    #[test]
    fn classification_boundary_is_exact() {
        assert_eq!(PerformanceStatus::classify(dec("2000")), PerformanceStatus::Orange);
        assert_eq!(PerformanceStatus::classify(dec("2000.00")), PerformanceStatus::Orange);
        assert_eq!(PerformanceStatus::classify(dec("2000.01")), PerformanceStatus::Green);
        assert_eq!(PerformanceStatus::classify(dec("1999.99")), PerformanceStatus::Red);
        assert_eq!(
            PerformanceStatus::classify(dec("2000.0000000001")),
            PerformanceStatus::Green
        );
        assert_eq!(
            PerformanceStatus::classify(dec("1999.9999999999")),
            PerformanceStatus::Red
        );
    }

    #[test]
    fn empty_salary_list_yields_zero_and_red() {
        let stats = SalaryStatistics::from_salaries(&[]).expect("empty stats");
        assert_eq!(stats, SalaryStatistics::empty());
        assert_eq!(stats.rounded_average(), Decimal::ZERO);
        assert_eq!(stats.status(), PerformanceStatus::Red);
    }

    #[test]
    fn aggregates_are_exact() {
        let stats = SalaryStatistics::from_salaries(&salaries(&["0.10", "0.20", "1999.70"]))
            .expect("stats");
        assert_eq!(stats.total, dec("2000.00"));
        assert_eq!(stats.highest, dec("1999.70"));
        assert_eq!(stats.count, 3);
        assert_eq!(stats.status(), PerformanceStatus::Orange);
    }

    #[test]
    fn only_average_is_rounded() {
        let stats = SalaryStatistics::from_salaries(&salaries(&["100.00", "100.00", "100.01"]))
            .expect("stats");
        assert_eq!(stats.total, dec("300.01"));
        assert_eq!(stats.highest, dec("100.01"));
        assert_eq!(stats.rounded_average(), dec("100.00"));
        assert!(stats.average > dec("100.00"));
    }

    #[test]
    fn equal_entries_average_to_themselves() {
        let stats = SalaryStatistics::from_salaries(&salaries(&["2000", "2000", "2000"]))
            .expect("stats");
        assert_eq!(stats.total, dec("6000"));
        assert_eq!(stats.rounded_average(), dec("2000.00"));
        assert_eq!(stats.status(), PerformanceStatus::Green);
    }

    #[test]
    fn midpoint_rounds_half_to_even() {
        let stats =
            SalaryStatistics::from_salaries(&salaries(&["0.125", "0.125"])).expect("stats");
        assert_eq!(stats.rounded_average(), dec("0.12"));

        let stats =
            SalaryStatistics::from_salaries(&salaries(&["0.135", "0.135"])).expect("stats");
        assert_eq!(stats.rounded_average(), dec("0.14"));
    }

    #[test]
    fn overflowing_total_is_reported() {
        let stats = SalaryStatistics::from_salaries(&salaries(&[
            "79228162514264337593543950335",
            "1",
        ]));
        assert_eq!(stats, Err(StatisticsError::TotalOverflow));
    }
}
