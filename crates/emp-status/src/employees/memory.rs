use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use super::domain::{sort_for_display, Employee, Salary};
use super::repository::{DataAccessError, EmployeeRepository};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, Employee>,
    salaries: Vec<Salary>,
}

/// In-process employee store used for demos and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEmployeeRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryEmployeeRepository {
    pub fn with_records(
        employees: impl IntoIterator<Item = Employee>,
        salaries: impl IntoIterator<Item = Salary>,
    ) -> Self {
        let repository = Self::default();
        for employee in employees {
            repository.insert_employee(employee);
        }
        for salary in salaries {
            repository.insert_salary(salary);
        }
        repository
    }

    /// Stores the user row; any salaries on the record are moved into the salary table.
    pub fn insert_employee(&self, mut employee: Employee) {
        let salaries = std::mem::take(&mut employee.salaries);
        let mut tables = self.tables.write().expect("employee store lock poisoned");
        tables.users.insert(employee.id, employee);
        tables.salaries.extend(salaries);
    }

    pub fn insert_salary(&self, salary: Salary) {
        let mut tables = self.tables.write().expect("employee store lock poisoned");
        tables.salaries.push(salary);
    }
}

impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn exists_by_national_number(
        &self,
        national_number: i64,
    ) -> Result<bool, DataAccessError> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables
            .users
            .values()
            .any(|employee| employee.national_number == national_number))
    }

    async fn find_employee_by_national_number(
        &self,
        national_number: i64,
    ) -> Result<Option<Employee>, DataAccessError> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables
            .users
            .values()
            .find(|employee| employee.national_number == national_number)
            .cloned())
    }

    async fn list_salaries_for_employee(
        &self,
        employee_id: i64,
    ) -> Result<Vec<Salary>, DataAccessError> {
        let mut salaries: Vec<Salary> = {
            let tables = self.tables.read().map_err(poisoned)?;
            tables
                .salaries
                .iter()
                .filter(|salary| salary.employee_id == employee_id)
                .cloned()
                .collect()
        };
        sort_for_display(&mut salaries);
        Ok(salaries)
    }
}

fn poisoned<T>(_: T) -> DataAccessError {
    DataAccessError::Unavailable("employee store lock poisoned".to_string())
}
