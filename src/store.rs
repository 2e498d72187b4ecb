//! In-process record store.
//!
//! All collections live behind one [`tokio::sync::RwLock`]. Every mutating
//! use case takes the write guard once and performs its whole
//! read-check-write sequence under it, so a leave request leaves the
//! pending state at most once and ledger increments are never lost.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::config::LeaveDefaults;
use crate::error::{HrmsError, HrmsResult};
use crate::models::{
    AttendanceRecord, Company, Employee, LeaveAllocation, LeaveRequest, LeaveStatus, SalaryProfile,
};

/// The stored collections.
#[derive(Debug, Default)]
pub struct Collections {
    /// Companies by ID.
    pub companies: HashMap<Uuid, Company>,
    /// Employees by ID.
    pub employees: HashMap<Uuid, Employee>,
    /// Salary profiles by employee ID.
    pub salaries: HashMap<Uuid, SalaryProfile>,
    /// Attendance records by employee ID and day.
    pub attendance: HashMap<(Uuid, NaiveDate), AttendanceRecord>,
    /// Leave requests by ID.
    pub leaves: HashMap<Uuid, LeaveRequest>,
    /// Leave ledgers by employee ID.
    pub allocations: HashMap<Uuid, LeaveAllocation>,
}

impl Collections {
    /// Looks up an employee.
    pub fn employee(&self, employee_id: Uuid) -> HrmsResult<&Employee> {
        self.employees
            .get(&employee_id)
            .ok_or(HrmsError::EmployeeNotFound { employee_id })
    }

    /// Looks up an employee, mutably.
    pub fn employee_mut(&mut self, employee_id: Uuid) -> HrmsResult<&mut Employee> {
        self.employees
            .get_mut(&employee_id)
            .ok_or(HrmsError::EmployeeNotFound { employee_id })
    }

    /// Looks up a company.
    pub fn company(&self, company_id: Uuid) -> HrmsResult<&Company> {
        self.companies
            .get(&company_id)
            .ok_or(HrmsError::CompanyNotFound { company_id })
    }

    /// Inserts a company, refusing a duplicate code.
    pub fn insert_company(&mut self, company: Company) -> HrmsResult<()> {
        if self.companies.values().any(|c| c.code == company.code) {
            return Err(HrmsError::Conflict {
                message: format!("company code '{}' is already registered", company.code),
            });
        }
        self.companies.insert(company.id, company);
        Ok(())
    }

    /// Fails with `Conflict` if another employee of the company already
    /// uses the login ID or email.
    pub fn ensure_unique_identity(
        &self,
        company_id: Uuid,
        login_id: &str,
        email: &str,
        except: Option<Uuid>,
    ) -> HrmsResult<()> {
        let clash = self.employees.values().find(|e| {
            e.company_id == company_id
                && Some(e.id) != except
                && (e.login_id == login_id || e.email.eq_ignore_ascii_case(email))
        });

        match clash {
            Some(existing) if existing.login_id == login_id => Err(HrmsError::Conflict {
                message: format!("login id '{}' is already in use", login_id),
            }),
            Some(_) => Err(HrmsError::Conflict {
                message: format!("email '{}' is already registered", email),
            }),
            None => Ok(()),
        }
    }

    /// Inserts an employee, refusing a duplicate login ID or email within
    /// the company.
    pub fn insert_employee(&mut self, employee: Employee) -> HrmsResult<()> {
        self.ensure_unique_identity(
            employee.company_id,
            &employee.login_id,
            &employee.email,
            None,
        )?;
        self.employees.insert(employee.id, employee);
        Ok(())
    }

    /// Active employees of a company, ordered by first then last name.
    pub fn active_employees(&self, company_id: Uuid) -> Vec<&Employee> {
        let mut employees: Vec<&Employee> = self
            .employees
            .values()
            .filter(|e| e.company_id == company_id && e.is_active)
            .collect();
        employees.sort_by(|a, b| {
            (a.first_name.as_str(), a.last_name.as_str())
                .cmp(&(b.first_name.as_str(), b.last_name.as_str()))
        });
        employees
    }

    /// The attendance record of an employee on a day, if any.
    pub fn attendance_on(&self, employee_id: Uuid, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.attendance.get(&(employee_id, date))
    }

    /// All attendance records of an employee between two days, inclusive.
    pub fn attendance_between(
        &self,
        employee_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<AttendanceRecord> {
        self.attendance
            .values()
            .filter(|r| r.employee_id == employee_id && start <= r.date && r.date <= end)
            .cloned()
            .collect()
    }

    /// An employee's leave requests, newest first.
    pub fn leaves_of(&self, employee_id: Uuid) -> Vec<LeaveRequest> {
        let mut leaves: Vec<LeaveRequest> = self
            .leaves
            .values()
            .filter(|l| l.employee_id == employee_id)
            .cloned()
            .collect();
        leaves.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        leaves
    }

    /// The approved leave request covering `date`, if any.
    pub fn approved_leave_on(&self, employee_id: Uuid, date: NaiveDate) -> Option<&LeaveRequest> {
        self.leaves.values().find(|l| {
            l.employee_id == employee_id && l.status == LeaveStatus::Approved && l.covers(date)
        })
    }

    /// Looks up a leave request.
    pub fn leave(&self, leave_id: Uuid) -> HrmsResult<&LeaveRequest> {
        self.leaves
            .get(&leave_id)
            .ok_or(HrmsError::LeaveNotFound { leave_id })
    }

    /// An employee's leave ledger, created from defaults if missing.
    pub fn allocation_or_default(
        &mut self,
        employee_id: Uuid,
        year: i32,
        defaults: &LeaveDefaults,
        now: DateTime<Utc>,
    ) -> &mut LeaveAllocation {
        self.allocations
            .entry(employee_id)
            .or_insert_with(|| LeaveAllocation::new(employee_id, year, defaults, now))
    }
}

/// Shared in-memory store.
///
/// # Example
///
/// ```
/// use dayflow_hrms::store::MemoryStore;
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new();
/// assert!(store.read().await.employees.is_empty());
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires shared read access.
    pub async fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.inner.read().await
    }

    /// Acquires exclusive write access.
    pub async fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.inner.write().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn create_employee(company_id: Uuid, login_id: &str, email: &str) -> Employee {
        Employee::new(company_id, login_id, Role::Employee, "Grace", "Hopper", email, Utc::now())
    }

    #[tokio::test]
    async fn test_duplicate_login_id_conflicts() {
        let store = MemoryStore::new();
        let company_id = Uuid::new_v4();
        let mut data = store.write().await;

        data.insert_employee(create_employee(company_id, "OIGRHO20260001", "grace@example.com"))
            .unwrap();
        let result =
            data.insert_employee(create_employee(company_id, "OIGRHO20260001", "other@example.com"));

        assert!(matches!(result, Err(HrmsError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts_case_insensitively() {
        let store = MemoryStore::new();
        let company_id = Uuid::new_v4();
        let mut data = store.write().await;

        data.insert_employee(create_employee(company_id, "A1", "grace@example.com"))
            .unwrap();
        let result = data.insert_employee(create_employee(company_id, "A2", "GRACE@example.com"));

        match result {
            Err(HrmsError::Conflict { message }) => assert!(message.contains("email")),
            other => panic!("Expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_same_login_id_in_other_company_is_allowed() {
        let store = MemoryStore::new();
        let mut data = store.write().await;

        data.insert_employee(create_employee(Uuid::new_v4(), "A1", "a@example.com"))
            .unwrap();
        assert!(
            data.insert_employee(create_employee(Uuid::new_v4(), "A1", "a@example.com"))
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_duplicate_company_code_conflicts() {
        let store = MemoryStore::new();
        let mut data = store.write().await;

        data.insert_company(Company::new("Odoo India", "OI", Utc::now()))
            .unwrap();
        let result = data.insert_company(Company::new("Other", "oi", Utc::now()));

        assert!(matches!(result, Err(HrmsError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_missing_lookups_return_not_found() {
        let store = MemoryStore::new();
        let data = store.read().await;

        assert!(matches!(
            data.employee(Uuid::nil()),
            Err(HrmsError::EmployeeNotFound { .. })
        ));
        assert!(matches!(
            data.leave(Uuid::nil()),
            Err(HrmsError::LeaveNotFound { .. })
        ));
        assert!(matches!(
            data.company(Uuid::nil()),
            Err(HrmsError::CompanyNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_active_employees_sorted_and_filtered() {
        let store = MemoryStore::new();
        let company_id = Uuid::new_v4();
        let mut data = store.write().await;

        let mut zed = create_employee(company_id, "Z", "z@example.com");
        zed.first_name = "Zed".to_string();
        let mut amy = create_employee(company_id, "A", "a@example.com");
        amy.first_name = "Amy".to_string();
        let mut gone = create_employee(company_id, "G", "g@example.com");
        gone.is_active = false;
        data.insert_employee(zed).unwrap();
        data.insert_employee(amy).unwrap();
        data.insert_employee(gone).unwrap();
        data.insert_employee(create_employee(Uuid::new_v4(), "X", "x@example.com"))
            .unwrap();

        let names: Vec<&str> = data
            .active_employees(company_id)
            .iter()
            .map(|e| e.first_name.as_str())
            .collect();
        assert_eq!(names, vec!["Amy", "Zed"]);
    }
}
