//! Use cases composing the store, the access policy and the calculation rules.
//!
//! Every function resolves the caller, checks capabilities and then does
//! all of its reads and writes under a single store guard. The current
//! time is always a parameter.

mod attendance;
mod directory;
mod leave;
mod onboarding;
mod salary;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{HrmsError, HrmsResult};
use crate::models::Employee;
use crate::store::Collections;

pub use attendance::{
    CheckOutOutcome, DailyAttendance, DailyAttendanceRow, TodayAttendance, check_in, check_out,
    company_attendance, monthly_attendance, today_attendance,
};
pub use directory::{
    EmployeeListing, ProfileUpdateOutcome, ProfileView, get_employee, get_profile,
    list_employees, update_profile,
};
pub use leave::{
    EmployeeLeaves, LeaveApplication, LeaveDecision, LeaveView, apply_leave, employee_leaves,
    leave_allocation, leave_queue, review_leave,
};
pub use onboarding::{
    AdminList, AdminListing, NewEmployee, RegisterCompany, Registration, create_employee,
    deactivate_admin, list_admins, register_company,
};
pub use salary::{salary_profile, update_salary};

/// Public identity of an employee, embedded in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    /// Employee ID.
    pub id: Uuid,
    /// "First Last".
    pub name: String,
    /// Work email.
    pub email: String,
    /// Login identifier.
    pub login_id: String,
    /// Avatar reference.
    pub avatar: Option<String>,
    /// Department.
    pub department: Option<String>,
    /// Job title.
    pub designation: Option<String>,
}

impl From<&Employee> for EmployeeSummary {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.full_name(),
            email: employee.email.clone(),
            login_id: employee.login_id.clone(),
            avatar: employee.avatar.clone(),
            department: employee.department.clone(),
            designation: employee.designation.clone(),
        }
    }
}

/// Resolves the caller to an active employee.
///
/// Unknown or deactivated callers are `Unauthenticated`.
pub(crate) fn resolve_actor(data: &Collections, actor_id: Uuid) -> HrmsResult<Employee> {
    match data.employees.get(&actor_id) {
        Some(employee) if employee.is_active => Ok(employee.clone()),
        Some(_) => Err(HrmsError::Unauthenticated {
            message: format!("account {} is deactivated", actor_id),
        }),
        None => Err(HrmsError::Unauthenticated {
            message: format!("unknown user {}", actor_id),
        }),
    }
}

/// Looks up an employee of the caller's company.
///
/// Employees of other companies are reported as not found.
pub(crate) fn colleague<'a>(
    data: &'a Collections,
    actor: &Employee,
    employee_id: Uuid,
) -> HrmsResult<&'a Employee> {
    let employee = data.employee(employee_id)?;
    if employee.company_id != actor.company_id {
        return Err(HrmsError::EmployeeNotFound { employee_id });
    }
    Ok(employee)
}
