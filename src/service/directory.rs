//! Employee directory and profile editing.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculation::{SalaryComputation, recompute_salary, resolve_work_status};
use crate::config::HrmsConfig;
use crate::error::{HrmsError, HrmsResult};
use crate::models::{Company, Employee, ProfileField, ProfileUpdate, WorkStatus};
use crate::permissions::Capability;
use crate::store::{Collections, MemoryStore};

use super::onboarding::normalize_email;
use super::salary::profile_or_default;
use super::{colleague, resolve_actor};

/// One line of the employee directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListing {
    /// Employee ID.
    pub id: Uuid,
    /// Login identifier.
    pub login_id: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// "First Last".
    pub full_name: String,
    /// Work email.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Avatar reference.
    pub avatar: Option<String>,
    /// Department.
    pub department: Option<String>,
    /// Job title.
    pub designation: Option<String>,
    /// Status for the listed day.
    pub work_status: WorkStatus,
    /// Check-in as `HH:MM`.
    pub check_in_time: Option<String>,
    /// Check-out as `HH:MM`.
    pub check_out_time: Option<String>,
}

/// An employee's profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    /// The employee record.
    pub profile: Employee,
    /// The employee's company.
    pub company: Company,
    /// Salary breakdown; only shown to the employee and to salary managers.
    pub salary: Option<SalaryComputation>,
}

/// Result of a profile edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateOutcome {
    /// The updated record.
    pub employee: Employee,
    /// Supplied fields the caller's role may not edit; left unchanged.
    pub ignored_fields: Vec<ProfileField>,
}

fn listing(data: &Collections, employee: &Employee, date: NaiveDate) -> EmployeeListing {
    let record = data.attendance_on(employee.id, date);
    let leaves = data.leaves_of(employee.id);
    let hhmm = |t: DateTime<Utc>| t.format("%H:%M").to_string();

    EmployeeListing {
        id: employee.id,
        login_id: employee.login_id.clone(),
        first_name: employee.first_name.clone(),
        last_name: employee.last_name.clone(),
        full_name: employee.full_name(),
        email: employee.email.clone(),
        phone: employee.phone.clone(),
        avatar: employee.avatar.clone(),
        department: employee.department.clone(),
        designation: employee.designation.clone(),
        work_status: resolve_work_status(date, record, &leaves),
        check_in_time: record.and_then(|r| r.check_in_time).map(hhmm),
        check_out_time: record.and_then(|r| r.check_out_time).map(hhmm),
    }
}

/// Active employees of the caller's company with today's status, ordered
/// by first then last name.
pub async fn list_employees(
    store: &MemoryStore,
    actor_id: Uuid,
    now: DateTime<Utc>,
) -> HrmsResult<Vec<EmployeeListing>> {
    let data = store.read().await;
    let actor = resolve_actor(&data, actor_id)?;
    let today = now.date_naive();

    let employees: Vec<EmployeeListing> = data
        .active_employees(actor.company_id)
        .into_iter()
        .map(|employee| listing(&data, employee, today))
        .collect();

    debug!(company_id = %actor.company_id, count = employees.len(), "Listed employees");
    Ok(employees)
}

/// One colleague's directory entry for today.
pub async fn get_employee(
    store: &MemoryStore,
    actor_id: Uuid,
    employee_id: Uuid,
    now: DateTime<Utc>,
) -> HrmsResult<EmployeeListing> {
    let data = store.read().await;
    let actor = resolve_actor(&data, actor_id)?;
    let employee = colleague(&data, &actor, employee_id)?;

    Ok(listing(&data, employee, now.date_naive()))
}

/// Returns an employee's profile with their company.
///
/// The salary breakdown is included for the employee themself and for
/// holders of `update_salary`; it is created from defaults if missing.
pub async fn get_profile(
    store: &MemoryStore,
    config: &HrmsConfig,
    actor_id: Uuid,
    employee_id: Uuid,
    now: DateTime<Utc>,
) -> HrmsResult<ProfileView> {
    let mut data = store.write().await;
    let actor = resolve_actor(&data, actor_id)?;
    let profile = colleague(&data, &actor, employee_id)?.clone();
    let company = data.company(profile.company_id)?.clone();

    let sees_salary = actor.id == employee_id
        || config.permissions.allows(actor.role, Capability::UpdateSalary);
    let salary = if sees_salary {
        let stored = profile_or_default(&mut data, config, employee_id, now)?;
        Some(recompute_salary(&stored, stored.updated_at)?)
    } else {
        None
    };

    Ok(ProfileView {
        profile,
        company,
        salary,
    })
}

fn require_present(field: &str, value: &str) -> HrmsResult<()> {
    if value.trim().is_empty() {
        return Err(HrmsError::InvalidInput {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Applies a partial profile edit.
///
/// Only the fields the caller's role may edit are written; the rest are
/// reported back as ignored. Employees without `edit_any_profile` may only
/// edit their own profile.
///
/// # Errors
///
/// - `PermissionDenied` when editing someone else without `edit_any_profile`
/// - `InvalidInput` if a name or login ID would become empty, or either
///   email is not an address
/// - `Conflict` if the login ID or email is taken in the company
pub async fn update_profile(
    store: &MemoryStore,
    config: &HrmsConfig,
    actor_id: Uuid,
    employee_id: Uuid,
    update: ProfileUpdate,
) -> HrmsResult<ProfileUpdateOutcome> {
    let mut data = store.write().await;
    let actor = resolve_actor(&data, actor_id)?;
    if actor.id != employee_id {
        config
            .permissions
            .require(&actor, Capability::EditAnyProfile)?;
    }

    let mut edited = colleague(&data, &actor, employee_id)?.clone();
    let ignored_fields =
        update.apply_to(&mut edited, |field| config.permissions.can_edit_field(actor.role, field));

    require_present("loginId", &edited.login_id)?;
    require_present("firstName", &edited.first_name)?;
    require_present("lastName", &edited.last_name)?;
    edited.email = normalize_email("email", &edited.email)?;
    edited.personal_email = match edited.personal_email.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(personal) => Some(normalize_email("personalEmail", personal)?),
    };

    data.ensure_unique_identity(
        edited.company_id,
        &edited.login_id,
        &edited.email,
        Some(edited.id),
    )?;
    *data.employee_mut(employee_id)? = edited.clone();

    info!(
        employee_id = %employee_id,
        updated_by = %actor.id,
        ignored = ignored_fields.len(),
        "Profile updated"
    );

    Ok(ProfileUpdateOutcome {
        employee: edited,
        ignored_fields,
    })
}
