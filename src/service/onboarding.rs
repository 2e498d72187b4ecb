//! Account lifecycle: company registration, employee creation and admin
//! management.
//!
//! Login IDs are generated here when the caller does not supply one.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::config::HrmsConfig;
use crate::error::{HrmsError, HrmsResult};
use crate::models::{Company, Employee, LeaveAllocation, Role};
use crate::permissions::Capability;
use crate::store::{Collections, MemoryStore};

use super::{colleague, resolve_actor};

/// A new tenant and its owner account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCompany {
    /// Display name of the company.
    pub company_name: String,
    /// Short code; defaults to the first two letters of the name.
    #[serde(default)]
    pub company_code: Option<String>,
    /// Owner's email.
    pub email: String,
    /// Owner's first name; defaults to "Super".
    #[serde(default)]
    pub first_name: Option<String>,
    /// Owner's last name; defaults to "Admin".
    #[serde(default)]
    pub last_name: Option<String>,
    /// Owner's phone.
    #[serde(default)]
    pub phone: Option<String>,
}

/// The created tenant and owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// The company.
    pub company: Company,
    /// The owner, with role `super_admin`.
    pub employee: Employee,
}

/// An employee to add to the caller's company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Work email; stored lower-cased.
    pub email: String,
    /// Login ID; generated from the company code, initials and joining
    /// year when absent.
    #[serde(default)]
    pub login_id: Option<String>,
    /// Role; defaults to `employee`.
    #[serde(default)]
    pub role: Option<Role>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Department.
    #[serde(default)]
    pub department: Option<String>,
    /// Job title.
    #[serde(default)]
    pub designation: Option<String>,
    /// Joining date; the year feeds the generated login ID.
    #[serde(default)]
    pub date_of_joining: Option<NaiveDate>,
}

/// An admin as shown to the company owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminListing {
    /// Employee ID.
    pub id: Uuid,
    /// Login identifier.
    pub login_id: String,
    /// Work email.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Always `admin`.
    pub role: Role,
    /// Whether the account can still sign in.
    pub is_active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl From<&Employee> for AdminListing {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            login_id: employee.login_id.clone(),
            email: employee.email.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            role: employee.role,
            is_active: employee.is_active,
            created_at: employee.created_at,
        }
    }
}

/// The active admins of a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminList {
    /// Admins, newest first.
    pub admins: Vec<AdminListing>,
    /// Number of admins listed.
    pub count: usize,
}

fn initials(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

/// Builds the next free login ID for the company, of the form
/// `{CODE}{FI}{LA}{YEAR}{SERIAL:04}`, e.g. `OIJODO20260001`.
pub(crate) fn generate_login_id(
    data: &Collections,
    company: &Company,
    first_name: &str,
    last_name: &str,
    year: i32,
) -> String {
    let prefix = format!(
        "{}{}{}{}",
        company.code,
        initials(first_name),
        initials(last_name),
        year
    );
    let taken = |candidate: &str| {
        data.employees
            .values()
            .any(|e| e.company_id == company.id && e.login_id == candidate)
    };

    let mut serial = 1u32;
    loop {
        let candidate = format!("{}{:04}", prefix, serial);
        if !taken(&candidate) {
            return candidate;
        }
        serial += 1;
    }
}

pub(crate) fn required(field: &str, value: &str) -> HrmsResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(HrmsError::InvalidInput {
            field: field.to_string(),
            message: "is required".to_string(),
        });
    }
    Ok(value.to_string())
}

/// Trims and lower-cases an email, which must contain `@`.
pub(crate) fn normalize_email(field: &str, email: &str) -> HrmsResult<String> {
    let email = required(field, email)?.to_lowercase();
    if !email.contains('@') {
        return Err(HrmsError::InvalidInput {
            field: field.to_string(),
            message: format!("'{}' is not an email address", email),
        });
    }
    Ok(email)
}

/// Creates a company together with its `super_admin` owner and the
/// owner's leave ledger.
///
/// # Errors
///
/// - `InvalidInput` for a blank company name or a malformed email
/// - `Conflict` if the company code is already registered
pub async fn register_company(
    store: &MemoryStore,
    config: &HrmsConfig,
    registration: RegisterCompany,
    now: DateTime<Utc>,
) -> HrmsResult<Registration> {
    let name = required("companyName", &registration.company_name)?;
    let code = match registration.company_code.as_deref() {
        Some(code) => required("companyCode", code)?,
        None => required("companyCode", &initials(&name))?,
    };
    let email = normalize_email("email", &registration.email)?;
    let first_name = registration.first_name.unwrap_or_else(|| "Super".to_string());
    let last_name = registration.last_name.unwrap_or_else(|| "Admin".to_string());

    let mut data = store.write().await;
    let company = Company::new(name, &code, now);
    data.insert_company(company.clone())?;

    let login_id = generate_login_id(&data, &company, &first_name, &last_name, now.year());
    let mut owner = Employee::new(
        company.id,
        login_id,
        Role::SuperAdmin,
        first_name,
        last_name,
        email,
        now,
    );
    owner.phone = registration.phone;
    owner.date_of_joining = Some(now.date_naive());
    owner.year_of_joining = Some(now.year());

    if let Err(error) = data.insert_employee(owner.clone()) {
        data.companies.remove(&company.id);
        return Err(error);
    }
    data.allocations.insert(
        owner.id,
        LeaveAllocation::new(owner.id, now.year(), &config.leave, now),
    );

    info!(
        company_id = %company.id,
        company_code = %company.code,
        owner_id = %owner.id,
        "Company registered"
    );

    Ok(Registration {
        company,
        employee: owner,
    })
}

/// Adds an employee to the caller's company with a default leave ledger.
///
/// The salary profile is created lazily on first access.
///
/// # Errors
///
/// - `PermissionDenied` without `manage_employees`, or when anyone but a
///   `super_admin` asks for an `admin`
/// - `InvalidInput` for blank names, a malformed email or a
///   `super_admin` role
/// - `Conflict` if the login ID or email is taken in the company
pub async fn create_employee(
    store: &MemoryStore,
    config: &HrmsConfig,
    actor_id: Uuid,
    request: NewEmployee,
    now: DateTime<Utc>,
) -> HrmsResult<Employee> {
    let mut data = store.write().await;
    let actor = resolve_actor(&data, actor_id)?;
    config
        .permissions
        .require(&actor, Capability::ManageEmployees)?;

    let role = request.role.unwrap_or(Role::Employee);
    match role {
        Role::Employee => {}
        Role::Admin if actor.role == Role::SuperAdmin => {}
        Role::Admin => {
            return Err(HrmsError::PermissionDenied {
                action: "only a super_admin may create admins".to_string(),
            });
        }
        Role::SuperAdmin => {
            return Err(HrmsError::InvalidInput {
                field: "role".to_string(),
                message: "a company has exactly one super_admin".to_string(),
            });
        }
    }

    let first_name = required("firstName", &request.first_name)?;
    let last_name = required("lastName", &request.last_name)?;
    let email = normalize_email("email", &request.email)?;
    let company = data.company(actor.company_id)?.clone();
    let joined = request.date_of_joining.unwrap_or_else(|| now.date_naive());

    let login_id = match request.login_id.as_deref() {
        Some(login_id) => required("loginId", login_id)?,
        None => generate_login_id(&data, &company, &first_name, &last_name, joined.year()),
    };

    let mut employee = Employee::new(
        company.id,
        login_id,
        role,
        first_name,
        last_name,
        email,
        now,
    );
    employee.phone = request.phone;
    employee.department = request.department;
    employee.designation = request.designation;
    employee.date_of_joining = Some(joined);
    employee.year_of_joining = Some(joined.year());

    data.insert_employee(employee.clone())?;
    data.allocations.insert(
        employee.id,
        LeaveAllocation::new(employee.id, now.year(), &config.leave, now),
    );

    info!(
        employee_id = %employee.id,
        login_id = %employee.login_id,
        role = %employee.role,
        created_by = %actor.id,
        "Employee created"
    );

    Ok(employee)
}

/// Lists the active admins of the caller's company, newest first.
///
/// # Errors
///
/// - `PermissionDenied` without `manage_admins`
pub async fn list_admins(
    store: &MemoryStore,
    config: &HrmsConfig,
    actor_id: Uuid,
) -> HrmsResult<AdminList> {
    let data = store.read().await;
    let actor = resolve_actor(&data, actor_id)?;
    config.permissions.require(&actor, Capability::ManageAdmins)?;

    let mut admins: Vec<AdminListing> = data
        .active_employees(actor.company_id)
        .into_iter()
        .filter(|e| e.role == Role::Admin)
        .map(AdminListing::from)
        .collect();
    admins.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.login_id.cmp(&b.login_id))
    });

    Ok(AdminList {
        count: admins.len(),
        admins,
    })
}

/// Deactivates an admin of the caller's company.
///
/// The account is kept but can no longer act and drops out of every
/// listing. Deactivating an inactive admin is a no-op.
///
/// # Errors
///
/// - `PermissionDenied` without `manage_admins`
/// - `EmployeeNotFound` if the target is not an admin of the caller's company
pub async fn deactivate_admin(
    store: &MemoryStore,
    config: &HrmsConfig,
    actor_id: Uuid,
    admin_id: Uuid,
) -> HrmsResult<Employee> {
    let mut data = store.write().await;
    let actor = resolve_actor(&data, actor_id)?;
    config.permissions.require(&actor, Capability::ManageAdmins)?;

    if colleague(&data, &actor, admin_id)?.role != Role::Admin {
        return Err(HrmsError::EmployeeNotFound {
            employee_id: admin_id,
        });
    }

    let admin = data.employee_mut(admin_id)?;
    admin.is_active = false;
    let admin = admin.clone();

    info!(
        admin_id = %admin_id,
        deactivated_by = %actor.id,
        "Admin deactivated"
    );

    Ok(admin)
}
