//! Role-based access policy.
//!
//! Which actions a role may perform and which profile fields it may edit
//! are data, not inline conditionals: a [`CapabilityTable`] is loaded with
//! the rest of the configuration and handed to every handler through the
//! application state.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{HrmsError, HrmsResult};
use crate::models::{Employee, ProfileField, Role};

/// An action guarded by the access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Edit profiles other than one's own.
    EditAnyProfile,
    /// Change wage and salary component configuration.
    UpdateSalary,
    /// Approve or reject leave requests.
    ReviewLeave,
    /// List every leave request in the company.
    ViewLeaveQueue,
    /// Read another employee's leave ledger.
    ViewLeaveAllocations,
    /// Read the company-wide daily attendance sheet.
    ViewCompanyAttendance,
    /// Create employees.
    ManageEmployees,
    /// List and deactivate the company's admins.
    ManageAdmins,
}

/// Capabilities and editable profile fields granted to one role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePolicy {
    /// Actions the role may perform.
    #[serde(default)]
    pub capabilities: HashSet<Capability>,
    /// Profile fields the role may write.
    #[serde(default)]
    pub editable_fields: HashSet<ProfileField>,
}

/// Per-role capability table.
///
/// Roles missing from the table have no capabilities and may edit nothing.
///
/// # Example
///
/// ```
/// use dayflow_hrms::models::{ProfileField, Role};
/// use dayflow_hrms::permissions::{Capability, CapabilityTable};
///
/// let table = CapabilityTable::default();
/// assert!(table.allows(Role::Admin, Capability::ReviewLeave));
/// assert!(!table.allows(Role::Employee, Capability::UpdateSalary));
/// assert!(table.can_edit_field(Role::Employee, ProfileField::Phone));
/// assert!(!table.can_edit_field(Role::Employee, ProfileField::BankAccountNumber));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityTable {
    /// Policy per role.
    pub roles: HashMap<Role, RolePolicy>,
}

const EMPLOYEE_FIELDS: [ProfileField; 10] = [
    ProfileField::FirstName,
    ProfileField::LastName,
    ProfileField::Email,
    ProfileField::Phone,
    ProfileField::Department,
    ProfileField::Location,
    ProfileField::Manager,
    ProfileField::Avatar,
    ProfileField::About,
    ProfileField::Interests,
];

const ALL_FIELDS: [ProfileField; 29] = [
    ProfileField::LoginId,
    ProfileField::FirstName,
    ProfileField::LastName,
    ProfileField::Email,
    ProfileField::Phone,
    ProfileField::Avatar,
    ProfileField::Designation,
    ProfileField::Department,
    ProfileField::Manager,
    ProfileField::Location,
    ProfileField::DateOfBirth,
    ProfileField::ResidingAddress,
    ProfileField::Nationality,
    ProfileField::PersonalEmail,
    ProfileField::Gender,
    ProfileField::MaritalStatus,
    ProfileField::DateOfJoining,
    ProfileField::YearOfJoining,
    ProfileField::BankAccountNumber,
    ProfileField::BankName,
    ProfileField::IfscCode,
    ProfileField::PanNumber,
    ProfileField::UanNumber,
    ProfileField::EmployeeCode,
    ProfileField::About,
    ProfileField::JobDescription,
    ProfileField::Interests,
    ProfileField::Skills,
    ProfileField::Certifications,
];

impl Default for CapabilityTable {
    fn default() -> Self {
        let employee = RolePolicy {
            capabilities: HashSet::new(),
            editable_fields: EMPLOYEE_FIELDS.into_iter().collect(),
        };

        let admin = RolePolicy {
            capabilities: [
                Capability::EditAnyProfile,
                Capability::UpdateSalary,
                Capability::ReviewLeave,
                Capability::ViewLeaveQueue,
                Capability::ViewLeaveAllocations,
                Capability::ViewCompanyAttendance,
                Capability::ManageEmployees,
            ]
            .into_iter()
            .collect(),
            editable_fields: ALL_FIELDS.into_iter().collect(),
        };

        let super_admin = RolePolicy {
            capabilities: [
                Capability::EditAnyProfile,
                Capability::UpdateSalary,
                Capability::ViewCompanyAttendance,
                Capability::ManageEmployees,
                Capability::ManageAdmins,
            ]
            .into_iter()
            .collect(),
            editable_fields: EMPLOYEE_FIELDS.into_iter().collect(),
        };

        Self {
            roles: HashMap::from([
                (Role::Employee, employee),
                (Role::Admin, admin),
                (Role::SuperAdmin, super_admin),
            ]),
        }
    }
}

impl CapabilityTable {
    /// Returns true if `role` holds `capability`.
    pub fn allows(&self, role: Role, capability: Capability) -> bool {
        self.roles
            .get(&role)
            .is_some_and(|policy| policy.capabilities.contains(&capability))
    }

    /// Returns true if `role` may write `field`.
    pub fn can_edit_field(&self, role: Role, field: ProfileField) -> bool {
        self.roles
            .get(&role)
            .is_some_and(|policy| policy.editable_fields.contains(&field))
    }

    /// Fails with `PermissionDenied` unless the actor holds `capability`.
    pub fn require(&self, actor: &Employee, capability: Capability) -> HrmsResult<()> {
        if self.allows(actor.role, capability) {
            Ok(())
        } else {
            Err(HrmsError::PermissionDenied {
                action: format!("{} requires {:?}", actor.role, capability),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn create_actor(role: Role) -> Employee {
        Employee::new(Uuid::nil(), "LOGIN", role, "Ada", "Lovelace", "ada@example.com", Utc::now())
    }

    #[test]
    fn test_admin_holds_company_capabilities() {
        let table = CapabilityTable::default();
        for capability in [
            Capability::EditAnyProfile,
            Capability::UpdateSalary,
            Capability::ReviewLeave,
            Capability::ViewLeaveQueue,
            Capability::ViewLeaveAllocations,
            Capability::ViewCompanyAttendance,
            Capability::ManageEmployees,
        ] {
            assert!(table.allows(Role::Admin, capability), "{:?}", capability);
        }
    }

    #[test]
    fn test_super_admin_cannot_review_leave() {
        let table = CapabilityTable::default();
        assert!(table.allows(Role::SuperAdmin, Capability::UpdateSalary));
        assert!(!table.allows(Role::SuperAdmin, Capability::ReviewLeave));
    }

    #[test]
    fn test_only_super_admin_manages_admins() {
        let table = CapabilityTable::default();
        assert!(table.allows(Role::SuperAdmin, Capability::ManageAdmins));
        assert!(!table.allows(Role::Admin, Capability::ManageAdmins));
        assert!(!table.allows(Role::Employee, Capability::ManageAdmins));
    }

    #[test]
    fn test_admin_edits_every_profile_field() {
        let table = CapabilityTable::default();
        for field in ALL_FIELDS {
            assert!(table.can_edit_field(Role::Admin, field), "{:?}", field);
        }
        assert!(table.can_edit_field(Role::Admin, ProfileField::UanNumber));
        assert!(!table.can_edit_field(Role::Employee, ProfileField::Certifications));
    }

    #[test]
    fn test_employee_editable_fields() {
        let table = CapabilityTable::default();
        assert!(table.can_edit_field(Role::Employee, ProfileField::FirstName));
        assert!(table.can_edit_field(Role::Employee, ProfileField::Interests));
        assert!(!table.can_edit_field(Role::Employee, ProfileField::Designation));
        assert!(!table.can_edit_field(Role::Employee, ProfileField::LoginId));
        assert!(table.can_edit_field(Role::Admin, ProfileField::LoginId));
    }

    #[test]
    fn test_require_returns_permission_denied() {
        let table = CapabilityTable::default();
        let actor = create_actor(Role::Employee);

        match table.require(&actor, Capability::ReviewLeave) {
            Err(HrmsError::PermissionDenied { action }) => {
                assert!(action.contains("employee"));
                assert!(action.contains("ReviewLeave"));
            }
            other => panic!("Expected PermissionDenied, got {:?}", other),
        }
        assert!(table.require(&create_actor(Role::Admin), Capability::ReviewLeave).is_ok());
    }

    #[test]
    fn test_missing_role_has_nothing() {
        let table = CapabilityTable {
            roles: HashMap::new(),
        };
        assert!(!table.allows(Role::Admin, Capability::ReviewLeave));
        assert!(!table.can_edit_field(Role::Admin, ProfileField::Phone));
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let yaml = r#"
roles:
  employee:
    editable_fields: [phone, about]
  admin:
    capabilities: [review_leave, view_leave_queue]
    editable_fields: [designation]
"#;
        let table: CapabilityTable = serde_yaml::from_str(yaml).unwrap();

        assert!(table.can_edit_field(Role::Employee, ProfileField::Phone));
        assert!(!table.can_edit_field(Role::Employee, ProfileField::FirstName));
        assert!(table.allows(Role::Admin, Capability::ReviewLeave));
        assert!(!table.allows(Role::Admin, Capability::UpdateSalary));
        assert!(!table.allows(Role::SuperAdmin, Capability::UpdateSalary));
    }
}
