//! Employee model and related types.
//!
//! This module defines the Employee struct, the Role enum used by the
//! access policy, and the partial [`ProfileUpdate`] applied by the profile
//! editor.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a user within a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform-level administrator.
    SuperAdmin,
    /// Company administrator / HR officer.
    Admin,
    /// Regular employee.
    Employee,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::SuperAdmin => write!(f, "super_admin"),
            Role::Admin => write!(f, "admin"),
            Role::Employee => write!(f, "employee"),
        }
    }
}

/// Gender as recorded on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Other.
    Other,
}

/// Marital status as recorded on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    /// Single.
    Single,
    /// Married.
    Married,
    /// Divorced.
    Divorced,
    /// Widowed.
    Widowed,
}

/// A professional certification held by an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    /// Certification name.
    pub name: String,
    /// Issuing body.
    #[serde(default)]
    pub issuer: Option<String>,
    /// Date issued.
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,
    /// Date it lapses, if ever.
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    /// Certificate number.
    #[serde(default)]
    pub certificate_number: Option<String>,
}

/// Represents a person employed by a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: Uuid,
    /// The company the employee belongs to.
    pub company_id: Uuid,
    /// Login identifier, unique within the company.
    pub login_id: String,
    /// Role used by the access policy.
    pub role: Role,
    /// Inactive employees are hidden from directories.
    pub is_active: bool,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Work email, unique within the company.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Avatar URL.
    pub avatar: Option<String>,
    /// Job title.
    pub designation: Option<String>,
    /// Department name.
    pub department: Option<String>,
    /// Manager's name.
    pub manager: Option<String>,
    /// Work location.
    pub location: Option<String>,
    /// Date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Home address.
    pub residing_address: Option<String>,
    /// Nationality.
    pub nationality: Option<String>,
    /// Personal (non-work) email.
    pub personal_email: Option<String>,
    /// Gender.
    pub gender: Option<Gender>,
    /// Marital status.
    pub marital_status: Option<MaritalStatus>,
    /// Date the employee joined.
    pub date_of_joining: Option<NaiveDate>,
    /// Year the employee joined; feeds the login ID.
    pub year_of_joining: Option<i32>,
    /// Bank account number.
    pub bank_account_number: Option<String>,
    /// Bank name.
    pub bank_name: Option<String>,
    /// Bank branch IFSC code.
    pub ifsc_code: Option<String>,
    /// Tax identifier.
    pub pan_number: Option<String>,
    /// Universal account number for the provident fund.
    pub uan_number: Option<String>,
    /// Internal employee code.
    pub employee_code: Option<String>,
    /// Free-form "about me".
    pub about: Option<String>,
    /// Free-form job description.
    pub job_description: Option<String>,
    /// Free-form interests.
    pub interests: Option<String>,
    /// Skills list.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Certifications held.
    #[serde(default)]
    pub certifications: Vec<Certification>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Employee {
    /// Returns "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive match against name, email and login id.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use dayflow_hrms::models::{Employee, Role};
    /// use uuid::Uuid;
    ///
    /// let employee = Employee::new(Uuid::nil(), "OIJODO20260001", Role::Employee, "John", "Doe", "john@odoo.com", Utc::now());
    /// assert!(employee.matches_search("JOHN"));
    /// assert!(employee.matches_search("oijodo"));
    /// assert!(!employee.matches_search("jane"));
    /// ```
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.login_id,
        ]
        .iter()
        .any(|value| value.to_lowercase().contains(&query))
    }

    /// Creates an active employee with only the identity fields set.
    pub fn new(
        company_id: Uuid,
        login_id: impl Into<String>,
        role: Role,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id,
            login_id: login_id.into(),
            role,
            is_active: true,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: None,
            avatar: None,
            designation: None,
            department: None,
            manager: None,
            location: None,
            date_of_birth: None,
            residing_address: None,
            nationality: None,
            personal_email: None,
            gender: None,
            marital_status: None,
            date_of_joining: None,
            year_of_joining: None,
            bank_account_number: None,
            bank_name: None,
            ifsc_code: None,
            pan_number: None,
            uan_number: None,
            employee_code: None,
            about: None,
            job_description: None,
            interests: None,
            skills: vec![],
            certifications: vec![],
            created_at: now,
        }
    }
}

/// An editable profile field, as named on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    /// `loginId`
    LoginId,
    /// `firstName`
    FirstName,
    /// `lastName`
    LastName,
    /// `email`
    Email,
    /// `phone`
    Phone,
    /// `avatar`
    Avatar,
    /// `designation`
    Designation,
    /// `department`
    Department,
    /// `manager`
    Manager,
    /// `location`
    Location,
    /// `dateOfBirth`
    DateOfBirth,
    /// `residingAddress`
    ResidingAddress,
    /// `nationality`
    Nationality,
    /// `personalEmail`
    PersonalEmail,
    /// `gender`
    Gender,
    /// `maritalStatus`
    MaritalStatus,
    /// `dateOfJoining`
    DateOfJoining,
    /// `yearOfJoining`
    YearOfJoining,
    /// `bankAccountNumber`
    BankAccountNumber,
    /// `bankName`
    BankName,
    /// `ifscCode`
    IfscCode,
    /// `panNumber`
    PanNumber,
    /// `uanNumber`
    UanNumber,
    /// `employeeCode`
    EmployeeCode,
    /// `about`
    About,
    /// `jobDescription`
    JobDescription,
    /// `interests`
    Interests,
    /// `skills`
    Skills,
    /// `certifications`
    Certifications,
}

/// Partial edit of an employee profile. Absent fields are left unchanged.
///
/// Fields mirror [`Employee`].
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub login_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub manager: Option<String>,
    pub location: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub residing_address: Option<String>,
    pub nationality: Option<String>,
    pub personal_email: Option<String>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
    pub date_of_joining: Option<NaiveDate>,
    pub year_of_joining: Option<i32>,
    pub bank_account_number: Option<String>,
    pub bank_name: Option<String>,
    pub ifsc_code: Option<String>,
    pub pan_number: Option<String>,
    pub uan_number: Option<String>,
    pub employee_code: Option<String>,
    pub about: Option<String>,
    pub job_description: Option<String>,
    pub interests: Option<String>,
    pub skills: Option<Vec<String>>,
    pub certifications: Option<Vec<Certification>>,
}

impl ProfileUpdate {
    /// Applies every supplied field the predicate allows.
    ///
    /// Returns the supplied fields that were not allowed, in field order.
    pub fn apply_to(
        self,
        employee: &mut Employee,
        allowed: impl Fn(ProfileField) -> bool,
    ) -> Vec<ProfileField> {
        let mut ignored = Vec::new();

        macro_rules! apply {
            ($field:ident, $variant:ident, required) => {
                if let Some(value) = self.$field {
                    if allowed(ProfileField::$variant) {
                        employee.$field = value;
                    } else {
                        ignored.push(ProfileField::$variant);
                    }
                }
            };
            ($field:ident, $variant:ident) => {
                if let Some(value) = self.$field {
                    if allowed(ProfileField::$variant) {
                        employee.$field = Some(value);
                    } else {
                        ignored.push(ProfileField::$variant);
                    }
                }
            };
        }

        apply!(login_id, LoginId, required);
        apply!(first_name, FirstName, required);
        apply!(last_name, LastName, required);
        apply!(email, Email, required);
        apply!(phone, Phone);
        apply!(avatar, Avatar);
        apply!(designation, Designation);
        apply!(department, Department);
        apply!(manager, Manager);
        apply!(location, Location);
        apply!(date_of_birth, DateOfBirth);
        apply!(residing_address, ResidingAddress);
        apply!(nationality, Nationality);
        apply!(personal_email, PersonalEmail);
        apply!(gender, Gender);
        apply!(marital_status, MaritalStatus);
        apply!(date_of_joining, DateOfJoining);
        apply!(year_of_joining, YearOfJoining);
        apply!(bank_account_number, BankAccountNumber);
        apply!(bank_name, BankName);
        apply!(ifsc_code, IfscCode);
        apply!(pan_number, PanNumber);
        apply!(uan_number, UanNumber);
        apply!(employee_code, EmployeeCode);
        apply!(about, About);
        apply!(job_description, JobDescription);
        apply!(interests, Interests);
        apply!(skills, Skills, required);
        apply!(certifications, Certifications, required);

        ignored
    }
}
