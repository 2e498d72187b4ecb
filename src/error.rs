//! Error types for the DayFlow HRMS engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing salaries,
//! recording attendance and managing leave.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{LeaveStatus, LeaveType};

/// The main error type for the HRMS engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use dayflow_hrms::error::HrmsError;
///
/// let error = HrmsError::ConfigNotFound {
///     path: "/missing/salary.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/salary.yaml");
/// ```
#[derive(Debug, Error)]
pub enum HrmsError {
    /// Configuration file or directory was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A salary profile is structurally unusable for computation.
    #[error("Invalid salary profile field '{field}': {message}")]
    InvalidProfile {
        /// The offending field, in dotted wire notation.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A request carried an invalid value.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No employee exists with the given ID.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The ID that was looked up.
        employee_id: Uuid,
    },

    /// No company exists with the given ID.
    #[error("Company not found: {company_id}")]
    CompanyNotFound {
        /// The ID that was looked up.
        company_id: Uuid,
    },

    /// No leave request exists with the given ID.
    #[error("Leave request not found: {leave_id}")]
    LeaveNotFound {
        /// The ID that was looked up.
        leave_id: Uuid,
    },

    /// The leave request has already left the pending state.
    #[error("Leave request {leave_id} is already {status}")]
    LeaveAlreadyReviewed {
        /// The leave request ID.
        leave_id: Uuid,
        /// The status the request is currently in.
        status: LeaveStatus,
    },

    /// Not enough balance remains for the requested leave.
    #[error("Insufficient {leave_type} balance: requested {requested} days, available {available} days")]
    InsufficientLeaveBalance {
        /// The leave category requested.
        leave_type: LeaveType,
        /// Days requested.
        requested: u32,
        /// Days still available.
        available: u32,
    },

    /// The employee has already checked in on this date.
    #[error("Already checked in on {date}")]
    AlreadyCheckedIn {
        /// The attendance date.
        date: NaiveDate,
    },

    /// Check-out was attempted without a check-in.
    #[error("No check-in recorded on {date}")]
    NotCheckedIn {
        /// The attendance date.
        date: NaiveDate,
    },

    /// The employee has already checked out on this date.
    #[error("Already checked out on {date}")]
    AlreadyCheckedOut {
        /// The attendance date.
        date: NaiveDate,
    },

    /// Check-in was attempted on a day covered by approved leave.
    #[error("Cannot check in on {date} while on approved leave")]
    OnApprovedLeave {
        /// The attendance date.
        date: NaiveDate,
    },

    /// The caller could not be identified.
    #[error("Unauthenticated: {message}")]
    Unauthenticated {
        /// Why identification failed.
        message: String,
    },

    /// The caller lacks the capability for this action.
    #[error("Permission denied: {action}")]
    PermissionDenied {
        /// The action that was refused.
        action: String,
    },

    /// A uniqueness constraint would be violated.
    #[error("Conflict: {message}")]
    Conflict {
        /// A description of the conflicting value.
        message: String,
    },
}

/// A type alias for Results that return HrmsError.
pub type HrmsResult<T> = Result<T, HrmsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = HrmsError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = HrmsError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_profile_displays_field_and_message() {
        let error = HrmsError::InvalidProfile {
            field: "components.basicSalary.percentage".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid salary profile field 'components.basicSalary.percentage': must not be negative"
        );
    }

    #[test]
    fn test_insufficient_balance_displays_leave_type() {
        let error = HrmsError::InsufficientLeaveBalance {
            leave_type: LeaveType::PaidTimeOff,
            requested: 5,
            available: 4,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient paid time off balance: requested 5 days, available 4 days"
        );
    }

    #[test]
    fn test_leave_already_reviewed_displays_status() {
        let id = Uuid::nil();
        let error = HrmsError::LeaveAlreadyReviewed {
            leave_id: id,
            status: LeaveStatus::Approved,
        };
        assert_eq!(
            error.to_string(),
            format!("Leave request {} is already approved", id)
        );
    }

    #[test]
    fn test_already_checked_in_displays_date() {
        let error = HrmsError::AlreadyCheckedIn {
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        };
        assert_eq!(error.to_string(), "Already checked in on 2026-03-02");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<HrmsError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> HrmsResult<()> {
            Err(HrmsError::EmployeeNotFound {
                employee_id: Uuid::nil(),
            })
        }

        fn propagates_error() -> HrmsResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
