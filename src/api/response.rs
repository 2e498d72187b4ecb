//! Response types for the DayFlow HRMS API.
//!
//! This module defines the error body returned by every endpoint and the
//! mapping from domain errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::{SalaryComputation, SalaryTotals};
use crate::error::HrmsError;

/// Salary breakdown with its monthly totals rounded for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryResponse {
    /// The recomputed profile, overcommit flag and audit trace.
    #[serde(flatten)]
    pub computation: SalaryComputation,
    /// Gross, deductions and net, to two decimal places.
    pub totals: SalaryTotals,
}

impl From<SalaryComputation> for SalaryResponse {
    fn from(computation: SalaryComputation) -> Self {
        let totals = computation.rounded_totals();
        Self {
            computation,
            totals,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<HrmsError> for ApiErrorResponse {
    fn from(error: HrmsError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            HrmsError::ConfigNotFound { .. } | HrmsError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            HrmsError::InvalidProfile { .. } => (StatusCode::BAD_REQUEST, "INVALID_PROFILE"),
            HrmsError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            HrmsError::InsufficientLeaveBalance { .. } => {
                (StatusCode::BAD_REQUEST, "INSUFFICIENT_LEAVE_BALANCE")
            }
            HrmsError::AlreadyCheckedIn { .. } => (StatusCode::BAD_REQUEST, "ALREADY_CHECKED_IN"),
            HrmsError::NotCheckedIn { .. } => (StatusCode::BAD_REQUEST, "NOT_CHECKED_IN"),
            HrmsError::AlreadyCheckedOut { .. } => {
                (StatusCode::BAD_REQUEST, "ALREADY_CHECKED_OUT")
            }
            HrmsError::OnApprovedLeave { .. } => (StatusCode::BAD_REQUEST, "ON_APPROVED_LEAVE"),
            HrmsError::EmployeeNotFound { .. } => (StatusCode::NOT_FOUND, "EMPLOYEE_NOT_FOUND"),
            HrmsError::CompanyNotFound { .. } => (StatusCode::NOT_FOUND, "COMPANY_NOT_FOUND"),
            HrmsError::LeaveNotFound { .. } => (StatusCode::NOT_FOUND, "LEAVE_NOT_FOUND"),
            HrmsError::LeaveAlreadyReviewed { .. } => {
                (StatusCode::CONFLICT, "LEAVE_ALREADY_REVIEWED")
            }
            HrmsError::Conflict { .. } => (StatusCode::CONFLICT, "CONFLICT"),
            HrmsError::Unauthenticated { .. } => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            HrmsError::PermissionDenied { .. } => (StatusCode::FORBIDDEN, "PERMISSION_DENIED"),
        };

        let error = match error {
            HrmsError::InvalidProfile { field, .. } | HrmsError::InvalidInput { field, .. } => {
                ApiError::with_details(code, message, format!("field: {}", field))
            }
            HrmsError::ConfigNotFound { .. } | HrmsError::ConfigParseError { .. } => {
                ApiError::with_details(code, "Configuration error", message)
            }
            _ => ApiError::new(code, message),
        };

        ApiErrorResponse { status, error }
    }
}
