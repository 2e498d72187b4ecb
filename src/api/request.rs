//! Request types for the DayFlow HRMS API.
//!
//! JSON bodies reuse the service input types directly (`SalaryUpdate`,
//! `ProfileUpdate`, `LeaveApplication`, ...). This module holds the query
//! strings, the review body and the caller identity header.

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::{HrmsError, HrmsResult};
use crate::models::LeaveStatus;

/// Header carrying the caller's employee ID.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Reads the caller's employee ID from [`USER_ID_HEADER`].
///
/// Whether the ID belongs to an active employee is checked by the service.
pub fn caller_id(headers: &HeaderMap, correlation_id: Uuid) -> HrmsResult<Uuid> {
    let Some(value) = headers.get(USER_ID_HEADER) else {
        warn!(correlation_id = %correlation_id, "Request without caller identity");
        return Err(HrmsError::Unauthenticated {
            message: format!("missing {} header", USER_ID_HEADER),
        });
    };

    value
        .to_str()
        .ok()
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
        .ok_or_else(|| {
            warn!(correlation_id = %correlation_id, "Unparseable caller identity");
            HrmsError::Unauthenticated {
                message: format!("{} must be a UUID", USER_ID_HEADER),
            }
        })
}

/// Query string of the search-only listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive match on name, email or login ID.
    #[serde(default)]
    pub search: Option<String>,
}

/// Query string of `GET /api/leave/admin`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveQueueQuery {
    /// Only requests in this state.
    #[serde(default)]
    pub status: Option<LeaveStatus>,
    /// Case-insensitive match on the requester.
    #[serde(default)]
    pub search: Option<String>,
}

/// Body of the approve and reject endpoints. May be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    /// Reviewer's comment stored on the request.
    #[serde(default)]
    pub admin_comment: Option<String>,
}
