//! HTTP API module for the DayFlow HRMS engine.
//!
//! This module provides the REST endpoints for onboarding, profiles and
//! salaries, attendance and leave. Callers identify themselves with the
//! `x-user-id` header.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{LeaveQueueQuery, ReviewRequest, SearchQuery, USER_ID_HEADER, caller_id};
pub use response::{ApiError, ApiErrorResponse, SalaryResponse};
pub use state::AppState;
