//! HTTP request handlers for the DayFlow HRMS API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! handler tags the request with a correlation ID, resolves the caller from
//! the `x-user-id` header, delegates to a service function and maps the
//! result to a JSON response.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::SalaryUpdate;
use crate::error::HrmsResult;
use crate::models::ProfileUpdate;
use crate::service::{self, LeaveApplication, LeaveDecision, NewEmployee, RegisterCompany};

use super::request::{LeaveQueueQuery, ReviewRequest, SearchQuery, caller_id};
use super::response::{ApiError, ApiErrorResponse, SalaryResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/companies", post(register_company_handler))
        .route(
            "/api/employees",
            get(list_employees_handler).post(create_employee_handler),
        )
        .route("/api/employees/:id", get(get_employee_handler))
        .route("/api/admins", get(list_admins_handler))
        .route("/api/admins/:id", delete(deactivate_admin_handler))
        .route(
            "/api/profile/:id",
            get(get_profile_handler).put(update_profile_handler),
        )
        .route(
            "/api/profile/:id/salary",
            get(get_salary_handler).put(update_salary_handler),
        )
        .route("/api/attendance/check-in", post(check_in_handler))
        .route("/api/attendance/check-out", post(check_out_handler))
        .route("/api/attendance/today", get(today_attendance_handler))
        .route(
            "/api/attendance/employee/:month",
            get(monthly_attendance_handler),
        )
        .route("/api/attendance/admin/:date", get(company_attendance_handler))
        .route("/api/leave/apply", post(apply_leave_handler))
        .route("/api/leave/employee", get(employee_leaves_handler))
        .route("/api/leave/admin", get(leave_queue_handler))
        .route("/api/leave/:id/approve", put(approve_leave_handler))
        .route("/api/leave/:id/reject", put(reject_leave_handler))
        .route(
            "/api/leave/allocation/:employee_id",
            get(leave_allocation_handler),
        )
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a service result to a response, logging the outcome.
fn reply<T: Serialize>(
    correlation_id: Uuid,
    operation: &'static str,
    started: Instant,
    status: StatusCode,
    result: HrmsResult<T>,
) -> Result<Response, ApiErrorResponse> {
    let duration_us = started.elapsed().as_micros();
    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                operation,
                duration_us,
                "Request completed"
            );
            Ok(json_response(status, body))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                duration_us,
                error = %err,
                "Request failed"
            );
            Err(err.into())
        }
    }
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn read_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::validation_error(body_text)
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

fn read_path<T>(
    path: Result<Path<T>, PathRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    path.map(|Path(value)| value).map_err(|rejection| {
        warn!(
            correlation_id = %correlation_id,
            error = %rejection.body_text(),
            "Invalid path parameter"
        );
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })
}

fn read_query<T>(
    query: Result<Query<T>, QueryRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    query.map(|Query(value)| value).map_err(|rejection| {
        warn!(
            correlation_id = %correlation_id,
            error = %rejection.body_text(),
            "Invalid query string"
        );
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })
}

/// Handler for GET /health.
async fn health_handler() -> Response {
    json_response(
        StatusCode::OK,
        json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }),
    )
}

/// Handler for POST /api/companies. The only unauthenticated write.
async fn register_company_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterCompany>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing company registration");

    let registration = read_json(payload, correlation_id)?;
    let result =
        service::register_company(state.store(), state.config(), registration, Utc::now()).await;
    reply(correlation_id, "register_company", started, StatusCode::CREATED, result)
}

/// Handler for GET /api/employees.
async fn list_employees_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    let actor = caller_id(&headers, correlation_id)?;
    info!(correlation_id = %correlation_id, actor_id = %actor, "Listing employees");

    let result = service::list_employees(state.store(), actor, Utc::now()).await;
    reply(correlation_id, "list_employees", started, StatusCode::OK, result)
}

/// Handler for POST /api/employees.
async fn create_employee_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    let actor = caller_id(&headers, correlation_id)?;
    info!(correlation_id = %correlation_id, actor_id = %actor, "Creating employee");

    let request = read_json(payload, correlation_id)?;
    let result =
        service::create_employee(state.store(), state.config(), actor, request, Utc::now()).await;
    reply(correlation_id, "create_employee", started, StatusCode::CREATED, result)
}

/// Handler for GET /api/admins.
async fn list_admins_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    let actor = caller_id(&headers, correlation_id)?;

    let result = service::list_admins(state.store(), state.config(), actor).await;
    reply(correlation_id, "list_admins", started, StatusCode::OK, result)
}

/// Handler for DELETE /api/admins/{id}.
///
/// Deactivates rather than deletes.
async fn deactivate_admin_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    let actor = caller_id(&headers, correlation_id)?;
    let admin_id = read_path(path, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        actor_id = %actor,
        admin_id = %admin_id,
        "Deactivating admin"
    );

    let result = service::deactivate_admin(state.store(), state.config(), actor, admin_id).await;
    reply(correlation_id, "deactivate_admin", started, StatusCode::OK, result)
}

/// Handler for GET /api/employees/{id}.
async fn get_employee_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    let actor = caller_id(&headers, correlation_id)?;
    let employee_id = read_path(path, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        actor_id = %actor,
        employee_id = %employee_id,
        "Fetching employee"
    );

    let result = service::get_employee(state.store(), actor, employee_id, Utc::now()).await;
    reply(correlation_id, "get_employee", started, StatusCode::OK, result)
}

/// Handler for GET /api/profile/{id}.
async fn get_profile_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    let actor = caller_id(&headers, correlation_id)?;
    let employee_id = read_path(path, correlation_id)?;

    let result =
        service::get_profile(state.store(), state.config(), actor, employee_id, Utc::now()).await;
    reply(correlation_id, "get_profile", started, StatusCode::OK, result)
}

/// Handler for PUT /api/profile/{id}.
///
/// Fields the caller's role may not edit are left unchanged and listed in
/// `ignoredFields`.
async fn update_profile_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    let actor = caller_id(&headers, correlation_id)?;
    let employee_id = read_path(path, correlation_id)?;
    let update = read_json(payload, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        actor_id = %actor,
        employee_id = %employee_id,
        "Updating profile"
    );

    let result =
        service::update_profile(state.store(), state.config(), actor, employee_id, update).await;
    reply(correlation_id, "update_profile", started, StatusCode::OK, result)
}

/// Handler for GET /api/profile/{id}/salary.
async fn get_salary_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    let actor = caller_id(&headers, correlation_id)?;
    let employee_id = read_path(path, correlation_id)?;

    let result =
        service::salary_profile(state.store(), state.config(), actor, employee_id, Utc::now())
            .await
            .map(SalaryResponse::from);
    reply(correlation_id, "salary_profile", started, StatusCode::OK, result)
}

/// Handler for PUT /api/profile/{id}/salary.
///
/// Merges the wage and component edits, recomputes every derived amount
/// and returns the breakdown with its audit trace.
async fn update_salary_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<SalaryUpdate>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    let actor = caller_id(&headers, correlation_id)?;
    let employee_id = read_path(path, correlation_id)?;
    let update = read_json(payload, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        actor_id = %actor,
        employee_id = %employee_id,
        "Updating salary"
    );

    let result = service::update_salary(
        state.store(),
        state.config(),
        actor,
        employee_id,
        &update,
        Utc::now(),
    )
    .await
    .map(SalaryResponse::from);
    reply(correlation_id, "update_salary", started, StatusCode::OK, result)
}

/// Handler for POST /api/attendance/check-in.
async fn check_in_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    let actor = caller_id(&headers, correlation_id)?;
    info!(correlation_id = %correlation_id, actor_id = %actor, "Processing check-in");

    let result = service::check_in(state.store(), actor, Utc::now()).await;
    reply(correlation_id, "check_in", started, StatusCode::OK, result)
}

/// Handler for POST /api/attendance/check-out.
async fn check_out_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    let actor = caller_id(&headers, correlation_id)?;
    info!(correlation_id = %correlation_id, actor_id = %actor, "Processing check-out");

    let result = service::check_out(state.store(), state.config(), actor, Utc::now()).await;
    reply(correlation_id, "check_out", started, StatusCode::OK, result)
}

/// Handler for GET /api/attendance/today.
async fn today_attendance_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    let actor = caller_id(&headers, correlation_id)?;

    let result = service::today_attendance(state.store(), actor, Utc::now()).await;
    reply(correlation_id, "today_attendance", started, StatusCode::OK, result)
}

/// Handler for GET /api/attendance/employee/{month}, month as `YYYY-MM`.
async fn monthly_attendance_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    let actor = caller_id(&headers, correlation_id)?;
    let month = read_path(path, correlation_id)?;

    let result = service::monthly_attendance(state.store(), actor, &month).await;
    reply(correlation_id, "monthly_attendance", started, StatusCode::OK, result)
}

/// Handler for GET /api/attendance/admin/{date}?search=.
async fn company_attendance_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<NaiveDate>, PathRejection>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    let actor = caller_id(&headers, correlation_id)?;
    let date = read_path(path, correlation_id)?;
    let query = read_query(query, correlation_id)?;

    let result = service::company_attendance(
        state.store(),
        state.config(),
        actor,
        date,
        query.search.as_deref(),
    )
    .await;
    reply(correlation_id, "company_attendance", started, StatusCode::OK, result)
}

/// Handler for POST /api/leave/apply.
async fn apply_leave_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<LeaveApplication>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    let actor = caller_id(&headers, correlation_id)?;
    let application = read_json(payload, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        actor_id = %actor,
        leave_type = %application.leave_type,
        "Processing leave application"
    );

    let result =
        service::apply_leave(state.store(), state.config(), actor, application, Utc::now()).await;
    reply(correlation_id, "apply_leave", started, StatusCode::CREATED, result)
}

/// Handler for GET /api/leave/employee.
async fn employee_leaves_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    let actor = caller_id(&headers, correlation_id)?;

    let result = service::employee_leaves(state.store(), state.config(), actor, Utc::now()).await;
    reply(correlation_id, "employee_leaves", started, StatusCode::OK, result)
}

/// Handler for GET /api/leave/admin?status=&search=.
async fn leave_queue_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<LeaveQueueQuery>, QueryRejection>,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    let actor = caller_id(&headers, correlation_id)?;
    let query = read_query(query, correlation_id)?;

    let result = service::leave_queue(
        state.store(),
        state.config(),
        actor,
        query.status,
        query.search.as_deref(),
    )
    .await;
    reply(correlation_id, "leave_queue", started, StatusCode::OK, result)
}

async fn review_leave(
    state: AppState,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Option<Json<ReviewRequest>>,
    decision: LeaveDecision,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    let actor = caller_id(&headers, correlation_id)?;
    let leave_id = read_path(path, correlation_id)?;
    let review = payload.map(|Json(review)| review).unwrap_or_default();
    info!(
        correlation_id = %correlation_id,
        actor_id = %actor,
        leave_id = %leave_id,
        decision = ?decision,
        "Reviewing leave request"
    );

    let result = service::review_leave(
        state.store(),
        state.config(),
        actor,
        leave_id,
        decision,
        review.admin_comment,
        Utc::now(),
    )
    .await;
    reply(correlation_id, "review_leave", started, StatusCode::OK, result)
}

/// Handler for PUT /api/leave/{id}/approve.
async fn approve_leave_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Option<Json<ReviewRequest>>,
) -> Result<Response, ApiErrorResponse> {
    review_leave(state, headers, path, payload, LeaveDecision::Approve).await
}

/// Handler for PUT /api/leave/{id}/reject.
async fn reject_leave_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Option<Json<ReviewRequest>>,
) -> Result<Response, ApiErrorResponse> {
    review_leave(state, headers, path, payload, LeaveDecision::Reject).await
}

/// Handler for GET /api/leave/allocation/{employee_id}.
async fn leave_allocation_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, ApiErrorResponse> {
    let started = Instant::now();
    let correlation_id = Uuid::new_v4();
    let actor = caller_id(&headers, correlation_id)?;
    let employee_id = read_path(path, correlation_id)?;

    let result =
        service::leave_allocation(state.store(), state.config(), actor, employee_id, Utc::now())
            .await;
    reply(correlation_id, "leave_allocation", started, StatusCode::OK, result)
}
