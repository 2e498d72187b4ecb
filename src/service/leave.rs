//! Leave requests and the allocation ledger.
//!
//! Applying checks the balance, approving records usage in the same write
//! guard that flips the status, so concurrent reviews never lose a day.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_leave_days, check_leave_balance, record_leave_usage};
use crate::config::HrmsConfig;
use crate::error::{HrmsError, HrmsResult};
use crate::models::{LeaveAllocation, LeaveRequest, LeaveStatus, LeaveType};
use crate::permissions::Capability;
use crate::store::{Collections, MemoryStore};

use super::{EmployeeSummary, colleague, resolve_actor};

/// An employee's application for leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveApplication {
    /// The leave category.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Reason for the leave.
    #[serde(default)]
    pub reason: Option<String>,
    /// Additional remarks.
    #[serde(default)]
    pub remarks: Option<String>,
    /// Supporting document; dropped unless the leave is sick leave.
    #[serde(default)]
    pub attachment: Option<String>,
}

/// A reviewer's decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveDecision {
    /// Approve and consume balance.
    Approve,
    /// Reject; the ledger is untouched.
    Reject,
}

/// A leave request with the requester and reviewer resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveView {
    /// The request.
    #[serde(flatten)]
    pub request: LeaveRequest,
    /// Who asked for the leave.
    pub employee: EmployeeSummary,
    /// Reviewer's full name, once reviewed.
    pub reviewer_name: Option<String>,
}

/// An employee's requests together with their ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeLeaves {
    /// Requests, newest first.
    pub leaves: Vec<LeaveView>,
    /// The leave ledger.
    pub allocation: LeaveAllocation,
}

fn view(data: &Collections, request: LeaveRequest) -> HrmsResult<LeaveView> {
    let employee = EmployeeSummary::from(data.employee(request.employee_id)?);
    let reviewer_name = request
        .reviewed_by
        .and_then(|id| data.employees.get(&id))
        .map(|reviewer| reviewer.full_name());

    Ok(LeaveView {
        request,
        employee,
        reviewer_name,
    })
}

/// Submits a leave request for the caller.
///
/// The request starts pending. Paid time off and sick leave are checked
/// against the remaining balance; nothing is consumed until approval.
///
/// # Errors
///
/// - `InvalidInput` if the end date precedes the start date
/// - `InsufficientLeaveBalance` if the balance cannot cover the request
pub async fn apply_leave(
    store: &MemoryStore,
    config: &HrmsConfig,
    actor_id: Uuid,
    application: LeaveApplication,
    now: DateTime<Utc>,
) -> HrmsResult<LeaveRequest> {
    let allocation = calculate_leave_days(application.start_date, application.end_date)?;

    let mut data = store.write().await;
    let actor = resolve_actor(&data, actor_id)?;

    let ledger = data.allocation_or_default(actor.id, now.year(), &config.leave, now);
    check_leave_balance(ledger, application.leave_type, allocation)?;

    let attachment = match application.leave_type {
        LeaveType::SickLeave => application.attachment,
        _ => None,
    };

    let request = LeaveRequest {
        id: Uuid::new_v4(),
        employee_id: actor.id,
        leave_type: application.leave_type,
        start_date: application.start_date,
        end_date: application.end_date,
        allocation,
        status: LeaveStatus::Pending,
        reason: application.reason,
        remarks: application.remarks,
        attachment,
        admin_comment: None,
        reviewed_by: None,
        reviewed_at: None,
        created_at: now,
    };
    data.leaves.insert(request.id, request.clone());

    info!(
        employee_id = %actor.id,
        leave_id = %request.id,
        leave_type = ?request.leave_type,
        days = allocation,
        "Leave requested"
    );

    Ok(request)
}

/// The caller's requests and ledger. Creates a default ledger if missing.
pub async fn employee_leaves(
    store: &MemoryStore,
    config: &HrmsConfig,
    actor_id: Uuid,
    now: DateTime<Utc>,
) -> HrmsResult<EmployeeLeaves> {
    let mut data = store.write().await;
    let actor = resolve_actor(&data, actor_id)?;

    let allocation = data
        .allocation_or_default(actor.id, now.year(), &config.leave, now)
        .clone();
    let leaves = data
        .leaves_of(actor.id)
        .into_iter()
        .map(|request| view(&data, request))
        .collect::<HrmsResult<Vec<_>>>()?;

    Ok(EmployeeLeaves { leaves, allocation })
}

/// Every leave request of the caller's company, newest first.
///
/// Requires `view_leave_queue`. Optionally filtered by status and by a
/// case-insensitive search on the requester.
pub async fn leave_queue(
    store: &MemoryStore,
    config: &HrmsConfig,
    actor_id: Uuid,
    status: Option<LeaveStatus>,
    search: Option<&str>,
) -> HrmsResult<Vec<LeaveView>> {
    let data = store.read().await;
    let actor = resolve_actor(&data, actor_id)?;
    config
        .permissions
        .require(&actor, Capability::ViewLeaveQueue)?;

    let mut requests: Vec<LeaveRequest> = data
        .leaves
        .values()
        .filter(|l| status.is_none_or(|s| l.status == s))
        .filter(|l| {
            data.employees.get(&l.employee_id).is_some_and(|e| {
                e.company_id == actor.company_id
                    && search.is_none_or(|q| q.is_empty() || e.matches_search(q))
            })
        })
        .cloned()
        .collect();
    requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    requests
        .into_iter()
        .map(|request| view(&data, request))
        .collect()
}

/// Approves or rejects a pending request.
///
/// Approval moves the request to approved and adds its day count to the
/// `used` tally of its category in the same write. Rejection only changes
/// the request.
///
/// # Errors
///
/// - `PermissionDenied` without `review_leave`
/// - `LeaveNotFound` if the request does not exist in the caller's company
/// - `LeaveAlreadyReviewed` if the request is no longer pending
pub async fn review_leave(
    store: &MemoryStore,
    config: &HrmsConfig,
    actor_id: Uuid,
    leave_id: Uuid,
    decision: LeaveDecision,
    admin_comment: Option<String>,
    now: DateTime<Utc>,
) -> HrmsResult<LeaveRequest> {
    let mut guard = store.write().await;
    let data = &mut *guard;
    let actor = resolve_actor(data, actor_id)?;
    config
        .permissions
        .require(&actor, Capability::ReviewLeave)?;

    let employee_id = data.leave(leave_id)?.employee_id;
    if colleague(data, &actor, employee_id).is_err() {
        return Err(HrmsError::LeaveNotFound { leave_id });
    }

    let request = data
        .leaves
        .get_mut(&leave_id)
        .ok_or(HrmsError::LeaveNotFound { leave_id })?;

    if request.status != LeaveStatus::Pending {
        warn!(
            leave_id = %leave_id,
            status = %request.status,
            "Review attempted on a reviewed leave request"
        );
        return Err(HrmsError::LeaveAlreadyReviewed {
            leave_id,
            status: request.status,
        });
    }

    request.status = match decision {
        LeaveDecision::Approve => LeaveStatus::Approved,
        LeaveDecision::Reject => LeaveStatus::Rejected,
    };
    request.reviewed_by = Some(actor.id);
    request.reviewed_at = Some(now);
    if admin_comment.is_some() {
        request.admin_comment = admin_comment;
    }
    let reviewed = request.clone();

    if decision == LeaveDecision::Approve {
        let ledger = data
            .allocations
            .entry(employee_id)
            .or_insert_with(|| LeaveAllocation::new(employee_id, now.year(), &config.leave, now));
        let balance = record_leave_usage(ledger, reviewed.leave_type, reviewed.allocation, now);

        info!(
            leave_id = %leave_id,
            employee_id = %employee_id,
            reviewed_by = %actor.id,
            used = balance.used,
            available = balance.available,
            "Leave approved"
        );
    } else {
        info!(
            leave_id = %leave_id,
            employee_id = %employee_id,
            reviewed_by = %actor.id,
            "Leave rejected"
        );
    }

    Ok(reviewed)
}

/// An employee's leave ledger.
///
/// Callers may read their own; anyone else's requires
/// `view_leave_allocations`.
pub async fn leave_allocation(
    store: &MemoryStore,
    config: &HrmsConfig,
    actor_id: Uuid,
    employee_id: Uuid,
    now: DateTime<Utc>,
) -> HrmsResult<LeaveAllocation> {
    let mut data = store.write().await;
    let actor = resolve_actor(&data, actor_id)?;
    if actor.id != employee_id {
        config
            .permissions
            .require(&actor, Capability::ViewLeaveAllocations)?;
    }
    colleague(&data, &actor, employee_id)?;

    Ok(data
        .allocation_or_default(employee_id, now.year(), &config.leave, now)
        .clone())
}
