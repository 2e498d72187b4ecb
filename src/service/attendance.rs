//! Check-in, check-out and attendance reporting.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculation::{
    MonthWindow, MonthlyAttendance, WorkHours, calculate_work_hours, format_hours,
    resolve_work_status, summarize_month,
};
use crate::config::HrmsConfig;
use crate::error::{HrmsError, HrmsResult};
use crate::models::{AttendanceRecord, AttendanceStatus, LeaveRequest, WorkStatus};
use crate::permissions::Capability;
use crate::store::MemoryStore;

use super::{EmployeeSummary, resolve_actor};

/// The caller's attendance state for today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayAttendance {
    /// Today's record, if any.
    pub attendance: Option<AttendanceRecord>,
    /// True if approved leave covers today.
    pub on_leave: bool,
    /// The covering leave request.
    pub leave: Option<LeaveRequest>,
}

/// Result of a check-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutOutcome {
    /// The completed record.
    pub attendance: AttendanceRecord,
    /// The derived hours, including the elapsed total.
    pub hours: WorkHours,
}

/// One employee's line in the company attendance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAttendanceRow {
    /// The employee.
    pub employee: EmployeeSummary,
    /// Check-in as `HH:MM`.
    pub check_in: Option<String>,
    /// Check-out as `HH:MM`.
    pub check_out: Option<String>,
    /// Work hours as `HH:MM`; absent without a record.
    pub work_hours: Option<String>,
    /// Extra hours as `HH:MM`; absent without a record.
    pub extra_hours: Option<String>,
    /// Resolved status for the day.
    pub status: WorkStatus,
}

/// The company attendance sheet for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAttendance {
    /// The day.
    pub date: NaiveDate,
    /// One row per matching active employee.
    pub attendance: Vec<DailyAttendanceRow>,
}

/// Records the caller's check-in for today.
///
/// # Errors
///
/// - `OnApprovedLeave` if approved leave covers today
/// - `AlreadyCheckedIn` if today's record already has a check-in
pub async fn check_in(
    store: &MemoryStore,
    actor_id: Uuid,
    now: DateTime<Utc>,
) -> HrmsResult<AttendanceRecord> {
    let today = now.date_naive();
    let mut data = store.write().await;
    let actor = resolve_actor(&data, actor_id)?;

    if data.approved_leave_on(actor.id, today).is_some() {
        return Err(HrmsError::OnApprovedLeave { date: today });
    }

    let record = data
        .attendance
        .entry((actor.id, today))
        .or_insert_with(|| AttendanceRecord::new(actor.id, today));

    if record.is_checked_in() {
        return Err(HrmsError::AlreadyCheckedIn { date: today });
    }

    record.check_in_time = Some(now);
    record.status = AttendanceStatus::Present;

    info!(employee_id = %actor.id, date = %today, "Checked in");
    Ok(record.clone())
}

/// Records the caller's check-out for today and derives the hours.
///
/// The break comes from the caller's salary profile, or the configured
/// default when there is none.
///
/// # Errors
///
/// - `NotCheckedIn` without a check-in today
/// - `AlreadyCheckedOut` if today's record already has a check-out
pub async fn check_out(
    store: &MemoryStore,
    config: &HrmsConfig,
    actor_id: Uuid,
    now: DateTime<Utc>,
) -> HrmsResult<CheckOutOutcome> {
    let today = now.date_naive();
    let mut data = store.write().await;
    let actor = resolve_actor(&data, actor_id)?;

    let break_time_hours = data
        .salaries
        .get(&actor.id)
        .map(|profile| profile.break_time_hours)
        .unwrap_or(config.attendance.default_break_time_hours);

    let record = data
        .attendance
        .get_mut(&(actor.id, today))
        .ok_or(HrmsError::NotCheckedIn { date: today })?;

    let Some(checked_in_at) = record.check_in_time else {
        return Err(HrmsError::NotCheckedIn { date: today });
    };
    if record.is_checked_out() {
        return Err(HrmsError::AlreadyCheckedOut { date: today });
    }

    let hours = calculate_work_hours(
        checked_in_at,
        now,
        break_time_hours,
        config.attendance.standard_work_hours,
    )?;

    record.check_out_time = Some(now);
    record.work_hours = hours.work_hours;
    record.extra_hours = hours.extra_hours;

    info!(
        employee_id = %actor.id,
        date = %today,
        work_hours = %hours.work_hours,
        extra_hours = %hours.extra_hours,
        "Checked out"
    );

    Ok(CheckOutOutcome {
        attendance: record.clone(),
        hours,
    })
}

/// The caller's attendance and leave state for today.
pub async fn today_attendance(
    store: &MemoryStore,
    actor_id: Uuid,
    now: DateTime<Utc>,
) -> HrmsResult<TodayAttendance> {
    let today = now.date_naive();
    let data = store.read().await;
    let actor = resolve_actor(&data, actor_id)?;

    let leave = data.approved_leave_on(actor.id, today).cloned();

    Ok(TodayAttendance {
        attendance: data.attendance_on(actor.id, today).cloned(),
        on_leave: leave.is_some(),
        leave,
    })
}

/// The caller's attendance for a `YYYY-MM` month.
pub async fn monthly_attendance(
    store: &MemoryStore,
    actor_id: Uuid,
    month: &str,
) -> HrmsResult<MonthlyAttendance> {
    let window = MonthWindow::parse(month)?;
    let data = store.read().await;
    let actor = resolve_actor(&data, actor_id)?;

    let records = data.attendance_between(actor.id, window.start, window.end);
    let leaves = data.leaves_of(actor.id);

    debug!(employee_id = %actor.id, month, records = records.len(), "Building monthly attendance");
    Ok(summarize_month(&window, &records, &leaves))
}

/// The attendance sheet of the caller's company for one day.
///
/// Requires `view_company_attendance`. `search` filters employees by name,
/// email or login ID, case-insensitively.
pub async fn company_attendance(
    store: &MemoryStore,
    config: &HrmsConfig,
    actor_id: Uuid,
    date: NaiveDate,
    search: Option<&str>,
) -> HrmsResult<DailyAttendance> {
    let data = store.read().await;
    let actor = resolve_actor(&data, actor_id)?;
    config
        .permissions
        .require(&actor, Capability::ViewCompanyAttendance)?;

    let rows = data
        .active_employees(actor.company_id)
        .into_iter()
        .filter(|e| search.is_none_or(|q| q.is_empty() || e.matches_search(q)))
        .map(|employee| {
            let record = data.attendance_on(employee.id, date);
            let leaves = data.leaves_of(employee.id);

            DailyAttendanceRow {
                employee: EmployeeSummary::from(employee),
                check_in: record
                    .and_then(|r| r.check_in_time)
                    .map(|t| t.format("%H:%M").to_string()),
                check_out: record
                    .and_then(|r| r.check_out_time)
                    .map(|t| t.format("%H:%M").to_string()),
                work_hours: record.map(|r| format_hours(r.work_hours)),
                extra_hours: record.map(|r| format_hours(r.extra_hours)),
                status: resolve_work_status(date, record, &leaves),
            }
        })
        .collect();

    Ok(DailyAttendance {
        date,
        attendance: rows,
    })
}
