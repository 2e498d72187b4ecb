//! Attendance reporting.
//!
//! Builds the monthly view an employee sees of their own attendance and
//! resolves the single-day work status shown in company listings.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{HrmsError, HrmsResult};
use crate::models::{AttendanceRecord, AttendanceStatus, LeaveRequest, LeaveStatus, WorkStatus};

use super::leave_days::leave_days_within;
use super::work_hours::format_hours;

/// A calendar month, with its first and last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1-12.
    pub month: u32,
    /// First day of the month.
    pub start: NaiveDate,
    /// Last day of the month.
    pub end: NaiveDate,
}

impl MonthWindow {
    /// Builds the window for a year and month.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `month` is not in 1..=12 or the year is
    /// out of range.
    pub fn new(year: i32, month: u32) -> HrmsResult<Self> {
        let invalid = || HrmsError::InvalidInput {
            field: "month".to_string(),
            message: format!("{}-{:02} is not a valid month", year, month),
        };

        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end = next.and_then(|d| d.pred_opt()).ok_or_else(invalid)?;

        Ok(Self {
            year,
            month,
            start,
            end,
        })
    }

    /// Parses a `YYYY-MM` string.
    ///
    /// # Examples
    ///
    /// ```
    /// use dayflow_hrms::calculation::MonthWindow;
    ///
    /// let window = MonthWindow::parse("2028-02").unwrap();
    /// assert_eq!(window.days(), 29);
    /// assert!(MonthWindow::parse("2028-13").is_err());
    /// ```
    pub fn parse(value: &str) -> HrmsResult<Self> {
        let invalid = || HrmsError::InvalidInput {
            field: "month".to_string(),
            message: format!("'{}' is not in YYYY-MM format", value),
        };

        let (year, month) = value.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month)
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> HrmsResult<Self> {
        Self::new(date.year(), date.month())
    }

    /// Number of days in the month.
    pub fn days(&self) -> u32 {
        self.end.day()
    }

    /// Returns true if `date` falls in the month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Summary counters of a monthly attendance view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    /// Days with a present record.
    pub present_days: u32,
    /// Approved leave days falling in the month.
    pub leave_days: u32,
    /// Calendar days in the month.
    pub total_working_days: u32,
}

/// One attendance record formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDay {
    /// The calendar day.
    pub date: NaiveDate,
    /// Check-in time as `HH:MM` (UTC).
    pub check_in: Option<String>,
    /// Check-out time as `HH:MM` (UTC).
    pub check_out: Option<String>,
    /// Work hours as `HH:MM`.
    pub work_hours: String,
    /// Extra hours as `HH:MM`.
    pub extra_hours: String,
    /// Stored status.
    pub status: AttendanceStatus,
}

impl From<&AttendanceRecord> for AttendanceDay {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            date: record.date,
            check_in: record.check_in_time.map(|t| t.format("%H:%M").to_string()),
            check_out: record.check_out_time.map(|t| t.format("%H:%M").to_string()),
            work_hours: format_hours(record.work_hours),
            extra_hours: format_hours(record.extra_hours),
            status: record.status,
        }
    }
}

/// An employee's attendance for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAttendance {
    /// The month as `YYYY-MM`.
    pub month: String,
    /// Records in the month, ordered by date.
    pub attendance: Vec<AttendanceDay>,
    /// Summary counters.
    pub summary: AttendanceSummary,
}

/// Builds the monthly view from one employee's records and leave requests.
///
/// Records outside the window are ignored. Only approved leave counts,
/// clipped to the month.
pub fn summarize_month(
    window: &MonthWindow,
    records: &[AttendanceRecord],
    leaves: &[LeaveRequest],
) -> MonthlyAttendance {
    let mut in_month: Vec<&AttendanceRecord> =
        records.iter().filter(|r| window.contains(r.date)).collect();
    in_month.sort_by_key(|r| r.date);

    let present_days = in_month
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count() as u32;

    let leave_days = leaves
        .iter()
        .filter(|l| l.status == LeaveStatus::Approved)
        .map(|l| leave_days_within(l.start_date, l.end_date, window.start, window.end))
        .sum();

    MonthlyAttendance {
        month: format!("{}-{:02}", window.year, window.month),
        attendance: in_month.into_iter().map(AttendanceDay::from).collect(),
        summary: AttendanceSummary {
            present_days,
            leave_days,
            total_working_days: window.days(),
        },
    }
}

/// Resolves an employee's status for `date`.
///
/// Approved leave covering the date wins, then a checked-in record,
/// otherwise absent.
pub fn resolve_work_status(
    date: NaiveDate,
    record: Option<&AttendanceRecord>,
    leaves: &[LeaveRequest],
) -> WorkStatus {
    let on_leave = leaves
        .iter()
        .any(|l| l.status == LeaveStatus::Approved && l.covers(date));

    if on_leave {
        WorkStatus::OnLeave
    } else if record.is_some_and(|r| r.date == date && r.is_checked_in()) {
        WorkStatus::Present
    } else {
        WorkStatus::Absent
    }
}
