//! Attendance model and related types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored status of an attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// The employee checked in.
    Present,
    /// No check-in was recorded.
    #[default]
    Absent,
}

/// Status of an employee on a given day, combining attendance and leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    /// Checked in.
    Present,
    /// Not checked in and not on leave.
    Absent,
    /// Covered by an approved leave request.
    OnLeave,
}

/// One employee's attendance for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The employee the record belongs to.
    pub employee_id: Uuid,
    /// The calendar day (UTC).
    pub date: NaiveDate,
    /// When the employee checked in.
    pub check_in_time: Option<DateTime<Utc>>,
    /// When the employee checked out.
    pub check_out_time: Option<DateTime<Utc>>,
    /// Stored status.
    pub status: AttendanceStatus,
    /// Hours worked net of break, set on check-out.
    pub work_hours: Decimal,
    /// Hours beyond the standard day, set on check-out.
    pub extra_hours: Decimal,
}

impl AttendanceRecord {
    /// Creates an empty (absent) record for an employee and day.
    pub fn new(employee_id: Uuid, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id,
            date,
            check_in_time: None,
            check_out_time: None,
            status: AttendanceStatus::Absent,
            work_hours: Decimal::ZERO,
            extra_hours: Decimal::ZERO,
        }
    }

    /// Returns true once a check-in has been recorded.
    pub fn is_checked_in(&self) -> bool {
        self.check_in_time.is_some()
    }

    /// Returns true once a check-out has been recorded.
    pub fn is_checked_out(&self) -> bool {
        self.check_out_time.is_some()
    }
}
