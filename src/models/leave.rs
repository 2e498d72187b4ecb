//! Leave request and leave allocation models.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::LeaveDefaults;

/// Category of leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Paid time off.
    PaidTimeOff,
    /// Sick leave.
    SickLeave,
    /// Unpaid leave.
    UnpaidLeave,
}

impl LeaveType {
    /// Returns true if requests of this type are checked against a balance.
    pub fn is_balance_checked(self) -> bool {
        matches!(self, LeaveType::PaidTimeOff | LeaveType::SickLeave)
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaveType::PaidTimeOff => write!(f, "paid time off"),
            LeaveType::SickLeave => write!(f, "sick leave"),
            LeaveType::UnpaidLeave => write!(f, "unpaid leave"),
        }
    }
}

/// Review state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting review.
    #[default]
    Pending,
    /// Approved; counts against the ledger.
    Approved,
    /// Rejected; the ledger is untouched.
    Rejected,
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaveStatus::Pending => write!(f, "pending"),
            LeaveStatus::Approved => write!(f, "approved"),
            LeaveStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A request for leave over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The requesting employee.
    pub employee_id: Uuid,
    /// The leave category.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Number of calendar days spanned, inclusive.
    pub allocation: u32,
    /// Review state.
    pub status: LeaveStatus,
    /// Employee-supplied reason.
    pub reason: Option<String>,
    /// Employee-supplied remarks.
    pub remarks: Option<String>,
    /// Supporting document reference, kept for sick leave only.
    pub attachment: Option<String>,
    /// Reviewer's comment.
    pub admin_comment: Option<String>,
    /// Who reviewed the request.
    pub reviewed_by: Option<Uuid>,
    /// When the request was reviewed.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Returns true if the request covers the given day.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Returns true if the request overlaps the inclusive window.
    pub fn overlaps(&self, window_start: NaiveDate, window_end: NaiveDate) -> bool {
        self.start_date <= window_end && self.end_date >= window_start
    }
}

/// Allocated, used and available days for one leave category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalance {
    /// Days allocated for the year.
    pub total: u32,
    /// Days consumed by approved requests.
    pub used: u32,
    /// `max(0, total - used)`.
    pub available: u32,
}

impl LeaveBalance {
    /// Creates an unused balance of `total` days.
    pub fn new(total: u32) -> Self {
        Self {
            total,
            used: 0,
            available: total,
        }
    }
}

/// Per-employee leave ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveAllocation {
    /// The employee owning the ledger.
    pub employee_id: Uuid,
    /// Calendar year the allocation applies to.
    pub year: i32,
    /// Paid time off balance.
    pub paid_time_off: LeaveBalance,
    /// Sick leave balance.
    pub sick_leave: LeaveBalance,
    /// Unpaid leave tally.
    pub unpaid_leave: LeaveBalance,
    /// When the ledger last changed.
    pub updated_at: DateTime<Utc>,
}

impl LeaveAllocation {
    /// Creates a fresh ledger from configured defaults.
    pub fn new(employee_id: Uuid, year: i32, defaults: &LeaveDefaults, now: DateTime<Utc>) -> Self {
        Self {
            employee_id,
            year,
            paid_time_off: LeaveBalance::new(defaults.paid_time_off_days),
            sick_leave: LeaveBalance::new(defaults.sick_leave_days),
            unpaid_leave: LeaveBalance::new(defaults.unpaid_leave_days),
            updated_at: now,
        }
    }

    /// Returns the balance for a leave category.
    pub fn balance(&self, leave_type: LeaveType) -> &LeaveBalance {
        match leave_type {
            LeaveType::PaidTimeOff => &self.paid_time_off,
            LeaveType::SickLeave => &self.sick_leave,
            LeaveType::UnpaidLeave => &self.unpaid_leave,
        }
    }

    /// Returns the balance for a leave category, mutably.
    pub fn balance_mut(&mut self, leave_type: LeaveType) -> &mut LeaveBalance {
        match leave_type {
            LeaveType::PaidTimeOff => &mut self.paid_time_off,
            LeaveType::SickLeave => &mut self.sick_leave,
            LeaveType::UnpaidLeave => &mut self.unpaid_leave,
        }
    }
}
