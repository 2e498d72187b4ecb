//! Leave allocation ledger rules.
//!
//! Paid time off and sick leave are limited by their yearly balance;
//! unpaid leave is tallied but never limited. Approval is the only event
//! that consumes balance.

use chrono::{DateTime, Utc};

use crate::error::{HrmsError, HrmsResult};
use crate::models::{LeaveAllocation, LeaveBalance, LeaveType};

/// Checks that a request of `requested` days fits the remaining balance.
///
/// Always succeeds for leave types that are not balance-checked.
///
/// # Errors
///
/// Returns `InsufficientLeaveBalance` when `available < requested`.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use dayflow_hrms::calculation::check_leave_balance;
/// use dayflow_hrms::config::LeaveDefaults;
/// use dayflow_hrms::models::{LeaveAllocation, LeaveType};
/// use uuid::Uuid;
///
/// let ledger = LeaveAllocation::new(Uuid::new_v4(), 2026, &LeaveDefaults::default(), Utc::now());
/// assert!(check_leave_balance(&ledger, LeaveType::SickLeave, 7).is_ok());
/// assert!(check_leave_balance(&ledger, LeaveType::SickLeave, 8).is_err());
/// assert!(check_leave_balance(&ledger, LeaveType::UnpaidLeave, 30).is_ok());
/// ```
pub fn check_leave_balance(
    allocation: &LeaveAllocation,
    leave_type: LeaveType,
    requested: u32,
) -> HrmsResult<()> {
    if !leave_type.is_balance_checked() {
        return Ok(());
    }

    let available = allocation.balance(leave_type).available;
    if available < requested {
        return Err(HrmsError::InsufficientLeaveBalance {
            leave_type,
            requested,
            available,
        });
    }

    Ok(())
}

/// Recomputes `available = max(0, total - used)`.
pub fn refresh_available(balance: &mut LeaveBalance) {
    balance.available = balance.total.saturating_sub(balance.used);
}

/// Consumes `days` from the ledger for an approved request.
///
/// Returns the balance after the change.
pub fn record_leave_usage(
    allocation: &mut LeaveAllocation,
    leave_type: LeaveType,
    days: u32,
    now: DateTime<Utc>,
) -> LeaveBalance {
    let balance = allocation.balance_mut(leave_type);
    balance.used = balance.used.saturating_add(days);
    refresh_available(balance);
    let updated = *balance;
    allocation.updated_at = now;
    updated
}
