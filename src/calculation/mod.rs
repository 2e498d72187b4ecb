//! Calculation logic for the HRMS engine.
//!
//! This module contains the pure rules behind every mutation: salary
//! component recomputation, partial salary updates, attendance work hours,
//! leave day counting, the leave allocation ledger and attendance reporting.
//! Nothing here touches the store or the clock; timestamps are parameters.

mod attendance_summary;
mod leave_days;
mod leave_ledger;
mod salary_components;
mod salary_update;
mod work_hours;

pub use attendance_summary::{
    AttendanceDay, AttendanceSummary, MonthWindow, MonthlyAttendance, resolve_work_status,
    summarize_month,
};
pub use leave_days::{calculate_leave_days, leave_days_within};
pub use leave_ledger::{check_leave_balance, record_leave_usage, refresh_available};
pub use salary_components::{
    DEFAULT_STANDARD_ALLOWANCE, MAX_AMOUNT, MAX_PERCENTAGE, NEGATIVE_WAGE_CLAMPED,
    SalaryComputation, SalaryTotals, WAGE_OVERCOMMITTED, recompute_salary, validate_profile,
};
pub use salary_update::{
    ComponentUpdate, ContributionUpdate, ProfessionalTaxUpdate, ProvidentFundUpdate,
    SalaryUpdate, apply_salary_update,
};
pub use work_hours::{WorkHours, calculate_work_hours, format_hours};
