//! Attendance work-hour derivation.
//!
//! On check-out the elapsed time is split into hours worked (net of the
//! unpaid break) and extra hours beyond the standard day.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{HrmsError, HrmsResult};

const SECONDS_PER_HOUR: Decimal = Decimal::from_parts(3600, 0, 0, false, 0);
const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Hours derived from one check-in/check-out pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkHours {
    /// Elapsed hours between check-in and check-out.
    pub total_hours: Decimal,
    /// `max(0, total - break)`.
    pub work_hours: Decimal,
    /// `max(0, work - standard day)`.
    pub extra_hours: Decimal,
}

/// Derives worked and extra hours for a day.
///
/// Elapsed time is measured to the second and converted to decimal hours
/// without rounding.
///
/// # Errors
///
/// Returns `InvalidInput` if `check_out` precedes `check_in`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use dayflow_hrms::calculation::calculate_work_hours;
/// use rust_decimal::Decimal;
///
/// let check_in = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
/// let check_out = Utc.with_ymd_and_hms(2026, 3, 2, 18, 30, 0).unwrap();
///
/// let hours = calculate_work_hours(check_in, check_out, Decimal::ONE, Decimal::from(8)).unwrap();
/// assert_eq!(hours.total_hours, Decimal::new(95, 1));
/// assert_eq!(hours.work_hours, Decimal::new(85, 1));
/// assert_eq!(hours.extra_hours, Decimal::new(5, 1));
/// ```
pub fn calculate_work_hours(
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    break_time_hours: Decimal,
    standard_work_hours: Decimal,
) -> HrmsResult<WorkHours> {
    if check_out < check_in {
        return Err(HrmsError::InvalidInput {
            field: "checkOutTime".to_string(),
            message: format!("check-out {} precedes check-in {}", check_out, check_in),
        });
    }

    let elapsed = (check_out - check_in).num_seconds();
    let total_hours = Decimal::from(elapsed) / SECONDS_PER_HOUR;
    let work_hours = (total_hours - break_time_hours).max(Decimal::ZERO);
    let extra_hours = (work_hours - standard_work_hours).max(Decimal::ZERO);

    Ok(WorkHours {
        total_hours,
        work_hours,
        extra_hours,
    })
}

/// Renders decimal hours as `HH:MM`, truncating partial minutes.
///
/// Negative input renders as `00:00`.
///
/// # Examples
///
/// ```
/// use dayflow_hrms::calculation::format_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_hours(Decimal::new(85, 1)), "08:30");
/// assert_eq!(format_hours(Decimal::ZERO), "00:00");
/// ```
pub fn format_hours(hours: Decimal) -> String {
    let hours = hours.max(Decimal::ZERO);
    let whole = hours.floor();
    let minutes = ((hours - whole) * MINUTES_PER_HOUR).floor();

    format!(
        "{:02}:{:02}",
        whole.to_u64().unwrap_or(0),
        minutes.to_u64().unwrap_or(0)
    )
}
