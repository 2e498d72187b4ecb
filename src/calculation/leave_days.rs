//! Leave day counting.
//!
//! Leave is counted in calendar days, both ends inclusive. Weekends and
//! holidays are not excluded.

use chrono::NaiveDate;

use crate::error::{HrmsError, HrmsResult};

/// Counts the calendar days from `start` to `end`, inclusive.
///
/// # Errors
///
/// Returns `InvalidInput` if `end` precedes `start`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dayflow_hrms::calculation::calculate_leave_days;
///
/// let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 3, 6).unwrap();
/// assert_eq!(calculate_leave_days(start, end).unwrap(), 5);
/// assert_eq!(calculate_leave_days(start, start).unwrap(), 1);
/// ```
pub fn calculate_leave_days(start: NaiveDate, end: NaiveDate) -> HrmsResult<u32> {
    if end < start {
        return Err(HrmsError::InvalidInput {
            field: "endDate".to_string(),
            message: format!("end date {} is before start date {}", end, start),
        });
    }

    Ok(span_days(start, end))
}

/// Counts the days of `[start, end]` that fall inside `[window_start, window_end]`.
///
/// Returns 0 when the ranges do not overlap.
pub fn leave_days_within(
    start: NaiveDate,
    end: NaiveDate,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> u32 {
    let clipped_start = start.max(window_start);
    let clipped_end = end.min(window_end);

    if clipped_start > clipped_end {
        0
    } else {
        span_days(clipped_start, clipped_end)
    }
}

fn span_days(start: NaiveDate, end: NaiveDate) -> u32 {
    u32::try_from((end - start).num_days() + 1).unwrap_or(u32::MAX)
}
