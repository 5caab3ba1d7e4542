//! Working-day calendar.
//!
//! Monday through Friday are working days; Saturday and Sunday are not.
//! There is no holiday awareness.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::AnalysisError;

/// Whether `date` falls on a Monday-Friday.
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Advance from `date` by `n` working days, skipping weekends.
///
/// The start date itself is not counted, so `nth_working_day_from(1, friday)`
/// is the following Monday. `n == 0` returns `date` unchanged.
///
/// # Errors
/// Returns [`AnalysisError::InvalidArgument`] if `n` is negative and
/// [`AnalysisError::DateOutOfRange`] if the walk runs past the last
/// representable date.
pub fn nth_working_day_from(n: i64, date: NaiveDate) -> Result<NaiveDate, AnalysisError> {
    if n < 0 {
        return Err(AnalysisError::InvalidArgument(format!(
            "working-day offset must be non-negative, got {n}"
        )));
    }

    let mut remaining = n;
    let mut current = date;
    while remaining > 0 {
        current = current
            .succ_opt()
            .ok_or(AnalysisError::DateOutOfRange(current))?;
        if is_working_day(current) {
            remaining -= 1;
        }
    }
    Ok(current)
}

/// Number of working days in `[start_inclusive, end_exclusive)`.
///
/// Returns 0 when `start_inclusive >= end_exclusive`.
pub fn working_days_between(start_inclusive: NaiveDate, end_exclusive: NaiveDate) -> i64 {
    if start_inclusive >= end_exclusive {
        return 0;
    }

    let total = (end_exclusive - start_inclusive).num_days();
    let full_weeks = total / 7;
    let mut count = full_weeks * 5;

    // Walk the leftover partial week; at most six days.
    let leftover_start = start_inclusive + chrono::Duration::days(full_weeks * 7);
    count += leftover_start
        .iter_days()
        .take_while(|d| *d < end_exclusive)
        .filter(|d| is_working_day(*d))
        .count() as i64;
    count
}
