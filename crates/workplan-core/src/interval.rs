//! Half-open date intervals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendar;
use crate::error::AnalysisError;

/// A date interval `[start_inclusive, end_exclusive)`.
///
/// Always non-empty: construction fails when `end_exclusive <= start_inclusive`.
/// Deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawInterval", rename_all = "camelCase")]
pub struct TimeInterval {
    start_inclusive: NaiveDate,
    end_exclusive: NaiveDate,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInterval {
    start_inclusive: NaiveDate,
    end_exclusive: NaiveDate,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = AnalysisError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Self::new(raw.start_inclusive, raw.end_exclusive)
    }
}

impl TimeInterval {
    /// Create an interval.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidInterval`] if `end_exclusive <= start_inclusive`.
    pub fn new(start_inclusive: NaiveDate, end_exclusive: NaiveDate) -> Result<Self, AnalysisError> {
        if end_exclusive <= start_inclusive {
            return Err(AnalysisError::InvalidInterval {
                start: start_inclusive,
                end: end_exclusive,
            });
        }
        Ok(Self {
            start_inclusive,
            end_exclusive,
        })
    }

    /// Interval covering exactly one day.
    pub fn single_day(day: NaiveDate) -> Result<Self, AnalysisError> {
        let next = day.succ_opt().ok_or(AnalysisError::DateOutOfRange(day))?;
        Self::new(day, next)
    }

    pub fn start_inclusive(&self) -> NaiveDate {
        self.start_inclusive
    }

    pub fn end_exclusive(&self) -> NaiveDate {
        self.end_exclusive
    }

    /// Whether `day` lies within `[start, end)`.
    #[inline]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start_inclusive <= day && day < self.end_exclusive
    }

    /// Calendar days covered, weekends included.
    pub fn duration_days(&self) -> i64 {
        (self.end_exclusive - self.start_inclusive).num_days()
    }

    /// Every calendar day in the interval, in ascending order.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_inclusive
            .iter_days()
            .take_while(move |d| *d < self.end_exclusive)
    }

    /// Overlap `[max(starts), min(ends))`, or `None` when it would be empty.
    ///
    /// Touching intervals do not intersect. The operation is symmetric.
    pub fn intersect(&self, other: &TimeInterval) -> Option<TimeInterval> {
        let start = self.start_inclusive.max(other.start_inclusive);
        let end = self.end_exclusive.min(other.end_exclusive);
        if start < end {
            Some(TimeInterval {
                start_inclusive: start,
                end_exclusive: end,
            })
        } else {
            None
        }
    }

    /// Working days (Mon-Fri) inside the interval.
    pub fn working_days(&self) -> i64 {
        calendar::working_days_between(self.start_inclusive, self.end_exclusive)
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start_inclusive, self.end_exclusive)
    }
}
