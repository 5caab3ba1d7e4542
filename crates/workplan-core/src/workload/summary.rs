//! Day-indexed hour totals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::AllocationFact;

/// Hours worked per calendar day.
///
/// Built once from facts; each day appears at most once with the sum of
/// every fact on that day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkloadSummary {
    hours: BTreeMap<NaiveDate, u32>,
}

impl WorkloadSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hours on `day`, zero if nothing was allocated.
    pub fn hours_on(&self, day: NaiveDate) -> u32 {
        self.hours.get(&day).copied().unwrap_or(0)
    }

    /// Sum over all days.
    pub fn total_hours(&self) -> u64 {
        self.hours.values().map(|h| u64::from(*h)).sum()
    }

    /// Number of days with at least one fact.
    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    /// Days in ascending order with their hours.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u32)> + '_ {
        self.hours.iter().map(|(d, h)| (*d, *h))
    }

    /// Busiest day; the earliest one wins ties.
    pub fn peak(&self) -> Option<(NaiveDate, u32)> {
        self.iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
    }

    /// Days whose hours exceed `capacity`.
    pub fn days_over(&self, capacity: u32) -> Vec<NaiveDate> {
        self.iter()
            .filter(|(_, h)| *h > capacity)
            .map(|(d, _)| d)
            .collect()
    }
}

impl FromIterator<(NaiveDate, u32)> for WorkloadSummary {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, u32)>>(iter: I) -> Self {
        let mut hours = BTreeMap::new();
        for (day, h) in iter {
            *hours.entry(day).or_insert(0) += h;
        }
        Self { hours }
    }
}

impl<'a> FromIterator<&'a AllocationFact> for WorkloadSummary {
    fn from_iter<I: IntoIterator<Item = &'a AllocationFact>>(iter: I) -> Self {
        iter.into_iter().map(|f| (f.day, f.hours)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_iter_sums_same_day() {
        let summary: WorkloadSummary = vec![
            (date(2018, 1, 1), 4),
            (date(2018, 1, 1), 3),
            (date(2018, 1, 2), 8),
        ]
        .into_iter()
        .collect();

        assert_eq!(summary.len(), 2);
        assert_eq!(summary.hours_on(date(2018, 1, 1)), 7);
        assert_eq!(summary.hours_on(date(2018, 1, 3)), 0);
        assert_eq!(summary.total_hours(), 15);
    }

    #[test]
    fn test_peak_prefers_earliest_on_tie() {
        let summary: WorkloadSummary = vec![
            (date(2018, 1, 3), 8),
            (date(2018, 1, 1), 8),
            (date(2018, 1, 2), 2),
        ]
        .into_iter()
        .collect();
        assert_eq!(summary.peak(), Some((date(2018, 1, 1), 8)));
        assert_eq!(WorkloadSummary::new().peak(), None);
    }

    #[test]
    fn test_days_over_capacity() {
        let summary: WorkloadSummary = vec![(date(2018, 1, 1), 10), (date(2018, 1, 2), 8)]
            .into_iter()
            .collect();
        assert_eq!(summary.days_over(8), vec![date(2018, 1, 1)]);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let summary: WorkloadSummary = vec![(date(2018, 1, 1), 4)].into_iter().collect();
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, r#"{"2018-01-01":4}"#);
    }
}
