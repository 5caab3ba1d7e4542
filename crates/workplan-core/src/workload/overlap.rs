//! Pairwise overlap between a person's assertions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::interval::TimeInterval;
use crate::model::{Assertion, Problem};

/// Two assertions of the same person whose windows overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionOverlap {
    /// Assertion with the earlier (or equal) release date
    pub earlier: String,
    pub later: String,
    pub interval: TimeInterval,
    pub working_days: i64,
}

/// Overlap statistics for one person's assertions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionStats {
    /// Assertions compared
    pub assertion_count: usize,
    /// Non-empty pairwise intersections found
    pub intersection_count: usize,
    /// Sum of working days over all intersections
    pub total_intersection_working_days: i64,
    /// `intersection_count / assertion_count`, 0.0 with no assertions
    pub per_assertion_average: f64,
    pub overlaps: Vec<AssertionOverlap>,
}

/// Compare every unordered pair of `assertions` exactly once.
///
/// Assertions are ordered by release date, then the earliest remaining one
/// is taken off the list and intersected with everything still on it.
pub fn pairwise_intersection_stats(assertions: &[&Assertion]) -> IntersectionStats {
    let mut ordered: Vec<&Assertion> = assertions.to_vec();
    ordered.sort_by(|a, b| a.release().cmp(&b.release()).then_with(|| a.id.cmp(&b.id)));

    let mut overlaps = Vec::new();
    let mut remaining = ordered.as_slice();
    while let Some((earliest, rest)) = remaining.split_first() {
        for other in rest {
            if let Some(interval) = earliest.window.intersect(&other.window) {
                overlaps.push(AssertionOverlap {
                    earlier: earliest.id.clone(),
                    later: other.id.clone(),
                    interval,
                    working_days: interval.working_days(),
                });
            }
        }
        remaining = rest;
    }

    let assertion_count = assertions.len();
    let intersection_count = overlaps.len();
    let total_intersection_working_days: i64 = overlaps.iter().map(|o| o.working_days).sum();
    let per_assertion_average = if assertion_count == 0 {
        0.0
    } else {
        intersection_count as f64 / assertion_count as f64
    };

    IntersectionStats {
        assertion_count,
        intersection_count,
        total_intersection_working_days,
        per_assertion_average,
        overlaps,
    }
}

/// Overlap statistics for every person named in `problem`.
pub fn intersection_stats_by_person(problem: &Problem) -> BTreeMap<String, IntersectionStats> {
    let stats: BTreeMap<String, IntersectionStats> = problem
        .people()
        .into_iter()
        .map(|person| {
            let assertions = problem.assertions_for(&person);
            (person, pairwise_intersection_stats(&assertions))
        })
        .collect();
    debug!(people = stats.len(), "computed assertion overlap by person");
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assertion(requirement: &str, start: NaiveDate, end: NaiveDate) -> Assertion {
        Assertion::new(requirement, "alice", 10, start, end).unwrap()
    }

    #[test]
    fn test_three_assertions_compare_each_pair_once() {
        let a = assertion("proj1", date(2018, 1, 1), date(2018, 1, 10));
        let b = assertion("proj2", date(2018, 1, 5), date(2018, 1, 20));
        let c = assertion("proj3", date(2018, 1, 15), date(2018, 2, 1));

        // Input order must not matter
        let stats = pairwise_intersection_stats(&[&c, &a, &b]);

        // a and b share [01-05, 01-10): Fri, Mon, Tue
        // b and c share [01-15, 01-20): Mon..Fri
        // a and c are disjoint
        assert_eq!(stats.assertion_count, 3);
        assert_eq!(stats.intersection_count, 2);
        assert_eq!(stats.total_intersection_working_days, 3 + 5);
        assert!((stats.per_assertion_average - 2.0 / 3.0).abs() < 1e-9);

        assert_eq!(stats.overlaps[0].earlier, "proj1/alice");
        assert_eq!(stats.overlaps[0].later, "proj2/alice");
        assert_eq!(stats.overlaps[1].earlier, "proj2/alice");
    }

    #[test]
    fn test_touching_windows_do_not_count() {
        let a = assertion("proj1", date(2018, 1, 1), date(2018, 1, 5));
        let b = assertion("proj2", date(2018, 1, 5), date(2018, 1, 10));
        let stats = pairwise_intersection_stats(&[&a, &b]);
        assert_eq!(stats.intersection_count, 0);
        assert_eq!(stats.per_assertion_average, 0.0);
    }

    #[test]
    fn test_weekend_only_overlap_counts_with_zero_days() {
        let a = assertion("proj1", date(2018, 1, 1), date(2018, 1, 8));
        let b = assertion("proj2", date(2018, 1, 6), date(2018, 1, 20));
        let stats = pairwise_intersection_stats(&[&a, &b]);
        assert_eq!(stats.intersection_count, 1);
        assert_eq!(stats.total_intersection_working_days, 0);
    }

    #[test]
    fn test_empty_and_single() {
        let empty = pairwise_intersection_stats(&[]);
        assert_eq!(empty.assertion_count, 0);
        assert_eq!(empty.per_assertion_average, 0.0);

        let a = assertion("proj1", date(2018, 1, 1), date(2018, 1, 5));
        let single = pairwise_intersection_stats(&[&a]);
        assert_eq!(single.intersection_count, 0);
    }
}
