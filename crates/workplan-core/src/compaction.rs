//! Allocation compaction.
//!
//! Collapses the daily allocations of one assertion into maximal runs of
//! constant hours. Consecutive allocation days belong to the same run when
//! the later one falls exactly `cadence` working days after the earlier one
//! and both carry the same hours.
//!
//! A closed run spans `[first day, last day + 1)`, so it may cover weekend or
//! skipped days that are not allocation days themselves. Every input day
//! still lands in exactly one run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::calendar;
use crate::error::AnalysisError;
use crate::interval::TimeInterval;
use crate::model::AllocationFact;

/// Working days expected between successive allocation days of one run.
pub const DEFAULT_RUN_CADENCE: u32 = 2;

/// A run of allocation days sharing the same hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactedAllocation {
    pub interval: TimeInterval,
    pub hours: u32,
}

/// person -> assertion -> ordered runs
pub type AssertionRuns = BTreeMap<String, BTreeMap<String, Vec<CompactedAllocation>>>;

/// Run-length encoder for daily allocations.
#[derive(Debug, Clone)]
pub struct AllocationCompactor {
    cadence_working_days: u32,
}

impl Default for AllocationCompactor {
    fn default() -> Self {
        Self::new()
    }
}

impl AllocationCompactor {
    /// Create a compactor using the default two-working-day cadence.
    pub fn new() -> Self {
        Self {
            cadence_working_days: DEFAULT_RUN_CADENCE,
        }
    }

    /// Create a compactor with a custom cadence.
    pub fn with_cadence(cadence_working_days: u32) -> Self {
        Self {
            cadence_working_days,
        }
    }

    pub fn cadence(&self) -> u32 {
        self.cadence_working_days
    }

    /// Compact `(day, hours)` pairs for a single assertion.
    ///
    /// The input must be sorted ascending by day without duplicates; it is
    /// checked, never re-sorted. A run is closed with the hours of its last
    /// day, which equal those of every other day in the run.
    ///
    /// # Errors
    /// - [`AnalysisError::EmptyInput`] when `days` is empty
    /// - [`AnalysisError::UnorderedInput`] when a day does not follow its predecessor
    /// - [`AnalysisError::DateOutOfRange`] when calendar arithmetic overflows
    pub fn compact(
        &self,
        days: &[(NaiveDate, u32)],
    ) -> Result<Vec<CompactedAllocation>, AnalysisError> {
        let (first_day, _) = *days.first().ok_or(AnalysisError::EmptyInput)?;
        let cadence = i64::from(self.cadence_working_days);

        let mut runs = Vec::new();
        let mut run_start = first_day;

        for pair in days.windows(2) {
            let (previous_day, previous_hours) = pair[0];
            let (day, hours) = pair[1];

            if day <= previous_day {
                return Err(AnalysisError::UnorderedInput {
                    previous: previous_day,
                    current: day,
                });
            }

            let expected = calendar::nth_working_day_from(cadence, previous_day)?;
            if day != expected || hours != previous_hours {
                runs.push(close_run(run_start, previous_day, previous_hours)?);
                run_start = day;
            }
        }

        let (last_day, last_hours) = days[days.len() - 1];
        runs.push(close_run(run_start, last_day, last_hours)?);

        debug!(days = days.len(), runs = runs.len(), "compacted allocation days");
        Ok(runs)
    }

    /// Compact the facts of one assertion, already sorted by day.
    pub fn compact_facts(
        &self,
        facts: &[AllocationFact],
    ) -> Result<Vec<CompactedAllocation>, AnalysisError> {
        let days: Vec<(NaiveDate, u32)> = facts.iter().map(|f| (f.day, f.hours)).collect();
        self.compact(&days)
    }

    /// Group facts by person and assertion, sort each group by day, and compact it.
    ///
    /// People or assertions without facts simply do not appear.
    pub fn compact_by_person(&self, facts: &[AllocationFact]) -> Result<AssertionRuns, AnalysisError> {
        let mut grouped: BTreeMap<&str, BTreeMap<&str, Vec<(NaiveDate, u32)>>> = BTreeMap::new();
        for fact in facts {
            grouped
                .entry(fact.person.as_str())
                .or_default()
                .entry(fact.assertion.as_str())
                .or_default()
                .push((fact.day, fact.hours));
        }

        let mut result = AssertionRuns::new();
        for (person, assertions) in grouped {
            let mut by_assertion = BTreeMap::new();
            for (assertion, mut days) in assertions {
                days.sort_by_key(|(day, _)| *day);
                by_assertion.insert(assertion.to_string(), self.compact(&days)?);
            }
            result.insert(person.to_string(), by_assertion);
        }

        debug!(people = result.len(), "compacted allocations by person");
        Ok(result)
    }
}

fn close_run(
    start: NaiveDate,
    last_day: NaiveDate,
    hours: u32,
) -> Result<CompactedAllocation, AnalysisError> {
    let end = last_day
        .succ_opt()
        .ok_or(AnalysisError::DateOutOfRange(last_day))?;
    Ok(CompactedAllocation {
        interval: TimeInterval::new(start, end)?,
        hours,
    })
}
