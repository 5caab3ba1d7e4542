//! Aggregation of allocation facts into workload tables and ratios.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::overlap::{pairwise_intersection_stats, IntersectionStats};
use super::summary::WorkloadSummary;
use crate::error::AnalysisError;
use crate::interval::TimeInterval;
use crate::model::{AllocationFact, Assertion};

/// Hours one person can work per day unless configured otherwise.
pub const DEFAULT_DAILY_CAPACITY: u32 = 8;

/// Analyzer for workload tables and ratios.
#[derive(Debug, Clone)]
pub struct WorkloadAnalyzer {
    /// Maximum hours one person works per day
    pub daily_capacity: u32,
}

impl Default for WorkloadAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkloadAnalyzer {
    /// Create an analyzer with the default 8-hour daily capacity.
    pub fn new() -> Self {
        Self {
            daily_capacity: DEFAULT_DAILY_CAPACITY,
        }
    }

    /// Create an analyzer with a custom daily capacity.
    pub fn with_capacity(daily_capacity: u32) -> Self {
        Self { daily_capacity }
    }

    /// Hours per day summed across every person.
    pub fn total_worked_hours(&self, facts: &[AllocationFact]) -> WorkloadSummary {
        facts.iter().collect()
    }

    /// Hours per day for one person.
    pub fn person_worked_hours(&self, person: &str, facts: &[AllocationFact]) -> WorkloadSummary {
        facts.iter().filter(|f| f.person == person).collect()
    }

    /// Hours per day, one summary per key produced by `key_fn`.
    pub fn worked_hours_grouped_by<K, F>(
        &self,
        facts: &[AllocationFact],
        key_fn: F,
    ) -> BTreeMap<K, WorkloadSummary>
    where
        K: Ord,
        F: Fn(&AllocationFact) -> K,
    {
        let mut groups: BTreeMap<K, Vec<(NaiveDate, u32)>> = BTreeMap::new();
        for fact in facts {
            groups
                .entry(key_fn(fact))
                .or_default()
                .push((fact.day, fact.hours));
        }

        debug!(facts = facts.len(), groups = groups.len(), "grouped worked hours");
        groups
            .into_iter()
            .map(|(key, days)| (key, days.into_iter().collect::<WorkloadSummary>()))
            .collect()
    }

    /// person -> day -> hours
    pub fn people_total_worked_hours(
        &self,
        facts: &[AllocationFact],
    ) -> BTreeMap<String, WorkloadSummary> {
        self.worked_hours_grouped_by(facts, |f| f.person.clone())
    }

    /// person -> day -> hours, restricted to one requirement.
    pub fn people_worked_hours_by_requirement(
        &self,
        requirement: &str,
        facts: &[AllocationFact],
    ) -> BTreeMap<String, WorkloadSummary> {
        let filtered: Vec<AllocationFact> = facts
            .iter()
            .filter(|f| f.requirement == requirement)
            .cloned()
            .collect();
        self.worked_hours_grouped_by(&filtered, |f| f.person.clone())
    }

    /// day -> hours for one requirement across every person.
    pub fn total_worked_hours_by_requirement(
        &self,
        requirement: &str,
        facts: &[AllocationFact],
    ) -> WorkloadSummary {
        facts.iter().filter(|f| f.requirement == requirement).collect()
    }

    /// requirement -> day -> hours for one person.
    pub fn requirements_worked_hours_by_person(
        &self,
        person: &str,
        facts: &[AllocationFact],
    ) -> BTreeMap<String, WorkloadSummary> {
        let filtered: Vec<AllocationFact> = facts
            .iter()
            .filter(|f| f.person == person)
            .cloned()
            .collect();
        self.worked_hours_grouped_by(&filtered, |f| f.requirement.clone())
    }

    /// Fraction of available capacity consumed on the allocation days.
    ///
    /// `sum(hours) / (distinct days * daily_capacity)`.
    ///
    /// # Errors
    /// Returns [`AnalysisError::DivisionByZero`] when there are no allocation
    /// days or the daily capacity is zero.
    pub fn load_ratio(&self, facts: &[AllocationFact]) -> Result<f64, AnalysisError> {
        let days = distinct_days(facts);
        if days == 0 {
            return Err(AnalysisError::DivisionByZero("no allocation days"));
        }
        if self.daily_capacity == 0 {
            return Err(AnalysisError::DivisionByZero("daily capacity is zero"));
        }

        let worked: u64 = facts.iter().map(|f| u64::from(f.hours)).sum();
        Ok(worked as f64 / (days as f64 * f64::from(self.daily_capacity)))
    }

    /// Allocation days as a fraction of the working days in `requirement_window`.
    ///
    /// # Errors
    /// Returns [`AnalysisError::DivisionByZero`] when the window holds no working day.
    pub fn working_day_ratio(
        &self,
        facts: &[AllocationFact],
        requirement_window: &TimeInterval,
    ) -> Result<f64, AnalysisError> {
        let working_days = requirement_window.working_days();
        if working_days == 0 {
            return Err(AnalysisError::DivisionByZero("requirement window has no working days"));
        }
        Ok(distinct_days(facts) as f64 / working_days as f64)
    }

    /// Pairwise overlap of one person's assertions.
    pub fn pairwise_intersection_stats(&self, assertions: &[&Assertion]) -> IntersectionStats {
        pairwise_intersection_stats(assertions)
    }

    /// The earliest `fraction` of facts by day, rounded up.
    ///
    /// `fraction` is clamped to `[0, 1]`. Facts on the same day keep their
    /// input order.
    pub fn earliest_share(facts: &[AllocationFact], fraction: f64) -> Vec<AllocationFact> {
        let mut sorted = facts.to_vec();
        sorted.sort_by_key(|f| f.day);
        let keep = (sorted.len() as f64 * fraction.clamp(0.0, 1.0)).ceil() as usize;
        sorted.truncate(keep);
        sorted
    }
}

fn distinct_days(facts: &[AllocationFact]) -> usize {
    facts.iter().map(|f| f.day).collect::<BTreeSet<_>>().len()
}
