//! Schedule report assembly.
//!
//! Pulls facts from an [`AllocationSource`], validates them, and builds every
//! table the downstream reporting layer consumes. Formatting, serialization
//! to a transport format and plotting all happen downstream.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::compaction::{AllocationCompactor, AssertionRuns};
use crate::config::WorkplanConfig;
use crate::error::{ConfigError, CoreError};
use crate::model::{AllocationFact, Problem};
use crate::source::{fetch_validated, AllocationSource};
use crate::workload::{intersection_stats_by_person, IntersectionStats, WorkloadAnalyzer, WorkloadSummary};

/// Load figures for a single assertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssertionLoad {
    pub requirement: String,
    pub person: String,
    pub allocated_days: usize,
    pub allocated_hours: u64,
    /// Worked hours over available capacity on the allocation days
    pub load_ratio: f64,
    /// Allocation days over working days in the requirement window
    pub working_day_ratio: f64,
}

/// Everything the reporting layer needs about one schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// Name of the allocation source that produced the schedule
    pub source: String,
    /// day -> hours across everyone
    pub total_hours: WorkloadSummary,
    /// person -> day -> hours
    pub people_hours: BTreeMap<String, WorkloadSummary>,
    /// requirement -> day -> hours
    pub requirement_hours: BTreeMap<String, WorkloadSummary>,
    /// requirement -> person -> day -> hours
    pub requirement_people_hours: BTreeMap<String, BTreeMap<String, WorkloadSummary>>,
    /// person -> requirement -> day -> hours, over the configured leading share of the schedule
    pub person_requirement_hours: BTreeMap<String, BTreeMap<String, WorkloadSummary>>,
    /// person -> assertion -> compacted runs
    pub assertion_runs: AssertionRuns,
    /// assertion -> load figures, only for assertions with allocations
    pub assertion_load: BTreeMap<String, AssertionLoad>,
    /// person -> overlap of their assertion windows
    pub overlap: BTreeMap<String, IntersectionStats>,
}

/// Builds [`ScheduleReport`]s.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    compactor: AllocationCompactor,
    person_horizon_share: f64,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::with_settings(&WorkplanConfig::default())
    }
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from `config`.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if `config` fails validation.
    pub fn from_config(config: &WorkplanConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_settings(config))
    }

    fn with_settings(config: &WorkplanConfig) -> Self {
        Self {
            compactor: AllocationCompactor::with_cadence(config.analysis.run_cadence_working_days),
            person_horizon_share: config.report.person_horizon_share,
        }
    }

    /// Ask `source` for a schedule of `problem` and report on it.
    ///
    /// # Errors
    /// Fails if the source fails, its facts do not validate against
    /// `problem`, or any analysis precondition is violated.
    pub fn build(
        &self,
        problem: &Problem,
        source: &dyn AllocationSource,
    ) -> Result<ScheduleReport, CoreError> {
        let facts = fetch_validated(source, problem)?;
        self.build_from_facts(source.name(), problem, &facts)
    }

    /// Report on facts that were already fetched and validated.
    pub fn build_from_facts(
        &self,
        source_name: &str,
        problem: &Problem,
        facts: &[AllocationFact],
    ) -> Result<ScheduleReport, CoreError> {
        let analyzer = WorkloadAnalyzer::with_capacity(problem.daily_capacity);

        let total_hours = analyzer.total_worked_hours(facts);
        let people_hours = analyzer.people_total_worked_hours(facts);
        let requirement_hours: BTreeMap<String, WorkloadSummary> = problem
            .requirements
            .iter()
            .map(|r| (r.name.clone(), analyzer.total_worked_hours_by_requirement(&r.name, facts)))
            .collect();
        debug!(
            days = total_hours.len(),
            people = people_hours.len(),
            requirements = requirement_hours.len(),
            "aggregated worked hours"
        );

        let requirement_people_hours = problem
            .requirements
            .iter()
            .map(|r| {
                (
                    r.name.clone(),
                    analyzer.people_worked_hours_by_requirement(&r.name, facts),
                )
            })
            .collect();

        let leading = WorkloadAnalyzer::earliest_share(facts, self.person_horizon_share);
        let person_requirement_hours = analyzer
            .people_total_worked_hours(&leading)
            .into_keys()
            .map(|person| {
                let by_requirement = analyzer.requirements_worked_hours_by_person(&person, &leading);
                (person, by_requirement)
            })
            .collect();

        let assertion_runs = self.compactor.compact_by_person(facts)?;
        let assertion_load = assertion_load(&analyzer, problem, facts)?;
        let overlap = intersection_stats_by_person(problem);

        info!(
            source = source_name,
            facts = facts.len(),
            assertions = assertion_load.len(),
            "built schedule report"
        );

        Ok(ScheduleReport {
            source: source_name.to_string(),
            total_hours,
            people_hours,
            requirement_hours,
            requirement_people_hours,
            person_requirement_hours,
            assertion_runs,
            assertion_load,
            overlap,
        })
    }
}

fn assertion_load(
    analyzer: &WorkloadAnalyzer,
    problem: &Problem,
    facts: &[AllocationFact],
) -> Result<BTreeMap<String, AssertionLoad>, CoreError> {
    let mut by_assertion: BTreeMap<&str, Vec<AllocationFact>> = BTreeMap::new();
    for fact in facts {
        by_assertion
            .entry(fact.assertion.as_str())
            .or_default()
            .push(fact.clone());
    }

    let mut loads = BTreeMap::new();
    for requirement in &problem.requirements {
        for assertion in &requirement.assertions {
            let Some(assertion_facts) = by_assertion.get(assertion.id.as_str()) else {
                continue;
            };
            let summary = analyzer.total_worked_hours(assertion_facts);
            loads.insert(
                assertion.id.clone(),
                AssertionLoad {
                    requirement: requirement.name.clone(),
                    person: assertion.person.clone(),
                    allocated_days: summary.len(),
                    allocated_hours: summary.total_hours(),
                    load_ratio: analyzer.load_ratio(assertion_facts)?,
                    working_day_ratio: analyzer
                        .working_day_ratio(assertion_facts, &requirement.window)?,
                },
            );
        }
    }
    Ok(loads)
}
