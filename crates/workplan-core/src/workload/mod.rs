//! Workload analysis.
//!
//! Aggregates allocation facts into day-by-day hour tables, computes load
//! ratios against daily capacity, and measures how much a person's
//! assertions overlap in time.

mod analyzer;
mod overlap;
mod summary;

pub use analyzer::{WorkloadAnalyzer, DEFAULT_DAILY_CAPACITY};
pub use overlap::{intersection_stats_by_person, pairwise_intersection_stats, AssertionOverlap, IntersectionStats};
pub use summary::WorkloadSummary;
