//! # Workplan Core Library
//!
//! This library turns the day-by-day allocations produced by a deadline-aware
//! scheduling engine into compact, report-ready structures. The scheduler
//! itself lives outside this crate and is reached through the
//! [`AllocationSource`] trait; everything here is pure, synchronous analysis
//! over in-memory data.
//!
//! ## Architecture
//!
//! - **Calendar**: Monday-Friday working-day classification and arithmetic
//! - **Interval**: Half-open date intervals with intersection queries
//! - **Compaction**: Run-length encoding of daily allocations into
//!   constant-hour intervals
//! - **Workload**: Day-by-day hour aggregation, load ratios and pairwise
//!   assertion overlap statistics
//! - **Report**: One-pass assembly of every shape downstream consumers need
//!
//! ## Key Components
//!
//! - [`AllocationCompactor`]: Collapses an assertion's daily allocations into runs
//! - [`WorkloadAnalyzer`]: Aggregates allocation facts into [`WorkloadSummary`] tables
//! - [`ReportBuilder`]: Pulls facts from a source and builds a [`ScheduleReport`]
//! - [`WorkplanConfig`]: TOML-backed analysis configuration

pub mod calendar;
pub mod compaction;
pub mod config;
pub mod error;
pub mod interval;
pub mod model;
pub mod report;
pub mod source;
pub mod workload;

pub use compaction::{AllocationCompactor, AssertionRuns, CompactedAllocation};
pub use config::WorkplanConfig;
pub use error::{AllocationError, AnalysisError, ConfigError, CoreError};
pub use interval::TimeInterval;
pub use model::{AllocationFact, Assertion, Identified, Person, Problem, Requirement};
pub use report::{AssertionLoad, ReportBuilder, ScheduleReport};
pub use source::{AllocationSource, PrecomputedAllocations};
pub use workload::{AssertionOverlap, IntersectionStats, WorkloadAnalyzer, WorkloadSummary};
