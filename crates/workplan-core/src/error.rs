//! Core error types for workplan-core.
//!
//! Analysis errors are precondition failures: they surface immediately and
//! are never retried, since every operation is pure and deterministic.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for workplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Calendar, interval, compaction or ratio errors
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Scheduler output failed validation
    #[error("Allocation error: {0}")]
    Allocation(#[from] AllocationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The allocation source could not produce facts
    #[error("Allocation source '{source_name}' failed: {message}")]
    Source {
        source_name: String,
        message: String,
    },
}

/// Contract violations raised by the analysis core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Interval constructed with `end <= start`
    #[error("Invalid interval: end {end} is not after start {start}")]
    InvalidInterval { start: NaiveDate, end: NaiveDate },

    /// Argument outside the accepted domain (e.g. a negative day offset)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Compaction invoked on zero allocation days
    #[error("Cannot compact an empty allocation sequence")]
    EmptyInput,

    /// Ratio whose denominator is zero
    #[error("Division by zero: {0}")]
    DivisionByZero(&'static str),

    /// Compaction input is not strictly ascending by day
    #[error("Allocation days out of order: {current} follows {previous}")]
    UnorderedInput {
        previous: NaiveDate,
        current: NaiveDate,
    },

    /// Calendar arithmetic left the representable date range
    #[error("Date arithmetic overflowed past {0}")]
    DateOutOfRange(NaiveDate),
}

/// Scheduler output that does not fit the problem it was generated for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// A single day carries more hours than a person can work
    #[error("Assertion '{assertion}' allocates {hours}h on {day}, above the daily capacity of {capacity}h")]
    ExceedsCapacity {
        assertion: String,
        day: NaiveDate,
        hours: u32,
        capacity: u32,
    },

    /// Fact references an assertion the problem does not define
    #[error("Unknown assertion: {0}")]
    UnknownAssertion(String),

    /// Fact's person differs from the assertion's person
    #[error("Assertion '{assertion}' belongs to '{expected}' but was allocated to '{found}'")]
    PersonMismatch {
        assertion: String,
        expected: String,
        found: String,
    },

    /// Two facts for one assertion on the same day
    #[error("Assertion '{assertion}' is allocated twice on {day}")]
    DuplicateDay { assertion: String, day: NaiveDate },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the config file failed
    #[error("Configuration I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Failed to serialize configuration
    #[error("Failed to serialize configuration: {0}")]
    SerializeFailed(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Dot-path key does not name a config field
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// Home directory could not be determined
    #[error("Could not determine the configuration directory")]
    NoConfigDir,
}

/// Result type alias for workplan-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
