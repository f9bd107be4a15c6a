//! Error types for projection loading and aggregation.

use thiserror::Error;

/// Result type for projflow operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A mixing recipe references a profile that was never declared.
    #[error("unknown layer profile: {0}")]
    UnknownProfile(String),

    /// Declared layer profiles disagree on their ordered layer labels.
    #[error("layer profile '{profile}' declares layers {found:?}, expected {expected:?}")]
    InconsistentLayerLabels { profile: String, expected: Vec<String>, found: Vec<String> },

    /// A grouping produced a label with no records (internal logic fault).
    #[error("grouping {spec} produced empty group '{label}'")]
    EmptyGroup { spec: String, label: String },

    /// A grouping's index sets do not cover every record exactly once (internal logic fault).
    #[error("grouping {spec} does not partition its records: {detail}")]
    PartitionCoverage { spec: String, detail: String },

    /// The projection source could not be reached or read.
    #[error("projection source unavailable: {0}")]
    SourceUnavailable(String),

    /// The projection source was read but could not be parsed.
    #[error("malformed projection source: {0}")]
    MalformedSource(String),

    /// A level selection names a layer handling or grouping kind that does not exist.
    #[error("unknown grouping spec: {0}")]
    UnknownGroupingSpec(String),

    /// No records target the requested region.
    #[error("unknown target region: {0}")]
    UnknownRegion(String),

    /// A configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),
}
