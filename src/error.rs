//! Error types for the derivation pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::layout::LayoutError;

/// Failure to look up a value inside a single snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The metric path is absent from the snapshot.
    #[error("metric `{path}` not found")]
    MetricNotFound { path: String },

    /// The metric exists but does not expose the requested statistic.
    #[error("metric `{path}` has no statistic `{stat}`")]
    StatisticNotFound { path: String, stat: String },
}

/// Errors that abort a dashboard run. All of them are fatal.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input file missing or unreadable.
    #[error("cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line is not a valid snapshot record.
    #[error("line {line}: invalid snapshot record: {source}")]
    RecordParse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A metric or statistic is missing at the given (1-based) tick.
    #[error("tick {tick}: {source}")]
    Lookup {
        tick: usize,
        #[source]
        source: LookupError,
    },

    /// A growth baseline or ratio denominator is zero.
    #[error("division by zero in {context} at index {index}")]
    DivisionByZero { context: &'static str, index: usize },

    /// Series combined elementwise have different lengths.
    #[error("series length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Growth windows must hold at least one element.
    #[error("chunk size must be positive")]
    InvalidChunkSize,

    /// A linear combination was requested with no terms.
    #[error("linear combination needs at least one term")]
    EmptyCombination,

    /// Invalid panel placement.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Dashboard definition could not be loaded.
    #[error("invalid dashboard definition: {0}")]
    Dashboard(#[from] config::ConfigError),
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;
