//! Error types for Event Tempo.
//!
//! The taxonomy distinguishes structural failures (store unreachable,
//! corrupt records, empty snapshots) from per-family fit failures, which
//! are recoverable: a family that does not converge is excluded from the
//! model comparison without aborting the run.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for Event Tempo operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Event store access errors (connection, record schema).
    Store,
    /// Data-quality errors in the loaded sample.
    Data,
    /// Distribution fitting errors.
    Fit,
    /// Configuration errors.
    Config,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorCategory::Store => "store",
            ErrorCategory::Data => "data",
            ErrorCategory::Fit => "fit",
            ErrorCategory::Config => "config",
            ErrorCategory::Io => "io",
        };
        write!(f, "{s}")
    }
}

/// Errors surfaced by the analysis pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// The event snapshot produced no usable data at the named stage.
    #[error("empty sample at stage '{stage}': no data to analyze")]
    EmptySample {
        /// Pipeline stage that found the snapshot empty.
        stage: &'static str,
    },

    /// Fewer observations than the configured minimum.
    #[error("insufficient data: got {got} observations, required {required}")]
    InsufficientData { got: usize, required: usize },

    /// Timestamp ordering violated in a context that demands sorted input.
    #[error("timestamp ordering violation: {reason}")]
    Ordering { reason: String },

    /// A persisted record does not match the expected event shape.
    #[error("event log schema error at line {line}: {reason}")]
    Schema { line: usize, reason: String },

    /// The event store could not be reached.
    #[error("event store unreachable at {path:?}: {source}")]
    Connection {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// One distribution family failed to fit. Recoverable: the family is
    /// excluded from the comparison.
    #[error("fit did not converge for family '{family}': {reason}")]
    FitConvergence { family: String, reason: String },

    /// Every family in the catalog failed to fit.
    #[error("no distribution could be fit ({tried} families tried, sample size {sample_size}): {reason}")]
    FitFailed {
        tried: usize,
        sample_size: usize,
        reason: String,
    },

    /// Invalid configuration.
    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// Underlying I/O failure outside the store access path.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Category of this error for grouping and structured output.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Schema { .. } | Error::Connection { .. } => ErrorCategory::Store,
            Error::EmptySample { .. }
            | Error::InsufficientData { .. }
            | Error::Ordering { .. } => ErrorCategory::Data,
            Error::FitConvergence { .. } | Error::FitFailed { .. } => ErrorCategory::Fit,
            Error::Config { .. } => ErrorCategory::Config,
            Error::Io(_) => ErrorCategory::Io,
        }
    }

    /// Whether the pipeline can continue past this error.
    ///
    /// Only per-family fit failures are recoverable; everything else
    /// aborts the run.
    pub fn recoverable(&self) -> bool {
        matches!(self, Error::FitConvergence { .. })
    }
}
