//! Event Tempo numeric core.
//!
//! This crate provides:
//! - Descriptive statistics over a numeric sample (pandas-compatible
//!   interpolation and bias corrections)
//! - Freedman-Diaconis histogram binning
//! - A catalog of continuous distribution families with maximum-likelihood
//!   estimators, densities, and closed-form theoretical moments
//!
//! Kurtosis is reported in the bias-corrected **excess** convention
//! throughout: a normal sample reads near 0 and the exponential model's
//! theoretical kurtosis is 6.

pub mod binning;
pub mod descriptive;
pub mod dist;

use thiserror::Error;

pub use binning::{fd_bin_width, freedman_diaconis_bins, Histogram};
pub use descriptive::{percentile, summarize, DescriptiveStats};
pub use dist::{Family, FitError, Params, TheoreticalMoments};

/// Errors for sample-level computations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    /// The sample contains no observations.
    #[error("empty sample")]
    Empty,

    /// The sample has zero spread and the operation needs a range.
    #[error("degenerate sample: {reason}")]
    Degenerate { reason: String },
}
