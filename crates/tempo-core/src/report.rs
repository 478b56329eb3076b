//! The analysis report: pure data handed to rendering collaborators.

use serde::Serialize;
use tempo_math::{DescriptiveStats, Params, TheoreticalMoments};

use crate::fit::FitReport;

/// Complete result of one pipeline run.
///
/// Carries everything a reporting or plotting collaborator needs: the
/// descriptive summary, every candidate score, the selected model with
/// its bin count, and (via [`AnalysisReport::sample`]) the raw
/// interarrival sample itself. The core performs no rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Number of interarrival observations analyzed.
    pub sample_size: usize,

    /// True when the sample is below the configured minimum and the run
    /// proceeded in warn mode; fit results should be treated as unstable.
    pub below_minimum: bool,

    /// Descriptive summary of the interarrival sample.
    pub stats: DescriptiveStats,

    /// Catalog search outcome.
    pub fit: FitReport,

    /// Theoretical moments of the selected model.
    pub moments: TheoreticalMoments,

    /// Estimated event rate `1 / scale` when the selected model is
    /// exponential (the Poisson-process reading of the fit).
    pub lambda: Option<f64>,

    /// Raw interarrival sample, kept out of serialized output.
    #[serde(skip)]
    sample: Vec<f64>,
}

impl AnalysisReport {
    pub(crate) fn new(
        below_minimum: bool,
        stats: DescriptiveStats,
        fit: FitReport,
        sample: Vec<f64>,
    ) -> Self {
        let moments = fit.selected.params.moments();
        let lambda = match fit.selected.params {
            Params::Exponential { scale, .. } => Some(1.0 / scale),
            _ => None,
        };
        AnalysisReport {
            sample_size: sample.len(),
            below_minimum,
            stats,
            fit,
            moments,
            lambda,
            sample,
        }
    }

    /// The raw interarrival sample, for histogram rendering.
    pub fn sample(&self) -> &[f64] {
        &self.sample
    }
}
