//! Goodness-of-fit search across the distribution catalog.
//!
//! For each family: maximum-likelihood fit on the raw sample, then a
//! sum-of-squared-error score between the fitted density at the bin
//! centers of the Freedman-Diaconis empirical density histogram and the
//! histogram heights. The minimum-SSE family wins; ties go to the family
//! that appears first in catalog order, which is a fixed constant, so
//! selection is reproducible. A family that fails to fit is excluded and
//! logged, never fatal unless the whole catalog fails.

use serde::Serialize;
use tempo_common::{Error, Result};
use tempo_math::{freedman_diaconis_bins, Family, Histogram, Params, SampleError};
use tracing::{debug, warn};

/// One successfully scored family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateFit {
    pub family: Family,
    pub params: Params,
    /// Sum of squared error against the empirical density histogram.
    pub sse: f64,
}

/// One excluded family and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitFailure {
    pub family: Family,
    pub reason: String,
}

/// Outcome of the catalog search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitReport {
    /// Histogram bin count used for scoring.
    pub bins: usize,
    /// Scored candidates in catalog order.
    pub candidates: Vec<CandidateFit>,
    /// Families excluded from the comparison.
    pub failures: Vec<FitFailure>,
    /// The minimum-SSE candidate.
    pub selected: CandidateFit,
}

/// Fit every family in `families` against the sample and select the best.
///
/// Pure function of (sample, families, min_bins): no randomness, no I/O.
pub fn fit_families(sample: &[f64], families: &[Family], min_bins: usize) -> Result<FitReport> {
    let bins = freedman_diaconis_bins(sample, min_bins).map_err(|e| match e {
        SampleError::Empty => Error::EmptySample { stage: "binning" },
        SampleError::Degenerate { reason } => fit_failed(families.len(), sample.len(), reason),
    })?;

    let hist = Histogram::from_sample(sample, bins).map_err(|e| match e {
        SampleError::Empty => Error::EmptySample { stage: "binning" },
        SampleError::Degenerate { reason } => fit_failed(families.len(), sample.len(), reason),
    })?;

    let mut candidates = Vec::new();
    let mut failures = Vec::new();
    let mut selected: Option<CandidateFit> = None;

    for family in families {
        let params = match family.fit(sample) {
            Ok(p) => p,
            Err(e) => {
                let err = Error::FitConvergence {
                    family: family.name().to_string(),
                    reason: e.to_string(),
                };
                warn!(family = %family, recoverable = err.recoverable(), "{err}");
                failures.push(FitFailure {
                    family: *family,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let sse = sum_squared_error(&params, &hist);
        if !sse.is_finite() {
            warn!(family = %family, sse, "non-finite score; family excluded");
            failures.push(FitFailure {
                family: *family,
                reason: format!("non-finite SSE score ({sse})"),
            });
            continue;
        }

        debug!(family = %family, sse, "scored candidate");
        let candidate = CandidateFit {
            family: *family,
            params,
            sse,
        };
        candidates.push(candidate);

        // Strict less-than keeps the earliest family on an exact tie.
        if selected.map_or(true, |best| sse < best.sse) {
            selected = Some(candidate);
        }
    }

    let selected = selected.ok_or_else(|| {
        let reasons: Vec<String> = failures
            .iter()
            .map(|f| format!("{}: {}", f.family, f.reason))
            .collect();
        fit_failed(families.len(), sample.len(), reasons.join("; "))
    })?;

    Ok(FitReport {
        bins,
        candidates,
        failures,
        selected,
    })
}

fn fit_failed(tried: usize, sample_size: usize, reason: String) -> Error {
    Error::FitFailed {
        tried,
        sample_size,
        reason,
    }
}

fn sum_squared_error(params: &Params, hist: &Histogram) -> f64 {
    hist.points()
        .map(|(center, density)| {
            let diff = params.pdf(center) - density;
            diff * diff
        })
        .sum()
}
