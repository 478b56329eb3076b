//! Freedman-Diaconis binning and empirical density histograms.

use serde::Serialize;

use crate::descriptive::percentile;
use crate::SampleError;

/// Freedman-Diaconis bin width: `2 * IQR * n^(-1/3)`.
pub fn fd_bin_width(iqr: f64, n: usize) -> f64 {
    2.0 * iqr * (n as f64).powf(-1.0 / 3.0)
}

/// Recommended histogram bin count for a sample.
///
/// Uses the Freedman-Diaconis rule; a degenerate sample (zero IQR or zero
/// range) falls back to `min_bins` rather than dividing by zero, and the
/// result is floored at `min_bins`.
pub fn freedman_diaconis_bins(sample: &[f64], min_bins: usize) -> Result<usize, SampleError> {
    if sample.is_empty() {
        return Err(SampleError::Empty);
    }
    let min_bins = min_bins.max(1);

    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let iqr = percentile(&sorted, 0.75) - percentile(&sorted, 0.25);
    if iqr <= 0.0 {
        return Ok(min_bins);
    }

    let width = fd_bin_width(iqr, sample.len());
    let span = sorted[sorted.len() - 1] - sorted[0];
    if width <= 0.0 || span <= 0.0 {
        return Ok(min_bins);
    }

    let bins = (span / width).ceil() as usize;
    Ok(bins.max(min_bins))
}

/// Empirical density histogram over equal-width bins.
///
/// Heights are normalized so that `sum(density * width) == 1`, matching
/// the density histograms the fitter scores against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Lower edge of the first bin (sample minimum).
    pub start: f64,
    /// Width of every bin.
    pub width: f64,
    /// Normalized bin heights.
    pub densities: Vec<f64>,
}

impl Histogram {
    /// Bin the sample into `bins` equal-width bins across its range.
    ///
    /// The maximum observation is counted in the last bin. Fails for an
    /// empty sample or a zero-width range.
    pub fn from_sample(sample: &[f64], bins: usize) -> Result<Self, SampleError> {
        if sample.is_empty() {
            return Err(SampleError::Empty);
        }
        let bins = bins.max(1);

        let min = sample.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = sample.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;
        if !(span > 0.0) {
            return Err(SampleError::Degenerate {
                reason: "sample range has zero width, cannot form density bins".into(),
            });
        }

        let width = span / bins as f64;
        let mut counts = vec![0usize; bins];
        for x in sample {
            let mut idx = ((x - min) / width) as usize;
            if idx >= bins {
                idx = bins - 1;
            }
            counts[idx] += 1;
        }

        let norm = sample.len() as f64 * width;
        let densities = counts.iter().map(|c| *c as f64 / norm).collect();

        Ok(Histogram {
            start: min,
            width,
            densities,
        })
    }

    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.densities.len()
    }

    /// Center of bin `i`.
    pub fn center(&self, i: usize) -> f64 {
        self.start + (i as f64 + 0.5) * self.width
    }

    /// Iterator over `(center, density)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.densities
            .iter()
            .enumerate()
            .map(|(i, d)| (self.center(i), *d))
    }
}
