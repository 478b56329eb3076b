//! Descriptive statistics over a numeric sample.
//!
//! Conventions match the usual dataframe-library defaults so summaries
//! are directly comparable with notebook output:
//! - percentiles use linear interpolation on the `(n-1)*q` position
//! - standard deviation uses the n-1 denominator
//! - skewness is the adjusted Fisher-Pearson coefficient (G1)
//! - kurtosis is bias-corrected excess (G2); a normal sample reads ~0

use serde::{Deserialize, Serialize};

use crate::SampleError;

/// Immutable summary of one numeric sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub n: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n-1 denominator); 0.0 for n = 1.
    pub std_dev: f64,
    pub q25: f64,
    pub q75: f64,
    /// Adjusted Fisher-Pearson skewness (G1); 0.0 when undefined (n < 3
    /// or zero variance).
    pub skewness: f64,
    /// Bias-corrected excess kurtosis (G2); 0.0 when undefined (n < 4 or
    /// zero variance).
    pub kurtosis: f64,
}

impl DescriptiveStats {
    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q75 - self.q25
    }

    /// Sample variance (n-1 denominator).
    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }
}

/// Linearly interpolated percentile of a sorted, non-empty slice.
///
/// `q` is in `[0, 1]`. Position is `(n-1)*q`; fractional positions
/// interpolate between the two surrounding order statistics.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    debug_assert!((0.0..=1.0).contains(&q));

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Compute the descriptive summary of a sample.
///
/// Fails with [`SampleError::Empty`] for n = 0. For n = 1 the dispersion
/// measures are defined as 0.0 rather than NaN so downstream consumers
/// never see NaN-filled records.
pub fn summarize(sample: &[f64]) -> Result<DescriptiveStats, SampleError> {
    if sample.is_empty() {
        return Err(SampleError::Empty);
    }

    let n = sample.len();
    let nf = n as f64;

    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let min = sorted[0];
    let max = sorted[n - 1];
    let mean = sorted.iter().sum::<f64>() / nf;

    // Central moments with the n denominator; corrections applied below.
    let mut m2 = 0.0;
    let mut m3 = 0.0;
    let mut m4 = 0.0;
    for x in &sorted {
        let d = x - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    m2 /= nf;
    m3 /= nf;
    m4 /= nf;

    let std_dev = if n > 1 {
        (m2 * nf / (nf - 1.0)).sqrt()
    } else {
        0.0
    };

    let skewness = if n >= 3 && m2 > 0.0 {
        let g1 = m3 / m2.powf(1.5);
        (nf * (nf - 1.0)).sqrt() / (nf - 2.0) * g1
    } else {
        0.0
    };

    let kurtosis = if n >= 4 && m2 > 0.0 {
        let g2 = m4 / (m2 * m2) - 3.0;
        ((nf + 1.0) * g2 + 6.0) * (nf - 1.0) / ((nf - 2.0) * (nf - 3.0))
    } else {
        0.0
    };

    Ok(DescriptiveStats {
        n,
        min,
        max,
        mean,
        median: percentile(&sorted, 0.5),
        std_dev,
        q25: percentile(&sorted, 0.25),
        q75: percentile(&sorted, 0.75),
        skewness,
        kurtosis,
    })
}
