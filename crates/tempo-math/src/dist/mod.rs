//! Continuous distribution catalog for goodness-of-fit search.
//!
//! The catalog is a registry: each family pairs a maximum-likelihood
//! parameter estimator with a density and closed-form theoretical
//! moments. New families are added by extending the enum and the three
//! dispatch points, not by subclassing anything.
//!
//! Catalog iteration order is a fixed constant; the fitter breaks SSE
//! ties by taking the first family encountered, so this order is part of
//! the reproducibility contract.

pub mod estimate;
pub mod moments;

use serde::{Deserialize, Serialize};
use statrs::distribution::{
    Cauchy, ChiSquared, Continuous, Exp, Gamma, LogNormal, Normal, Uniform, Weibull,
};
use thiserror::Error;

/// Errors from fitting one distribution family.
///
/// These are always scoped to a single family; the fitter excludes the
/// family and continues with the rest of the catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    /// The family's support does not cover the observed data.
    #[error("family '{family}' does not support this sample: {reason}")]
    Unsupported { family: Family, reason: String },

    /// The sample is too degenerate to identify the parameters.
    #[error("family '{family}' is degenerate on this sample: {reason}")]
    Degenerate { family: Family, reason: String },

    /// The shape-parameter solver exhausted its iteration budget.
    #[error("family '{family}' estimator did not converge after {iterations} iterations")]
    NonConvergence { family: Family, iterations: usize },
}

/// Distribution families known to the fitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Exponential,
    Gamma,
    LogNormal,
    Weibull,
    Normal,
    Cauchy,
    ChiSquared,
    Rayleigh,
    Uniform,
    PowerLaw,
}

impl Family {
    /// Full catalog in fixed iteration order (the SSE tie-break order).
    pub const CATALOG: [Family; 10] = [
        Family::Exponential,
        Family::Gamma,
        Family::LogNormal,
        Family::Weibull,
        Family::Normal,
        Family::Cauchy,
        Family::ChiSquared,
        Family::Rayleigh,
        Family::Uniform,
        Family::PowerLaw,
    ];

    /// Stable identifier for logs and structured output.
    pub fn name(&self) -> &'static str {
        match self {
            Family::Exponential => "exponential",
            Family::Gamma => "gamma",
            Family::LogNormal => "lognormal",
            Family::Weibull => "weibull",
            Family::Normal => "normal",
            Family::Cauchy => "cauchy",
            Family::ChiSquared => "chi_squared",
            Family::Rayleigh => "rayleigh",
            Family::Uniform => "uniform",
            Family::PowerLaw => "power_law",
        }
    }

    /// Maximum-likelihood fit of this family on the raw sample.
    pub fn fit(&self, sample: &[f64]) -> Result<Params, FitError> {
        if sample.len() < 2 {
            return Err(FitError::Degenerate {
                family: *self,
                reason: format!("need at least 2 observations, got {}", sample.len()),
            });
        }
        match self {
            Family::Exponential => estimate::fit_exponential(sample),
            Family::Gamma => estimate::fit_gamma(sample),
            Family::LogNormal => estimate::fit_lognormal(sample),
            Family::Weibull => estimate::fit_weibull(sample),
            Family::Normal => estimate::fit_normal(sample),
            Family::Cauchy => estimate::fit_cauchy(sample),
            Family::ChiSquared => estimate::fit_chi_squared(sample),
            Family::Rayleigh => estimate::fit_rayleigh(sample),
            Family::Uniform => estimate::fit_uniform(sample),
            Family::PowerLaw => estimate::fit_power_law(sample),
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Fitted parameters of one family.
///
/// Parameterizations follow the usual conventions: `scale` is 1/rate for
/// the exponential, `mu`/`sigma` are the log-space parameters of the
/// lognormal, and the chi-squared carries an explicit scale so it can
/// track seconds-valued data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Params {
    Exponential { loc: f64, scale: f64 },
    Gamma { shape: f64, scale: f64 },
    LogNormal { mu: f64, sigma: f64 },
    Weibull { shape: f64, scale: f64 },
    Normal { mean: f64, std_dev: f64 },
    Cauchy { loc: f64, scale: f64 },
    ChiSquared { df: f64, scale: f64 },
    Rayleigh { scale: f64 },
    Uniform { min: f64, max: f64 },
    PowerLaw { exponent: f64, loc: f64, scale: f64 },
}

impl Params {
    /// Family these parameters belong to.
    pub fn family(&self) -> Family {
        match self {
            Params::Exponential { .. } => Family::Exponential,
            Params::Gamma { .. } => Family::Gamma,
            Params::LogNormal { .. } => Family::LogNormal,
            Params::Weibull { .. } => Family::Weibull,
            Params::Normal { .. } => Family::Normal,
            Params::Cauchy { .. } => Family::Cauchy,
            Params::ChiSquared { .. } => Family::ChiSquared,
            Params::Rayleigh { .. } => Family::Rayleigh,
            Params::Uniform { .. } => Family::Uniform,
            Params::PowerLaw { .. } => Family::PowerLaw,
        }
    }

    /// Named parameter values, in conventional order, for rendering.
    pub fn named_values(&self) -> Vec<(&'static str, f64)> {
        match *self {
            Params::Exponential { loc, scale } => vec![("loc", loc), ("scale", scale)],
            Params::Gamma { shape, scale } => vec![("shape", shape), ("scale", scale)],
            Params::LogNormal { mu, sigma } => vec![("mu", mu), ("sigma", sigma)],
            Params::Weibull { shape, scale } => vec![("shape", shape), ("scale", scale)],
            Params::Normal { mean, std_dev } => vec![("mean", mean), ("std_dev", std_dev)],
            Params::Cauchy { loc, scale } => vec![("loc", loc), ("scale", scale)],
            Params::ChiSquared { df, scale } => vec![("df", df), ("scale", scale)],
            Params::Rayleigh { scale } => vec![("scale", scale)],
            Params::Uniform { min, max } => vec![("min", min), ("max", max)],
            Params::PowerLaw {
                exponent,
                loc,
                scale,
            } => vec![("exponent", exponent), ("loc", loc), ("scale", scale)],
        }
    }

    /// Fitted probability density at `x`.
    ///
    /// Returns 0.0 outside the support and NaN only if the parameters
    /// themselves are invalid (the estimators do not produce such
    /// parameter sets).
    pub fn pdf(&self, x: f64) -> f64 {
        match *self {
            Params::Exponential { loc, scale } => match Exp::new(1.0 / scale) {
                Ok(d) if x >= loc => d.pdf(x - loc),
                Ok(_) => 0.0,
                Err(_) => f64::NAN,
            },
            Params::Gamma { shape, scale } => match Gamma::new(shape, 1.0 / scale) {
                Ok(d) if x > 0.0 => d.pdf(x),
                Ok(_) => 0.0,
                Err(_) => f64::NAN,
            },
            Params::LogNormal { mu, sigma } => match LogNormal::new(mu, sigma) {
                Ok(d) if x > 0.0 => d.pdf(x),
                Ok(_) => 0.0,
                Err(_) => f64::NAN,
            },
            Params::Weibull { shape, scale } => match Weibull::new(shape, scale) {
                Ok(d) if x >= 0.0 => d.pdf(x),
                Ok(_) => 0.0,
                Err(_) => f64::NAN,
            },
            Params::Normal { mean, std_dev } => match Normal::new(mean, std_dev) {
                Ok(d) => d.pdf(x),
                Err(_) => f64::NAN,
            },
            Params::Cauchy { loc, scale } => match Cauchy::new(loc, scale) {
                Ok(d) => d.pdf(x),
                Err(_) => f64::NAN,
            },
            Params::ChiSquared { df, scale } => match ChiSquared::new(df) {
                Ok(d) if x > 0.0 && scale > 0.0 => d.pdf(x / scale) / scale,
                Ok(_) => 0.0,
                Err(_) => f64::NAN,
            },
            Params::Rayleigh { scale } => {
                if scale <= 0.0 {
                    f64::NAN
                } else if x < 0.0 {
                    0.0
                } else {
                    let s2 = scale * scale;
                    x / s2 * (-x * x / (2.0 * s2)).exp()
                }
            }
            Params::Uniform { min, max } => match Uniform::new(min, max) {
                Ok(d) => d.pdf(x),
                Err(_) => f64::NAN,
            },
            Params::PowerLaw {
                exponent,
                loc,
                scale,
            } => {
                if !(scale > 0.0) || !(exponent > 0.0) {
                    return f64::NAN;
                }
                let z = (x - loc) / scale;
                if !(0.0..=1.0).contains(&z) {
                    0.0
                } else {
                    exponent * z.powf(exponent - 1.0) / scale
                }
            }
        }
    }

    /// Closed-form theoretical moments of the fitted model.
    pub fn moments(&self) -> TheoreticalMoments {
        moments::theoretical_moments(self)
    }
}

/// Theoretical moments of a parameterized family.
///
/// Kurtosis uses the excess convention to stay comparable with the
/// descriptive statistics engine. Families without defined moments (the
/// Cauchy) report NaN throughout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TheoreticalMoments {
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub skewness: f64,
    /// Excess kurtosis (normal = 0, exponential = 6).
    pub kurtosis: f64,
}

impl TheoreticalMoments {
    /// Whether every moment is a finite number.
    pub fn is_defined(&self) -> bool {
        self.mean.is_finite()
            && self.variance.is_finite()
            && self.std_dev.is_finite()
            && self.skewness.is_finite()
            && self.kurtosis.is_finite()
    }

    pub(crate) fn undefined() -> Self {
        TheoreticalMoments {
            mean: f64::NAN,
            variance: f64::NAN,
            std_dev: f64::NAN,
            skewness: f64::NAN,
            kurtosis: f64::NAN,
        }
    }
}
