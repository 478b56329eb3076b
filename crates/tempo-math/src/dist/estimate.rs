//! Maximum-likelihood parameter estimators.
//!
//! Closed forms where they exist; the gamma and Weibull shape parameters
//! are found by bisection on their monotone likelihood equations, which
//! converges unconditionally inside a bracket and keeps the whole fit
//! deterministic. A solver that cannot bracket or exhausts its iteration
//! budget reports `FitError::NonConvergence` for that family only.

use statrs::function::gamma::digamma;

use super::{Family, FitError, Params};
use crate::descriptive::percentile;

const BISECT_MAX_ITERS: usize = 200;
const BISECT_TOL: f64 = 1e-12;

/// Exponential with location: `loc = min`, `scale = mean - min`.
pub fn fit_exponential(sample: &[f64]) -> Result<Params, FitError> {
    let min = sample_min(sample);
    let scale = mean(sample) - min;
    if !(scale > 0.0) {
        return Err(FitError::Degenerate {
            family: Family::Exponential,
            reason: "sample mean equals sample minimum".into(),
        });
    }
    Ok(Params::Exponential { loc: min, scale })
}

/// Gamma via the log-moment equation `ln(k) - psi(k) = ln(mean) - mean(ln x)`.
pub fn fit_gamma(sample: &[f64]) -> Result<Params, FitError> {
    require_positive(sample, Family::Gamma)?;

    let m = mean(sample);
    let mean_ln = mean_of(sample, f64::ln);
    let s = m.ln() - mean_ln;
    if !s.is_finite() || !(s > 0.0) {
        return Err(FitError::Degenerate {
            family: Family::Gamma,
            reason: "zero spread in log-space".into(),
        });
    }

    // ln(k) - psi(k) is strictly decreasing from +inf to 0, so the root
    // is unique; the upper bracket only needs 1/(2k) < s.
    let f = |k: f64| k.ln() - digamma(k) - s;
    let hi = (1.0 / s).max(1e6);
    let shape = bisect(1e-9, hi, f).ok_or(FitError::NonConvergence {
        family: Family::Gamma,
        iterations: BISECT_MAX_ITERS,
    })?;

    Ok(Params::Gamma {
        shape,
        scale: m / shape,
    })
}

/// Lognormal: mean and deviation of the log sample (MLE, n denominator).
pub fn fit_lognormal(sample: &[f64]) -> Result<Params, FitError> {
    require_positive(sample, Family::LogNormal)?;

    let mu = mean_of(sample, f64::ln);
    let var = mean_of(sample, |x| {
        let d = x.ln() - mu;
        d * d
    });
    let sigma = var.sqrt();
    if !(sigma > 0.0) {
        return Err(FitError::Degenerate {
            family: Family::LogNormal,
            reason: "zero variance in log-space".into(),
        });
    }
    Ok(Params::LogNormal { mu, sigma })
}

/// Weibull via the profile-likelihood shape equation.
pub fn fit_weibull(sample: &[f64]) -> Result<Params, FitError> {
    require_positive(sample, Family::Weibull)?;

    let n = sample.len() as f64;
    let max = sample.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mean_ln = mean_of(sample, f64::ln);
    if sample.iter().all(|x| *x == max) {
        return Err(FitError::Degenerate {
            family: Family::Weibull,
            reason: "constant sample".into(),
        });
    }

    // Work with y = x / max so y^k never overflows.
    let g = |k: f64| {
        let mut num = 0.0;
        let mut den = 0.0;
        for x in sample {
            let w = (x / max).powf(k);
            num += w * x.ln();
            den += w;
        }
        num / den - 1.0 / k - mean_ln
    };

    // g is increasing: -inf at k -> 0, ln(max) - mean(ln x) >= 0 at k -> inf.
    let mut hi = 1.0;
    let mut iters = 0;
    while g(hi) <= 0.0 {
        hi *= 2.0;
        iters += 1;
        if iters > 60 {
            return Err(FitError::NonConvergence {
                family: Family::Weibull,
                iterations: iters,
            });
        }
    }
    let shape = bisect(1e-3, hi, g).ok_or(FitError::NonConvergence {
        family: Family::Weibull,
        iterations: BISECT_MAX_ITERS,
    })?;

    // scale = (sum(x^k) / n)^(1/k), computed in log-space.
    let sum_w: f64 = sample.iter().map(|x| (x / max).powf(shape)).sum();
    let ln_scale = max.ln() + (sum_w.ln() - n.ln()) / shape;
    Ok(Params::Weibull {
        shape,
        scale: ln_scale.exp(),
    })
}

/// Normal MLE: sample mean and n-denominator deviation.
pub fn fit_normal(sample: &[f64]) -> Result<Params, FitError> {
    let m = mean(sample);
    let var = mean_of(sample, |x| {
        let d = x - m;
        d * d
    });
    let std_dev = var.sqrt();
    if !(std_dev > 0.0) {
        return Err(FitError::Degenerate {
            family: Family::Normal,
            reason: "zero variance".into(),
        });
    }
    Ok(Params::Normal { mean: m, std_dev })
}

/// Cauchy via the robust quantile estimator: median and half-IQR.
///
/// The Cauchy likelihood has no closed-form maximum; the quantile
/// estimator is the standard deterministic stand-in.
pub fn fit_cauchy(sample: &[f64]) -> Result<Params, FitError> {
    let sorted = sorted_copy(sample);
    let loc = percentile(&sorted, 0.5);
    let scale = (percentile(&sorted, 0.75) - percentile(&sorted, 0.25)) / 2.0;
    if !(scale > 0.0) {
        return Err(FitError::Degenerate {
            family: Family::Cauchy,
            reason: "zero interquartile range".into(),
        });
    }
    Ok(Params::Cauchy { loc, scale })
}

/// Chi-squared with scale, via the gamma MLE.
///
/// A scaled chi-squared with `df = k` is `Gamma(k/2, scale = 2*theta)`,
/// so the gamma fit transforms exactly.
pub fn fit_chi_squared(sample: &[f64]) -> Result<Params, FitError> {
    let gamma = fit_gamma(sample).map_err(|e| retag(e, Family::ChiSquared))?;
    match gamma {
        Params::Gamma { shape, scale } => Ok(Params::ChiSquared {
            df: 2.0 * shape,
            scale: scale / 2.0,
        }),
        _ => unreachable!("fit_gamma returns gamma parameters"),
    }
}

/// Rayleigh MLE: `scale^2 = sum(x^2) / (2n)`.
pub fn fit_rayleigh(sample: &[f64]) -> Result<Params, FitError> {
    if sample.iter().any(|x| *x < 0.0) {
        return Err(FitError::Unsupported {
            family: Family::Rayleigh,
            reason: "negative observations".into(),
        });
    }
    let scale = (mean_of(sample, |x| x * x) / 2.0).sqrt();
    if !(scale > 0.0) {
        return Err(FitError::Degenerate {
            family: Family::Rayleigh,
            reason: "all observations are zero".into(),
        });
    }
    Ok(Params::Rayleigh { scale })
}

/// Uniform MLE: the sample extremes.
pub fn fit_uniform(sample: &[f64]) -> Result<Params, FitError> {
    let min = sample_min(sample);
    let max = sample.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !(max > min) {
        return Err(FitError::Degenerate {
            family: Family::Uniform,
            reason: "zero-width range".into(),
        });
    }
    Ok(Params::Uniform { min, max })
}

/// Power-law on `[loc, loc + scale]` with `loc = min`, `scale = max - min`.
///
/// The exponent MLE is `-m / sum(ln z)` over the interior points z in
/// (0, 1]; observations exactly at the minimum sit on the support
/// boundary and carry no likelihood information about the exponent.
pub fn fit_power_law(sample: &[f64]) -> Result<Params, FitError> {
    let min = sample_min(sample);
    let max = sample.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    if !(span > 0.0) {
        return Err(FitError::Degenerate {
            family: Family::PowerLaw,
            reason: "zero-width range".into(),
        });
    }

    let mut sum_ln = 0.0;
    let mut m = 0usize;
    for x in sample {
        let z = (x - min) / span;
        if z > 0.0 {
            sum_ln += z.ln();
            m += 1;
        }
    }
    if m == 0 || !(sum_ln < 0.0) {
        return Err(FitError::Degenerate {
            family: Family::PowerLaw,
            reason: "no interior observations".into(),
        });
    }

    Ok(Params::PowerLaw {
        exponent: -(m as f64) / sum_ln,
        loc: min,
        scale: span,
    })
}

fn mean(sample: &[f64]) -> f64 {
    sample.iter().sum::<f64>() / sample.len() as f64
}

fn mean_of(sample: &[f64], f: impl Fn(f64) -> f64) -> f64 {
    sample.iter().map(|x| f(*x)).sum::<f64>() / sample.len() as f64
}

fn sample_min(sample: &[f64]) -> f64 {
    sample.iter().cloned().fold(f64::INFINITY, f64::min)
}

fn sorted_copy(sample: &[f64]) -> Vec<f64> {
    let mut v = sample.to_vec();
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    v
}

fn require_positive(sample: &[f64], family: Family) -> Result<(), FitError> {
    if sample.iter().any(|x| !(*x > 0.0)) {
        return Err(FitError::Unsupported {
            family,
            reason: "requires strictly positive observations".into(),
        });
    }
    Ok(())
}

fn retag(e: FitError, family: Family) -> FitError {
    match e {
        FitError::Unsupported { reason, .. } => FitError::Unsupported { family, reason },
        FitError::Degenerate { reason, .. } => FitError::Degenerate { family, reason },
        FitError::NonConvergence { iterations, .. } => FitError::NonConvergence {
            family,
            iterations,
        },
    }
}

/// Bisection root-finder for a monotone function straddling zero on
/// `[lo, hi]`. Returns None if the bracket does not straddle.
fn bisect(mut lo: f64, mut hi: f64, f: impl Fn(f64) -> f64) -> Option<f64> {
    let flo = f(lo);
    let fhi = f(hi);
    if !flo.is_finite() || !fhi.is_finite() || flo.signum() == fhi.signum() {
        return None;
    }
    let rising = flo < 0.0;
    for _ in 0..BISECT_MAX_ITERS {
        let mid = 0.5 * (lo + hi);
        let fm = f(mid);
        if !fm.is_finite() {
            return None;
        }
        if (hi - lo) <= BISECT_TOL * mid.abs().max(1.0) {
            return Some(mid);
        }
        if (fm < 0.0) == rising {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Some(0.5 * (lo + hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    /// Quantile-grid sample of a distribution given its inverse CDF.
    /// Deterministic and moment-faithful without needing an RNG.
    fn quantile_grid(n: usize, inv_cdf: impl Fn(f64) -> f64) -> Vec<f64> {
        (0..n)
            .map(|i| inv_cdf((i as f64 + 0.5) / n as f64))
            .collect()
    }

    #[test]
    fn exponential_fit_is_min_and_mean_gap() {
        let p = fit_exponential(&[1.0, 2.0, 4.0]).unwrap();
        match p {
            Params::Exponential { loc, scale } => {
                assert_eq!(loc, 1.0);
                assert!(approx_eq(scale, 7.0 / 3.0 - 1.0, 1e-12));
            }
            _ => panic!("wrong family"),
        }
    }

    #[test]
    fn exponential_fit_rejects_constant_sample() {
        let err = fit_exponential(&[2.0, 2.0, 2.0]).unwrap_err();
        assert!(matches!(err, FitError::Degenerate { .. }));
    }

    #[test]
    fn gamma_fit_recovers_unit_shape_on_exponential_data() {
        let sample = quantile_grid(500, |u| -2.0 * (1.0 - u).ln());
        match fit_gamma(&sample).unwrap() {
            Params::Gamma { shape, scale } => {
                assert!(shape > 0.8 && shape < 1.2, "shape = {shape}");
                // shape * scale = sample mean by construction of the MLE.
                let m = sample.iter().sum::<f64>() / sample.len() as f64;
                assert!(approx_eq(shape * scale, m, 1e-9));
            }
            _ => panic!("wrong family"),
        }
    }

    #[test]
    fn gamma_fit_requires_positive_data() {
        let err = fit_gamma(&[0.0, 1.0, 2.0]).unwrap_err();
        assert!(matches!(err, FitError::Unsupported { .. }));
    }

    #[test]
    fn weibull_fit_recovers_shape_from_quantile_grid() {
        // Weibull(shape 1.5, scale 10): inverse CDF = scale * (-ln(1-u))^(1/shape).
        let sample = quantile_grid(800, |u| 10.0 * (-(1.0 - u).ln()).powf(1.0 / 1.5));
        match fit_weibull(&sample).unwrap() {
            Params::Weibull { shape, scale } => {
                assert!(approx_eq(shape, 1.5, 0.1), "shape = {shape}");
                assert!(approx_eq(scale, 10.0, 0.5), "scale = {scale}");
            }
            _ => panic!("wrong family"),
        }
    }

    #[test]
    fn lognormal_fit_matches_log_moments() {
        let sample = [1.0f64, std::f64::consts::E, std::f64::consts::E.powi(2)];
        match fit_lognormal(&sample).unwrap() {
            Params::LogNormal { mu, sigma } => {
                assert!(approx_eq(mu, 1.0, 1e-12));
                assert!(approx_eq(sigma, (2.0f64 / 3.0).sqrt(), 1e-12));
            }
            _ => panic!("wrong family"),
        }
    }

    #[test]
    fn normal_fit_uses_mle_denominator() {
        match fit_normal(&[1.0, 3.0]).unwrap() {
            Params::Normal { mean, std_dev } => {
                assert_eq!(mean, 2.0);
                assert!(approx_eq(std_dev, 1.0, 1e-12));
            }
            _ => panic!("wrong family"),
        }
    }

    #[test]
    fn cauchy_fit_uses_median_and_half_iqr() {
        let sample = [0.0, 5.0, 7.0];
        match fit_cauchy(&sample).unwrap() {
            Params::Cauchy { loc, scale } => {
                assert_eq!(loc, 5.0);
                assert!(approx_eq(scale, (6.0 - 2.5) / 2.0, 1e-12));
            }
            _ => panic!("wrong family"),
        }
    }

    #[test]
    fn chi_squared_fit_transforms_the_gamma_fit() {
        let sample = quantile_grid(400, |u| -3.0 * (1.0 - u).ln());
        let gamma = fit_gamma(&sample).unwrap();
        let chi2 = fit_chi_squared(&sample).unwrap();
        match (gamma, chi2) {
            (
                Params::Gamma { shape, scale },
                Params::ChiSquared { df, scale: theta },
            ) => {
                assert!(approx_eq(df, 2.0 * shape, 1e-9));
                assert!(approx_eq(theta, scale / 2.0, 1e-9));
            }
            _ => panic!("wrong families"),
        }
    }

    #[test]
    fn rayleigh_fit_matches_closed_form() {
        let sample = [1.0, 2.0, 3.0];
        match fit_rayleigh(&sample).unwrap() {
            Params::Rayleigh { scale } => {
                let expected = ((1.0 + 4.0 + 9.0) / 3.0 / 2.0f64).sqrt();
                assert!(approx_eq(scale, expected, 1e-12));
            }
            _ => panic!("wrong family"),
        }
    }

    #[test]
    fn uniform_fit_takes_extremes() {
        match fit_uniform(&[3.0, 1.0, 2.0]).unwrap() {
            Params::Uniform { min, max } => {
                assert_eq!(min, 1.0);
                assert_eq!(max, 3.0);
            }
            _ => panic!("wrong family"),
        }
    }

    #[test]
    fn power_law_fit_recovers_exponent() {
        // z = u^(1/2) samples a power-law with exponent 2 on [0, 1].
        let sample = quantile_grid(1000, |u| u.sqrt());
        match fit_power_law(&sample).unwrap() {
            Params::PowerLaw { exponent, .. } => {
                assert!(exponent > 1.8 && exponent < 2.2, "exponent = {exponent}");
            }
            _ => panic!("wrong family"),
        }
    }

    #[test]
    fn zero_gaps_disable_positive_support_families_only() {
        // Duplicate timestamps produce zero gaps; gamma refuses, the
        // exponential shifts its location and proceeds.
        let sample = [0.0, 2.0, 5.0, 1.0];
        assert!(matches!(
            fit_gamma(&sample),
            Err(FitError::Unsupported { .. })
        ));
        assert!(fit_exponential(&sample).is_ok());
        assert!(fit_normal(&sample).is_ok());
    }

    #[test]
    fn bisect_finds_monotone_roots_in_both_directions() {
        let root = bisect(0.0, 10.0, |x| x - 3.0).unwrap();
        assert!(approx_eq(root, 3.0, 1e-9));
        let root = bisect(0.0, 10.0, |x| 3.0 - x).unwrap();
        assert!(approx_eq(root, 3.0, 1e-9));
        assert!(bisect(4.0, 10.0, |x| x - 3.0).is_none());
    }
}
