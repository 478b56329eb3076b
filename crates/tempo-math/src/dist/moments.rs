//! Closed-form theoretical moments per family.
//!
//! Kurtosis is excess throughout (normal = 0). The Cauchy has no defined
//! moments and reports NaN for all of them; callers check
//! [`TheoreticalMoments::is_defined`] before comparing against sample
//! moments.

use statrs::function::gamma::ln_gamma;

use super::{Params, TheoreticalMoments};

/// Theoretical moments of a parameterized family.
pub fn theoretical_moments(params: &Params) -> TheoreticalMoments {
    match *params {
        Params::Exponential { loc, scale } => from_parts(loc + scale, scale * scale, 2.0, 6.0),
        Params::Gamma { shape, scale } => from_parts(
            shape * scale,
            shape * scale * scale,
            2.0 / shape.sqrt(),
            6.0 / shape,
        ),
        Params::LogNormal { mu, sigma } => {
            let s2 = sigma * sigma;
            let ew = s2.exp();
            let mean = (mu + s2 / 2.0).exp();
            let variance = (ew - 1.0) * (2.0 * mu + s2).exp();
            let skewness = (ew + 2.0) * (ew - 1.0).sqrt();
            let kurtosis = (4.0 * s2).exp() + 2.0 * (3.0 * s2).exp() + 3.0 * (2.0 * s2).exp() - 6.0;
            from_parts(mean, variance, skewness, kurtosis)
        }
        Params::Weibull { shape, scale } => weibull_moments(shape, scale),
        Params::Normal { mean, std_dev } => from_parts(mean, std_dev * std_dev, 0.0, 0.0),
        Params::Cauchy { .. } => TheoreticalMoments::undefined(),
        Params::ChiSquared { df, scale } => from_parts(
            df * scale,
            2.0 * df * scale * scale,
            (8.0 / df).sqrt(),
            12.0 / df,
        ),
        Params::Rayleigh { scale } => {
            use std::f64::consts::PI;
            let mean = scale * (PI / 2.0).sqrt();
            let variance = (2.0 - PI / 2.0) * scale * scale;
            let skewness = 2.0 * PI.sqrt() * (PI - 3.0) / (4.0 - PI).powf(1.5);
            let kurtosis = -(6.0 * PI * PI - 24.0 * PI + 16.0) / ((4.0 - PI) * (4.0 - PI));
            from_parts(mean, variance, skewness, kurtosis)
        }
        Params::Uniform { min, max } => {
            let span = max - min;
            from_parts((min + max) / 2.0, span * span / 12.0, 0.0, -6.0 / 5.0)
        }
        Params::PowerLaw {
            exponent: a,
            loc,
            scale,
        } => {
            // A standard power-law on [0, 1] is Beta(a, 1); shift and
            // scale only affect mean and variance.
            let mean = loc + scale * a / (a + 1.0);
            let variance = scale * scale * a / ((a + 2.0) * (a + 1.0) * (a + 1.0));
            let skewness = 2.0 * (1.0 - a) * (a + 2.0).sqrt() / ((a + 3.0) * a.sqrt());
            let kurtosis = 6.0 * ((a - 1.0) * (a - 1.0) * (a + 2.0) - a * (a + 3.0))
                / (a * (a + 3.0) * (a + 4.0));
            from_parts(mean, variance, skewness, kurtosis)
        }
    }
}

fn from_parts(mean: f64, variance: f64, skewness: f64, kurtosis: f64) -> TheoreticalMoments {
    TheoreticalMoments {
        mean,
        variance,
        std_dev: variance.sqrt(),
        skewness,
        kurtosis,
    }
}

fn weibull_moments(shape: f64, scale: f64) -> TheoreticalMoments {
    // Raw moments m_i = scale^i * Gamma(1 + i/shape), combined into
    // central moments.
    let g = |i: f64| ln_gamma(1.0 + i / shape).exp();
    let m1 = scale * g(1.0);
    let m2 = scale * scale * g(2.0);
    let m3 = scale.powi(3) * g(3.0);
    let m4 = scale.powi(4) * g(4.0);

    let variance = m2 - m1 * m1;
    let central3 = m3 - 3.0 * m1 * m2 + 2.0 * m1.powi(3);
    let central4 = m4 - 4.0 * m1 * m3 + 6.0 * m1 * m1 * m2 - 3.0 * m1.powi(4);

    from_parts(
        m1,
        variance,
        central3 / variance.powf(1.5),
        central4 / (variance * variance) - 3.0,
    )
}
