//! Property-based tests for the numeric core.
//!
//! Uses proptest to verify statistical invariants hold across many random
//! samples, not just the hand-picked fixtures in the unit tests.

use proptest::prelude::*;
use tempo_math::{
    freedman_diaconis_bins, percentile, summarize, Family, Histogram, Params,
};

fn sample_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.001f64..10_000.0, 2..200)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Percentiles stay inside the sample range and are monotone in q.
    #[test]
    fn percentile_is_bounded_and_monotone(mut sample in sample_strategy()) {
        sample.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let p25 = percentile(&sample, 0.25);
        let p50 = percentile(&sample, 0.5);
        let p75 = percentile(&sample, 0.75);
        prop_assert!(sample[0] <= p25 && p75 <= sample[sample.len() - 1]);
        prop_assert!(p25 <= p50 && p50 <= p75);
    }

    /// The summary is deterministic and internally consistent.
    #[test]
    fn summary_is_consistent(sample in sample_strategy()) {
        let a = summarize(&sample).unwrap();
        let b = summarize(&sample).unwrap();
        prop_assert_eq!(a.clone(), b);

        prop_assert!(a.min <= a.median && a.median <= a.max);
        prop_assert!(a.min <= a.mean && a.mean <= a.max);
        prop_assert!(a.q25 <= a.q75);
        prop_assert!(a.std_dev >= 0.0);
    }

    /// Freedman-Diaconis never returns fewer than the configured floor.
    #[test]
    fn fd_bins_respect_floor(sample in sample_strategy(), min_bins in 1usize..50) {
        let bins = freedman_diaconis_bins(&sample, min_bins).unwrap();
        prop_assert!(bins >= min_bins);
    }

    /// Density histograms always integrate to one.
    #[test]
    fn histogram_normalizes(sample in sample_strategy(), bins in 1usize..64) {
        // Skip degenerate constant samples; those cannot be binned.
        prop_assume!(sample.iter().any(|x| *x != sample[0]));
        let hist = Histogram::from_sample(&sample, bins).unwrap();
        let total: f64 = hist.densities.iter().map(|d| d * hist.width).sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
    }

    /// The exponential fit preserves the sample mean exactly:
    /// theoretical mean = loc + scale = sample mean.
    #[test]
    fn exponential_fit_preserves_mean(sample in sample_strategy()) {
        prop_assume!(sample.iter().any(|x| *x != sample[0]));
        let params = Family::Exponential.fit(&sample).unwrap();
        let mean = sample.iter().sum::<f64>() / sample.len() as f64;
        let m = params.moments();
        prop_assert!((m.mean - mean).abs() <= 1e-9 * mean.abs().max(1.0));
        if let Params::Exponential { scale, .. } = params {
            prop_assert!((m.variance - scale * scale).abs() <= 1e-9 * m.variance.max(1.0));
        }
    }

    /// Every family that fits a positive sample yields a density that is
    /// non-negative on the sample range.
    #[test]
    fn fitted_densities_are_non_negative(sample in sample_strategy()) {
        prop_assume!(sample.iter().any(|x| *x != sample[0]));
        for family in Family::CATALOG {
            if let Ok(params) = family.fit(&sample) {
                for x in sample.iter().take(32) {
                    let d = params.pdf(*x);
                    prop_assert!(d >= 0.0, "pdf({x}) = {d} for {family}");
                }
            }
        }
    }
}
