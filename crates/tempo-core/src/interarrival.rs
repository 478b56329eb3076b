//! Interarrival gap calculation.
//!
//! Converts an event timestamp sequence into consecutive gaps in seconds.
//! Input is normalized by sorting before differencing, so every gap is
//! non-negative by construction; duplicate timestamps yield zero gaps,
//! which is data, not an error.

use chrono::{DateTime, Utc};
use tempo_common::{Error, Result};
use tracing::warn;

/// Gaps in seconds between consecutive events, after sorting.
///
/// Requires at least 2 timestamps; the first event has no predecessor and
/// contributes no gap, so the output length is `n - 1`. Unsorted input is
/// normalized (with a warning) rather than rejected.
pub fn interarrival_seconds(timestamps: &[DateTime<Utc>]) -> Result<Vec<f64>> {
    require_enough(timestamps)?;

    let mut sorted = timestamps.to_vec();
    if !is_sorted(&sorted) {
        warn!(
            count = sorted.len(),
            "timestamps arrived out of order; sorting before differencing"
        );
        sorted.sort();
    }
    Ok(diff_seconds(&sorted))
}

/// Like [`interarrival_seconds`], but fails with `Error::Ordering` on
/// unsorted input instead of normalizing.
///
/// For callers that treat out-of-order storage as upstream corruption.
pub fn interarrival_seconds_strict(timestamps: &[DateTime<Utc>]) -> Result<Vec<f64>> {
    require_enough(timestamps)?;

    if !is_sorted(timestamps) {
        return Err(Error::Ordering {
            reason: "stored timestamps are not in ascending order".into(),
        });
    }
    Ok(diff_seconds(timestamps))
}

fn require_enough(timestamps: &[DateTime<Utc>]) -> Result<()> {
    match timestamps.len() {
        0 => Err(Error::EmptySample {
            stage: "interarrival",
        }),
        1 => Err(Error::InsufficientData {
            got: 1,
            required: 2,
        }),
        _ => Ok(()),
    }
}

fn is_sorted(timestamps: &[DateTime<Utc>]) -> bool {
    timestamps.windows(2).all(|w| w[0] <= w[1])
}

fn diff_seconds(sorted: &[DateTime<Utc>]) -> Vec<f64> {
    sorted
        .windows(2)
        .map(|w| {
            let delta = w[1] - w[0];
            delta
                .num_microseconds()
                .map(|us| us as f64 / 1e6)
                .unwrap_or_else(|| delta.num_seconds() as f64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_seconds(secs: &[i64]) -> Vec<DateTime<Utc>> {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        secs.iter()
            .map(|s| t0 + chrono::Duration::seconds(*s))
            .collect()
    }

    #[test]
    fn reference_scenario() {
        // Timestamps [0, 5, 5, 12] -> gaps [5, 0, 7].
        let gaps = interarrival_seconds(&at_seconds(&[0, 5, 5, 12])).unwrap();
        assert_eq!(gaps, vec![5.0, 0.0, 7.0]);
    }

    #[test]
    fn zero_events_is_empty_sample() {
        let err = interarrival_seconds(&[]).unwrap_err();
        assert!(matches!(err, Error::EmptySample { .. }));
    }

    #[test]
    fn one_event_is_insufficient() {
        let err = interarrival_seconds(&at_seconds(&[3])).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientData {
                got: 1,
                required: 2
            }
        ));
    }

    #[test]
    fn unsorted_input_is_normalized() {
        let gaps = interarrival_seconds(&at_seconds(&[12, 0, 5])).unwrap();
        assert_eq!(gaps, vec![5.0, 7.0]);
    }

    #[test]
    fn strict_mode_rejects_unsorted_input() {
        let err = interarrival_seconds_strict(&at_seconds(&[12, 0, 5])).unwrap_err();
        assert!(matches!(err, Error::Ordering { .. }));

        let gaps = interarrival_seconds_strict(&at_seconds(&[0, 5, 12])).unwrap();
        assert_eq!(gaps, vec![5.0, 7.0]);
    }

    #[test]
    fn sub_second_resolution_is_kept() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let ts = vec![t0, t0 + chrono::Duration::milliseconds(1500)];
        let gaps = interarrival_seconds(&ts).unwrap();
        assert!((gaps[0] - 1.5).abs() < 1e-9);
    }
}
