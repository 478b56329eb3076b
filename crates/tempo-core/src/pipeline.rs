//! Pipeline orchestration: snapshot load through model selection.

use tempo_common::{Error, Result};
use tempo_config::{Config, MinSampleMode};
use tempo_math::{summarize, Family, SampleError};
use tempo_store::EventStore;
use tracing::{info, warn};

use crate::fit::fit_families;
use crate::interarrival::interarrival_seconds;
use crate::report::AnalysisReport;

/// Run the full analysis over the store's current snapshot.
///
/// `topic` restricts the snapshot to one topic; `None` analyzes all
/// stored events. Stateless: the same snapshot and configuration always
/// produce an identical report.
pub fn run_analysis(
    store: &dyn EventStore,
    cfg: &Config,
    topic: Option<&str>,
) -> Result<AnalysisReport> {
    let timestamps = store.list_timestamps(topic)?;
    if timestamps.is_empty() {
        return Err(Error::EmptySample { stage: "load" });
    }
    info!(events = timestamps.len(), "loaded event snapshot");

    let gaps = interarrival_seconds(&timestamps)?;

    let min = cfg.analysis.min_sample_size;
    let below_minimum = gaps.len() < min;
    if below_minimum {
        match cfg.analysis.min_sample_mode {
            MinSampleMode::Fail => {
                return Err(Error::InsufficientData {
                    got: gaps.len(),
                    required: min,
                });
            }
            MinSampleMode::Warn => {
                warn!(
                    got = gaps.len(),
                    required = min,
                    "sample below configured minimum; fit results will be unstable"
                );
            }
        }
    }

    let stats = summarize(&gaps).map_err(|e| match e {
        SampleError::Empty => Error::EmptySample { stage: "stats" },
        SampleError::Degenerate { reason } => Error::FitFailed {
            tried: 0,
            sample_size: gaps.len(),
            reason,
        },
    })?;

    let fit = fit_families(&gaps, &Family::CATALOG, cfg.analysis.min_bins)?;
    info!(
        family = %fit.selected.family,
        sse = fit.selected.sse,
        bins = fit.bins,
        excluded = fit.failures.len(),
        "selected best-fitting model"
    );

    Ok(AnalysisReport::new(below_minimum, stats, fit, gaps))
}
