//! Event Tempo core - interarrival analysis and distribution fitting.
//!
//! The pipeline is a linear, stateless batch transformation:
//!
//! ```text
//! event store -> interarrival gaps -> { descriptive stats,
//!                                       fitter -> theoretical moments }
//! ```
//!
//! Each stage consumes an immutable input and produces a new immutable
//! output, so re-running over the same snapshot yields bit-identical
//! results.

pub mod fit;
pub mod interarrival;
pub mod output;
pub mod pipeline;
pub mod report;

pub use fit::{fit_families, CandidateFit, FitFailure, FitReport};
pub use interarrival::{interarrival_seconds, interarrival_seconds_strict};
pub use pipeline::run_analysis;
pub use report::AnalysisReport;
