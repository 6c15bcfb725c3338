//! Benchmark simulation engine
//!
//! Turns suite templates into bounded pseudo-random benchmark results,
//! derives failure insights for failed results, and folds everything
//! into a run payload ready for storage.

mod insight;
mod payload;
mod rollup;
mod simulator;

pub use insight::derive_insight;
pub use payload::{
    BenchmarkResult, BenchmarkStatus, FailureInsight, HistoryEntry, LatestFailure, LiveRun,
    LiveRunStatus, Recommendation, RunPayload, Summary,
};
pub use rollup::{aggregate, Rollup};
pub use simulator::SuiteSimulator;

/// Clamp a rate to [0, 1].
pub(crate) fn bounded(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Round to a fixed number of decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
