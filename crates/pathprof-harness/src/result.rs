//! Trial outcomes and their aggregates.

use std::time::Duration;

use crate::stats::{self, StatsError};

/// The outcome of one trial: immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialResult {
    pub duration: Duration,
    pub path_len: usize,
    pub nodes_expanded: usize,
    /// The draw found no path (unreachable target or exhausted pursuit).
    /// Failed results are resampled by the harness, never recorded.
    pub failed: bool,
}

impl TrialResult {
    /// A successful trial.
    pub fn new(duration: Duration, path_len: usize, nodes_expanded: usize) -> Self {
        Self {
            duration,
            path_len,
            nodes_expanded,
            failed: false,
        }
    }

    /// A failed draw: the search ran but produced no path.
    pub fn failed_draw(duration: Duration) -> Self {
        Self {
            duration,
            path_len: 0,
            nodes_expanded: 0,
            failed: true,
        }
    }
}

/// Ordered collection of recorded trials plus the batch's cancelled flag.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialResultCollection {
    results: Vec<TrialResult>,
    cancelled: bool,
}

impl TrialResultCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a trial. Failed draws are the caller's responsibility to
    /// filter; recording one would corrupt the aggregates.
    pub fn push(&mut self, result: TrialResult) {
        debug_assert!(!result.failed, "failed draws must be resampled, not recorded");
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn results(&self) -> &[TrialResult] {
        &self.results
    }

    /// Mark the batch as cancelled; already-recorded trials are kept.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn mean_path_len(&self) -> Result<f64, StatsError> {
        stats::mean(&self.path_lens())
    }

    pub fn std_dev_path_len(&self) -> Result<f64, StatsError> {
        stats::std_dev(&self.path_lens())
    }

    pub fn mean_nodes_expanded(&self) -> Result<f64, StatsError> {
        stats::mean(&self.nodes_expanded())
    }

    pub fn std_dev_nodes_expanded(&self) -> Result<f64, StatsError> {
        stats::std_dev(&self.nodes_expanded())
    }

    pub fn mean_duration_ms(&self) -> Result<f64, StatsError> {
        stats::mean(&self.durations_ms())
    }

    pub fn std_dev_duration_ms(&self) -> Result<f64, StatsError> {
        stats::std_dev(&self.durations_ms())
    }

    fn path_lens(&self) -> Vec<f64> {
        self.results.iter().map(|r| r.path_len as f64).collect()
    }

    fn nodes_expanded(&self) -> Vec<f64> {
        self.results.iter().map(|r| r.nodes_expanded as f64).collect()
    }

    fn durations_ms(&self) -> Vec<f64> {
        self.results
            .iter()
            .map(|r| r.duration.as_secs_f64() * 1_000.0)
            .collect()
    }
}
