//! Randomized trial harness for comparing pathfinding strategies.
//!
//! A batch of trials draws seeded random start/target pairs on a shared
//! [`Map`](pathprof_core::Map), times one search per trial, and aggregates
//! path length, nodes expanded and duration into mean/stdev figures. The
//! batch runs off the control thread ([`spawn_trials`]) with per-trial
//! progress events and a cooperative [`CancelToken`]; the outcome renders
//! into a plain-text [`Report`].

mod config;
mod report;
mod result;
mod runner;
mod sampler;
mod stats;

pub use config::{ConfigError, TrialConfig};
pub use report::{Report, ReportError};
pub use result::{TrialResult, TrialResultCollection};
pub use runner::{
    CancelToken, HarnessError, MAX_FAILED_DRAWS, TrialEvent, TrialHandle, TrialProgress,
    run_trials, spawn_trials,
};
pub use sampler::{MAX_SAMPLE_RETRIES, PairSampler, SampleError};
pub use stats::{StatsError, mean, std_dev};
