//! Trial run configuration.

use pathprof_search::Algorithm;

/// Rejected configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("number of trials cannot be 0")]
    ZeroTrials,
    #[error("target separation distance cannot be 0")]
    ZeroDistance,
    #[error("output identifier cannot be empty")]
    EmptyOutput,
}

/// What to run: which strategy, how far apart the endpoints should be
/// drawn, how many trials, and the identifier the report is filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialConfig {
    pub algorithm: Algorithm,
    /// Chebyshev distance between each trial's start and target.
    pub path_distance: i32,
    pub trials: u32,
    pub output: String,
}

impl TrialConfig {
    pub fn new(
        algorithm: Algorithm,
        path_distance: i32,
        trials: u32,
        output: impl Into<String>,
    ) -> Self {
        Self {
            algorithm,
            path_distance,
            trials,
            output: output.into(),
        }
    }

    /// Check every field before a run starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::ZeroTrials);
        }
        if self.path_distance <= 0 {
            return Err(ConfigError::ZeroDistance);
        }
        if self.output.trim().is_empty() {
            return Err(ConfigError::EmptyOutput);
        }
        Ok(())
    }
}
