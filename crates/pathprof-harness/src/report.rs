//! Plain-text trial reports.

use std::fmt;
use std::fs;
use std::path::Path;

use pathprof_core::Map;

use crate::config::TrialConfig;
use crate::result::TrialResultCollection;
use crate::stats::StatsError;

/// Report construction or output failure.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error("failed to write report to {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A rendered run report: configuration plus aggregate results.
///
/// Aggregates are computed up front so an empty batch is rejected when the
/// report is built, not halfway through writing it.
pub struct Report<'a> {
    config: &'a TrialConfig,
    map_name: String,
    obstacles: usize,
    recorded: usize,
    cancelled: bool,
    mean_len: f64,
    stdev_len: f64,
    mean_expanded: f64,
    stdev_expanded: f64,
    mean_ms: f64,
    stdev_ms: f64,
}

impl<'a> Report<'a> {
    pub fn new(
        config: &'a TrialConfig,
        map: &Map,
        results: &TrialResultCollection,
    ) -> Result<Self, StatsError> {
        Ok(Self {
            config,
            map_name: map.name().to_string(),
            obstacles: map.obstacle_count(),
            recorded: results.len(),
            cancelled: results.cancelled(),
            mean_len: results.mean_path_len()?,
            stdev_len: results.std_dev_path_len()?,
            mean_expanded: results.mean_nodes_expanded()?,
            stdev_expanded: results.std_dev_nodes_expanded()?,
            mean_ms: results.mean_duration_ms()?,
            stdev_ms: results.std_dev_duration_ms()?,
        })
    }

    /// Write the report as `<output>.txt` inside `dir`.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<(), ReportError> {
        let path = dir.as_ref().join(format!("{}.txt", self.config.output));
        fs::write(&path, self.to_string()).map_err(|source| ReportError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----- Configuration -----")?;
        writeln!(f, "Algorithm: {}", self.config.algorithm)?;
        writeln!(f, "Map: {}", self.map_name)?;
        writeln!(f, "Number of obstacles on map: {}", self.obstacles)?;
        writeln!(f, "Target separation distance: {}", self.config.path_distance)?;
        writeln!(f, "Number of trials: {}", self.config.trials)?;
        writeln!(f)?;
        writeln!(f, "----- Results -----")?;
        if self.cancelled {
            writeln!(
                f,
                "Trials recorded: {} of {} (cancelled)",
                self.recorded, self.config.trials
            )?;
        } else {
            writeln!(f, "Trials recorded: {}", self.recorded)?;
        }
        writeln!(
            f,
            "Average path length:    {:.2} (stdev {:.2})",
            self.mean_len, self.stdev_len
        )?;
        writeln!(
            f,
            "Average nodes expanded: {:.2} (stdev {:.2})",
            self.mean_expanded, self.stdev_expanded
        )?;
        writeln!(
            f,
            "Average duration:       {:.3} ms (stdev {:.3})",
            self.mean_ms, self.stdev_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::TrialResult;
    use pathprof_search::Algorithm;
    use std::time::Duration;

    fn sample_inputs() -> (TrialConfig, Map, TrialResultCollection) {
        let config = TrialConfig::new(Algorithm::AStar, 6, 2, "astar-6");
        let map = Map::parse("tiny", "..#\n...\n#..").unwrap();
        let mut results = TrialResultCollection::new();
        results.push(TrialResult::new(Duration::from_millis(2), 10, 30));
        results.push(TrialResult::new(Duration::from_millis(4), 12, 50));
        (config, map, results)
    }

    #[test]
    fn report_carries_config_and_aggregates() {
        let (config, map, results) = sample_inputs();
        let text = Report::new(&config, &map, &results).unwrap().to_string();
        assert!(text.contains("Algorithm: A Star"));
        assert!(text.contains("Map: tiny"));
        assert!(text.contains("Number of obstacles on map: 2"));
        assert!(text.contains("Target separation distance: 6"));
        assert!(text.contains("Trials recorded: 2"));
        assert!(text.contains("Average path length:    11.00 (stdev 1.00)"));
        assert!(text.contains("Average nodes expanded: 40.00 (stdev 10.00)"));
        assert!(text.contains("Average duration:       3.000 ms"));
    }

    #[test]
    fn cancelled_batch_is_labelled() {
        let (config, map, mut results) = sample_inputs();
        results.cancel();
        let text = Report::new(&config, &map, &results).unwrap().to_string();
        assert!(text.contains("Trials recorded: 2 of 2 (cancelled)"));
    }

    #[test]
    fn empty_batch_is_rejected() {
        let (config, map, _) = sample_inputs();
        let empty = TrialResultCollection::new();
        assert!(Report::new(&config, &map, &empty).is_err());
    }

    #[test]
    fn report_is_written_under_the_output_identifier() {
        let (config, map, results) = sample_inputs();
        let report = Report::new(&config, &map, &results).unwrap();
        let dir = tempfile::tempdir().unwrap();
        report.write_to_dir(dir.path()).unwrap();
        let written = std::fs::read_to_string(dir.path().join("astar-6.txt")).unwrap();
        assert_eq!(written, report.to_string());
    }
}
