//! The trial batch runner.
//!
//! A batch of randomized trials runs off the control thread so callers can
//! watch progress and request cancellation. Cancellation is cooperative:
//! the token is polled between trials, never mid-search, and a cancelled
//! batch keeps every trial that already completed.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use pathprof_core::{BoundsError, Map};
use pathprof_search::create;

use crate::config::{ConfigError, TrialConfig};
use crate::result::{TrialResult, TrialResultCollection};
use crate::sampler::{PairSampler, SampleError};

/// Failed draws tolerated per recorded trial before the batch aborts.
pub const MAX_FAILED_DRAWS: u32 = 32;

/// Explicit cancellation handle, polled by the runner between trials.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Takes effect before the next trial starts.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Progress snapshot delivered once per completed trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialProgress {
    pub completed: u32,
    pub total: u32,
    /// Running mean trial duration, for remaining-time estimates.
    pub avg_duration: Duration,
}

/// Messages a spawned batch sends its consumer. Exactly one terminal
/// variant arrives after the per-trial progress stream.
#[derive(Debug, Clone)]
pub enum TrialEvent {
    Progress(TrialProgress),
    Completed(TrialResultCollection),
    Cancelled(TrialResultCollection),
}

/// A batch that could not produce its results.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sample(#[from] SampleError),
    #[error(transparent)]
    Bounds(#[from] BoundsError),
    #[error("trial {trial}: every draw failed after {attempts} resamples")]
    FailedDrawsExhausted { trial: u32, attempts: u32 },
}

/// Run a trial batch synchronously on the calling thread, invoking
/// `on_progress` after each recorded trial.
///
/// Every trial constructs a fresh search state via the algorithm factory,
/// draws a start/target pair at the configured separation, and times one
/// `build`. A draw whose search finds no path is a failed trial result: it
/// is discarded and redrawn (up to [`MAX_FAILED_DRAWS`] times) so the
/// aggregates only ever contain completed paths.
pub fn run_trials(
    map: &Map,
    config: &TrialConfig,
    seed: u64,
    cancel: &CancelToken,
    mut on_progress: impl FnMut(TrialProgress),
) -> Result<TrialResultCollection, HarnessError> {
    config.validate()?;
    let mut sampler = PairSampler::seeded(seed);
    let mut search = create(config.algorithm);
    let mut results = TrialResultCollection::new();
    let mut total_duration = Duration::ZERO;

    log::info!(
        "running {} {} trials on {:?} (separation {}, seed {seed})",
        config.trials,
        search.name(),
        map.name(),
        config.path_distance,
    );

    for trial in 1..=config.trials {
        if cancel.is_cancelled() {
            log::info!("batch cancelled after {} of {} trials", results.len(), config.trials);
            results.cancel();
            break;
        }

        let mut attempts = 0;
        let recorded = loop {
            let (start, target) = sampler.sample_pair(map, config.path_distance)?;
            let began = Instant::now();
            search.build(map, start, target)?;
            let duration = began.elapsed();

            let outcome = if search.path().is_empty() {
                TrialResult::failed_draw(duration)
            } else {
                TrialResult::new(duration, search.path().len(), search.nodes_expanded())
            };
            if outcome.failed {
                attempts += 1;
                log::debug!("trial {trial}: no path {start} -> {target}, resampling");
                if attempts >= MAX_FAILED_DRAWS {
                    return Err(HarnessError::FailedDrawsExhausted { trial, attempts });
                }
                continue;
            }
            break outcome;
        };

        total_duration += recorded.duration;
        results.push(recorded);
        on_progress(TrialProgress {
            completed: trial,
            total: config.trials,
            avg_duration: total_duration / results.len() as u32,
        });
    }

    Ok(results)
}

/// A spawned trial batch: an event stream plus the join handle for the
/// final results.
pub struct TrialHandle {
    events: Receiver<TrialEvent>,
    worker: JoinHandle<Result<TrialResultCollection, HarnessError>>,
}

impl TrialHandle {
    /// The progress/terminal event stream.
    pub fn events(&self) -> &Receiver<TrialEvent> {
        &self.events
    }

    /// Wait for the batch and return its results.
    pub fn join(self) -> Result<TrialResultCollection, HarnessError> {
        match self.worker.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

/// Spawn a trial batch on a worker thread.
///
/// Progress events arrive once per trial; a terminal
/// [`TrialEvent::Completed`] or [`TrialEvent::Cancelled`] follows unless
/// the batch failed, in which case the error is returned from
/// [`TrialHandle::join`].
pub fn spawn_trials(
    map: Arc<Map>,
    config: TrialConfig,
    seed: u64,
    cancel: CancelToken,
) -> TrialHandle {
    let (sender, events) = crossbeam_channel::unbounded();
    let worker = thread::spawn(move || {
        let outcome = run_trials(&map, &config, seed, &cancel, |progress| {
            let _ = sender.send(TrialEvent::Progress(progress));
        });
        if let Ok(results) = &outcome {
            let event = if results.cancelled() {
                TrialEvent::Cancelled(results.clone())
            } else {
                TrialEvent::Completed(results.clone())
            };
            let _ = sender.send(event);
        }
        outcome
    });
    TrialHandle { events, worker }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathprof_core::Coord;
    use pathprof_core::Tile;
    use pathprof_search::Algorithm;

    fn config(algorithm: Algorithm, trials: u32) -> TrialConfig {
        TrialConfig::new(algorithm, 4, trials, "test-run")
    }

    #[test]
    fn batch_records_every_trial() {
        let map = Map::open(12, "open12");
        let mut progress = Vec::new();
        let results = run_trials(
            &map,
            &config(Algorithm::AStar, 10),
            42,
            &CancelToken::new(),
            |p| progress.push(p),
        )
        .unwrap();
        assert_eq!(results.len(), 10);
        assert!(!results.cancelled());
        assert!(results.results().iter().all(|r| !r.failed));
        // One progress report per trial, monotonically counting up.
        assert_eq!(progress.len(), 10);
        for (i, p) in progress.iter().enumerate() {
            assert_eq!(p.completed, i as u32 + 1);
            assert_eq!(p.total, 10);
        }
    }

    #[test]
    fn same_seed_reproduces_the_batch() {
        let map = Map::open(12, "open12");
        let run = |seed| {
            run_trials(
                &map,
                &config(Algorithm::Dijkstra, 8),
                seed,
                &CancelToken::new(),
                |_| {},
            )
            .unwrap()
        };
        let a = run(7);
        let b = run(7);
        let lens = |c: &TrialResultCollection| {
            c.results()
                .iter()
                .map(|r| (r.path_len, r.nodes_expanded))
                .collect::<Vec<_>>()
        };
        assert_eq!(lens(&a), lens(&b));
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let map = Map::open(8, "t");
        let err = run_trials(
            &map,
            &TrialConfig::new(Algorithm::AStar, 4, 0, "x"),
            1,
            &CancelToken::new(),
            |_| {},
        )
        .unwrap_err();
        assert!(matches!(err, HarnessError::Config(ConfigError::ZeroTrials)));
    }

    #[test]
    fn pre_cancelled_batch_records_nothing() {
        let map = Map::open(8, "t");
        let cancel = CancelToken::new();
        cancel.cancel();
        let results = run_trials(&map, &config(Algorithm::AStar, 5), 1, &cancel, |_| {}).unwrap();
        assert!(results.cancelled());
        assert!(results.is_empty());
    }

    #[test]
    fn unreachable_draws_are_resampled_not_recorded() {
        // A pocket of open cells is sealed off in the corner: draws whose
        // target lands inside fail and must be replaced by reachable ones.
        let mut map = Map::open(12, "pocket");
        for c in [
            Coord::new(0, 2),
            Coord::new(1, 2),
            Coord::new(2, 2),
            Coord::new(2, 1),
            Coord::new(2, 0),
        ] {
            map.set_tile(c, Tile::Blocked).unwrap();
        }
        let results = run_trials(
            &map,
            &config(Algorithm::Dijkstra, 12),
            3,
            &CancelToken::new(),
            |_| {},
        )
        .unwrap();
        assert_eq!(results.len(), 12);
        assert!(results.results().iter().all(|r| !r.failed && r.path_len > 0));
    }

    #[test]
    fn hopeless_maps_abort_instead_of_spinning() {
        // Two open cells at the right separation, no route between them.
        let mut map = Map::open(7, "islands");
        for y in 0..7 {
            for x in 0..7 {
                let c = Coord::new(x, y);
                if c != Coord::new(0, 0) && c != Coord::new(6, 6) {
                    map.set_tile(c, Tile::Blocked).unwrap();
                }
            }
        }
        let err = run_trials(
            &map,
            &TrialConfig::new(Algorithm::AStar, 6, 3, "x"),
            5,
            &CancelToken::new(),
            |_| {},
        )
        .unwrap_err();
        assert!(matches!(err, HarnessError::FailedDrawsExhausted { .. }));
    }

    #[test]
    fn spawned_batch_streams_progress_then_completion() {
        let map = Arc::new(Map::open(10, "open10"));
        let handle = spawn_trials(
            map,
            config(Algorithm::Jps, 6),
            11,
            CancelToken::new(),
        );
        let events: Vec<TrialEvent> = handle.events().iter().collect();
        let results = handle.join().unwrap();
        assert_eq!(results.len(), 6);

        let progress = events
            .iter()
            .filter(|e| matches!(e, TrialEvent::Progress(_)))
            .count();
        assert_eq!(progress, 6);
        match events.last() {
            Some(TrialEvent::Completed(r)) => assert_eq!(r.len(), 6),
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[test]
    fn spawned_cancelled_batch_reports_cancelled() {
        let map = Arc::new(Map::open(10, "open10"));
        let cancel = CancelToken::new();
        cancel.cancel();
        let handle = spawn_trials(map, config(Algorithm::AStar, 6), 11, cancel);
        let events: Vec<TrialEvent> = handle.events().iter().collect();
        let results = handle.join().unwrap();
        assert!(results.cancelled());
        assert!(matches!(events.last(), Some(TrialEvent::Cancelled(_))));
    }
}
