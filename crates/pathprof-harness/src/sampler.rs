//! Seeded start/target pair sampling.
//!
//! Trials draw a uniformly random valid start, then a target on the square
//! ring of cells at exactly the configured Chebyshev separation. Both
//! draws use bounded rejection sampling so a degenerate map (fully
//! blocked, or a ring with no valid cell) fails explicitly instead of
//! spinning forever.

use pathprof_core::{Coord, Map};
use rand::RngExt;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Rejection draws attempted before giving up on a position.
pub const MAX_SAMPLE_RETRIES: usize = 1_000;

/// The rejection-sampling budget ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    #[error("no valid start position found in {0} draws")]
    NoStart(usize),
    #[error("no valid target at separation {separation} from {start} in {retries} draws")]
    NoTarget {
        start: Coord,
        separation: i32,
        retries: usize,
    },
}

/// Reproducible start/target sampler. Two samplers built from the same
/// seed produce identical draw sequences.
pub struct PairSampler {
    rng: StdRng,
}

impl PairSampler {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw a valid start and a valid target at exactly `separation`
    /// Chebyshev distance from it.
    pub fn sample_pair(
        &mut self,
        map: &Map,
        separation: i32,
    ) -> Result<(Coord, Coord), SampleError> {
        let start = self.sample_start(map)?;
        let target = self.sample_target(map, start, separation)?;
        Ok((start, target))
    }

    fn sample_start(&mut self, map: &Map) -> Result<Coord, SampleError> {
        let size = map.grid_size();
        for _ in 0..MAX_SAMPLE_RETRIES {
            let c = Coord::new(
                self.rng.random_range(0..size),
                self.rng.random_range(0..size),
            );
            if map.valid(c) {
                return Ok(c);
            }
        }
        Err(SampleError::NoStart(MAX_SAMPLE_RETRIES))
    }

    fn sample_target(
        &mut self,
        map: &Map,
        start: Coord,
        separation: i32,
    ) -> Result<Coord, SampleError> {
        let candidates = ring_cells(map, start, separation);
        if !candidates.is_empty() {
            for _ in 0..MAX_SAMPLE_RETRIES {
                let c = candidates[self.rng.random_range(0..candidates.len())];
                if map.valid(c) {
                    return Ok(c);
                }
            }
        }
        Err(SampleError::NoTarget {
            start,
            separation,
            retries: MAX_SAMPLE_RETRIES,
        })
    }
}

/// In-bounds cells at exactly `radius` Chebyshev distance from `center`.
fn ring_cells(map: &Map, center: Coord, radius: i32) -> Vec<Coord> {
    let mut cells = Vec::with_capacity((radius as usize) * 8);
    for x in (center.x - radius)..=(center.x + radius) {
        for &y in &[center.y - radius, center.y + radius] {
            let c = Coord::new(x, y);
            if map.in_bounds(c) {
                cells.push(c);
            }
        }
    }
    for y in (center.y - radius + 1)..(center.y + radius) {
        for &x in &[center.x - radius, center.x + radius] {
            let c = Coord::new(x, y);
            if map.in_bounds(c) {
                cells.push(c);
            }
        }
    }
    cells
}
