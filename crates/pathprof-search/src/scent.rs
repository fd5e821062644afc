//! Scent-field diffusion pursuit.
//!
//! Unlike the graph searches, the field is not a shortest-path solver: a
//! moving source repeatedly stamps an ever-increasing value at its cell,
//! and every update diffuses last generation's values outward, decaying by
//! one per hop. A pursuer simply climbs the gradient. One update is O(V)
//! against O(V log V) or worse for a fresh graph search, at the price of a
//! propagation lag proportional to the distance from the source and no
//! reachability guarantee while the gradient is still forming.
//!
//! Field state persists across calls by design; an instance must therefore
//! stay confined to a single trial sequence.

use pathprof_core::{BoundsError, Coord, Map};

use crate::algorithm::{Algorithm, SearchAlgorithm};

/// Double-buffered scalar field over a square grid.
pub struct ScentField {
    grid_size: i32,
    current: Vec<i32>,
    previous: Vec<i32>,
    source: i32,
}

impl ScentField {
    /// Create a zeroed field for a `grid_size × grid_size` grid.
    pub fn new(grid_size: i32) -> Self {
        assert!(grid_size > 0, "grid size must be positive");
        let cells = (grid_size * grid_size) as usize;
        Self {
            grid_size,
            current: vec![0; cells],
            previous: vec![0; cells],
            source: 0,
        }
    }

    /// Side length of the field.
    #[inline]
    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    /// The value last stamped at the source.
    #[inline]
    pub fn source_value(&self) -> i32 {
        self.source
    }

    /// The current field value at `c` (0 outside the grid).
    #[inline]
    pub fn value(&self, c: Coord) -> i32 {
        if c.x < 0 || c.x >= self.grid_size || c.y < 0 || c.y >= self.grid_size {
            return 0;
        }
        self.current[(c.y * self.grid_size + c.x) as usize]
    }

    /// Advance the field one generation with the source at `target`.
    ///
    /// The previous generation is snapshotted, the source counter is
    /// incremented, every unblocked cell takes
    /// `max(previous[cell], max over valid neighbors of previous[n] - 1)`,
    /// and the new counter value is stamped at the target afterwards so
    /// the diffusion sweep cannot erode it.
    pub fn update(&mut self, map: &Map, target: Coord) {
        assert_eq!(
            map.grid_size(),
            self.grid_size,
            "field and map sizes must match"
        );

        self.previous.copy_from_slice(&self.current);
        self.source += 1;

        for y in 0..self.grid_size {
            for x in 0..self.grid_size {
                let c = Coord::new(x, y);
                if !map.valid(c) {
                    continue;
                }
                let i = (y * self.grid_size + x) as usize;
                let mut best = self.previous[i];
                for n in c.neighbors_8() {
                    if map.valid(n) {
                        best = best.max(self.previous[(n.y * self.grid_size + n.x) as usize] - 1);
                    }
                }
                self.current[i] = best;
            }
        }

        if map.in_bounds(target) {
            self.current[(target.y * self.grid_size + target.x) as usize] = self.source;
        }
    }

    /// One greedy pursuit step from `pos`: the unblocked neighbor with the
    /// highest current value, or `pos` itself when no neighbor exceeds it.
    pub fn chase_from(&self, map: &Map, pos: Coord) -> Coord {
        let mut best = pos;
        let mut best_value = self.value(pos);
        for n in pos.neighbors_8() {
            if map.valid(n) && self.value(n) > best_value {
                best = n;
                best_value = self.value(n);
            }
        }
        best
    }

    /// Zero both generations and the source counter.
    pub fn clear(&mut self) {
        self.current.fill(0);
        self.previous.fill(0);
        self.source = 0;
    }
}

/// Drives a [`ScentField`] as a profiled strategy: ticks the field with a
/// stationary target and walks the pursuer until it arrives or a tick
/// budget (four generations per grid cell) runs out. Exhausting the budget
/// yields an empty path, the same defined failure as an unreachable
/// graph-search target.
#[derive(Default)]
pub struct ScentPursuit {
    field: Option<ScentField>,
    path: Vec<Coord>,
    ticks: usize,
}

impl ScentPursuit {
    pub fn new() -> Self {
        Self::default()
    }

    /// The field as of the last `build`, for display consumers.
    pub fn field(&self) -> Option<&ScentField> {
        self.field.as_ref()
    }
}

impl SearchAlgorithm for ScentPursuit {
    fn algorithm(&self) -> Algorithm {
        Algorithm::ScentMap
    }

    fn name(&self) -> &'static str {
        "Scent Map"
    }

    fn build(&mut self, map: &Map, start: Coord, target: Coord) -> Result<(), BoundsError> {
        let mut field = ScentField::new(map.grid_size());
        self.path.clear();
        self.ticks = 0;

        let budget = 4 * (map.grid_size() as usize).pow(2);
        let mut pos = start;
        let mut reached = map.valid(start) && map.valid(target) && start == target;
        if map.valid(start) {
            self.path.push(start);
        }

        while !reached && self.ticks < budget && map.valid(start) && map.valid(target) {
            field.update(map, target);
            self.ticks += 1;
            let next = field.chase_from(map, pos);
            if next != pos {
                pos = next;
                self.path.push(pos);
            }
            reached = pos == target;
        }

        if !reached {
            self.path.clear();
        }
        self.field = Some(field);
        Ok(())
    }

    fn path(&self) -> &[Coord] {
        &self.path
    }

    /// Field update sweeps performed by the last `build`.
    fn nodes_expanded(&self) -> usize {
        self.ticks
    }

    fn is_in_path(&self, c: Coord) -> bool {
        self.path.contains(&c)
    }

    fn is_closed(&self, _c: Coord) -> bool {
        false
    }
}
