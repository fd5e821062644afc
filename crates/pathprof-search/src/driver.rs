//! The shared expand-lowest-open-node loop.
//!
//! All three graph searches run this driver; they differ only in the
//! [`Ranker`] that orders open nodes and the [`Expander`] that enumerates
//! successors. Selection is a full row-major grid scan — deliberately
//! O(V) per iteration instead of a priority queue — and the **first**
//! minimal node in scan order wins ties, so a given map, start and target
//! always reproduce the same path bit for bit.

use pathprof_core::{BoundsError, Coord, Map};

use crate::distance::manhattan;
use crate::node::{NodeCollection, SENTINEL_COST};
use crate::tracer;

/// Orders open nodes during selection.
pub(crate) trait Ranker {
    /// Rank of an open node; lower is expanded earlier.
    fn rank(&self, cost: f32, pos: Coord, target: Coord) -> f32;
}

/// Uniform-cost ranking: the accumulated cost alone.
pub(crate) struct CostOnly;

impl Ranker for CostOnly {
    #[inline]
    fn rank(&self, cost: f32, _pos: Coord, _target: Coord) -> f32 {
        cost
    }
}

/// Heuristic ranking: accumulated cost plus the manhattan estimate of the
/// remaining distance.
pub(crate) struct CostPlusManhattan;

impl Ranker for CostPlusManhattan {
    #[inline]
    fn rank(&self, cost: f32, pos: Coord, target: Coord) -> f32 {
        cost + manhattan(pos, target) as f32
    }
}

/// A successor produced by an [`Expander`]: a cell reachable from the
/// expanded node at the given edge cost.
pub(crate) struct Successor {
    pub pos: Coord,
    pub step_cost: f32,
}

/// Enumerates the successors of an expanded node.
pub(crate) trait Expander {
    fn successors(
        &self,
        map: &Map,
        nodes: &NodeCollection,
        from: Coord,
        target: Coord,
        out: &mut Vec<Successor>,
    ) -> Result<(), BoundsError>;
}

/// One completed search: the node grid, the traced path and the expansion
/// count, owned together so path/closed queries stay consistent.
pub(crate) struct GridSearch {
    nodes: NodeCollection,
    path: Vec<Coord>,
    expanded: usize,
}

impl GridSearch {
    /// Run a search from `start` to `target` over `map`.
    ///
    /// A fresh [`NodeCollection`] is built for the call. An unreachable
    /// target is not an error: the search drains every reachable node and
    /// returns with an empty path.
    pub(crate) fn run(
        map: &Map,
        start: Coord,
        target: Coord,
        ranker: &impl Ranker,
        expander: &impl Expander,
    ) -> Result<Self, BoundsError> {
        let mut search = Self {
            nodes: NodeCollection::new(map.grid_size()),
            path: Vec::new(),
            expanded: 0,
        };

        if !map.valid(start) || !map.valid(target) {
            return Ok(search);
        }
        if start == target {
            search.nodes.get_mut(start)?.in_path = true;
            search.path.push(start);
            return Ok(search);
        }

        search.nodes.get_mut(start)?.cost = 0.0;

        let mut successors: Vec<Successor> = Vec::with_capacity(8);
        loop {
            // No open node below the sentinel cost: every reachable cell
            // has been closed without meeting the target.
            let Some(current) = search.select_lowest(map, target, ranker) else {
                break;
            };

            search.nodes.get_mut(current)?.closed = true;
            search.expanded += 1;
            if current == target {
                break;
            }

            let current_cost = search.nodes.get(current)?.cost;
            successors.clear();
            expander.successors(map, &search.nodes, current, target, &mut successors)?;

            for s in &successors {
                let n = search.nodes.get_mut(s.pos)?;
                if n.closed {
                    continue;
                }
                let tentative = current_cost + s.step_cost;
                if tentative < n.cost {
                    n.cost = tentative;
                    n.parent = Some(current);
                }
            }
        }

        if search.nodes.get(target)?.parent.is_some() {
            search.path = tracer::trace_path(&mut search.nodes, start, target)?;
        }
        log::trace!(
            "search {start} -> {target}: {} nodes expanded, path length {}",
            search.expanded,
            search.path.len()
        );
        Ok(search)
    }

    /// Full row-major scan for the open node of minimal rank. Strict
    /// less-than keeps the first minimal node in scan order.
    fn select_lowest(&self, map: &Map, target: Coord, ranker: &impl Ranker) -> Option<Coord> {
        let mut best: Option<(Coord, f32)> = None;
        for n in self.nodes.iter() {
            if n.closed || n.cost >= SENTINEL_COST || !map.valid(n.pos()) {
                continue;
            }
            let rank = ranker.rank(n.cost, n.pos(), target);
            match best {
                Some((_, lowest)) if rank >= lowest => {}
                _ => best = Some((n.pos(), rank)),
            }
        }
        best.map(|(pos, _)| pos)
    }

    /// Replace the traced path (jump-point searches densify theirs) and
    /// mark every cell of the replacement.
    pub(crate) fn set_path(&mut self, path: Vec<Coord>) -> Result<(), BoundsError> {
        for &c in &path {
            self.nodes.get_mut(c)?.in_path = true;
        }
        self.path = path;
        Ok(())
    }

    pub(crate) fn path(&self) -> &[Coord] {
        &self.path
    }

    pub(crate) fn expanded(&self) -> usize {
        self.expanded
    }

    pub(crate) fn is_closed(&self, c: Coord) -> bool {
        self.nodes.get(c).map(|n| n.closed()).unwrap_or(false)
    }

    pub(crate) fn is_in_path(&self, c: Coord) -> bool {
        self.nodes.get(c).map(|n| n.in_path()).unwrap_or(false)
    }
}
