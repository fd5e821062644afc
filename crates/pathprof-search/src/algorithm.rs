//! The strategy surface the profiler selects algorithms through.

use std::fmt;
use std::str::FromStr;

use pathprof_core::{BoundsError, Coord, Map};

use crate::driver::{CostOnly, CostPlusManhattan, GridSearch};
use crate::expand::{AdjacentExpander, JumpExpander, densify};
use crate::scent::ScentPursuit;

/// Tags for the selectable strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Dijkstra,
    AStar,
    Jps,
    ScentMap,
}

impl Algorithm {
    /// Every selectable algorithm, in presentation order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::Jps,
        Algorithm::ScentMap,
    ];
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::AStar => "A Star",
            Algorithm::Jps => "JPS",
            Algorithm::ScentMap => "Scent Map",
        };
        f.write_str(name)
    }
}

/// Unrecognized algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm {0:?} (expected dijkstra, astar, jps or scent)")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a-star" | "a*" => Ok(Algorithm::AStar),
            "jps" | "jump-point" => Ok(Algorithm::Jps),
            "scent" | "scent-map" | "scentmap" => Ok(Algorithm::ScentMap),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// A pathfinding strategy under profiling.
///
/// `build` runs one synchronous search; the read accessors expose the
/// result for the harness and for display consumers.
pub trait SearchAlgorithm {
    /// The tag this strategy was created from.
    fn algorithm(&self) -> Algorithm;

    /// Human-readable strategy name.
    fn name(&self) -> &'static str;

    /// Search from `start` to `target`. An unreachable target is a defined
    /// outcome (empty path), not an error.
    fn build(&mut self, map: &Map, start: Coord, target: Coord) -> Result<(), BoundsError>;

    /// The traced path of the last `build`, start to target inclusive;
    /// empty when no path was found.
    fn path(&self) -> &[Coord];

    /// Nodes expanded (closed) by the last `build`.
    fn nodes_expanded(&self) -> usize;

    /// Whether `c` lies on the last traced path.
    fn is_in_path(&self, c: Coord) -> bool;

    /// Whether `c` was closed by the last `build`.
    fn is_closed(&self, c: Coord) -> bool;
}

/// Create the strategy for an [`Algorithm`] tag.
pub fn create(algorithm: Algorithm) -> Box<dyn SearchAlgorithm + Send> {
    match algorithm {
        Algorithm::Dijkstra => Box::new(UniformCostSearch::new()),
        Algorithm::AStar => Box::new(HeuristicSearch::new()),
        Algorithm::Jps => Box::new(JumpPointSearch::new()),
        Algorithm::ScentMap => Box::new(ScentPursuit::new()),
    }
}

macro_rules! delegate_search_accessors {
    () => {
        fn path(&self) -> &[Coord] {
            self.search.as_ref().map(GridSearch::path).unwrap_or(&[])
        }

        fn nodes_expanded(&self) -> usize {
            self.search.as_ref().map(GridSearch::expanded).unwrap_or(0)
        }

        fn is_in_path(&self, c: Coord) -> bool {
            self.search.as_ref().is_some_and(|s| s.is_in_path(c))
        }

        fn is_closed(&self, c: Coord) -> bool {
            self.search.as_ref().is_some_and(|s| s.is_closed(c))
        }
    };
}

/// Dijkstra-style search: no heuristic, plain 8-neighbor expansion.
#[derive(Default)]
pub struct UniformCostSearch {
    search: Option<GridSearch>,
}

impl UniformCostSearch {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SearchAlgorithm for UniformCostSearch {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
    }

    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn build(&mut self, map: &Map, start: Coord, target: Coord) -> Result<(), BoundsError> {
        self.search = Some(GridSearch::run(
            map,
            start,
            target,
            &CostOnly,
            &AdjacentExpander,
        )?);
        Ok(())
    }

    delegate_search_accessors!();
}

/// A*-style search: ranks open nodes by cost plus the manhattan estimate.
#[derive(Default)]
pub struct HeuristicSearch {
    search: Option<GridSearch>,
}

impl HeuristicSearch {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SearchAlgorithm for HeuristicSearch {
    fn algorithm(&self) -> Algorithm {
        Algorithm::AStar
    }

    fn name(&self) -> &'static str {
        "A Star"
    }

    fn build(&mut self, map: &Map, start: Coord, target: Coord) -> Result<(), BoundsError> {
        self.search = Some(GridSearch::run(
            map,
            start,
            target,
            &CostPlusManhattan,
            &AdjacentExpander,
        )?);
        Ok(())
    }

    delegate_search_accessors!();
}

/// Heuristic search over jump points instead of adjacent cells. The traced
/// jump chain is densified back into unit steps so the reported path has
/// the same shape as the other strategies'.
#[derive(Default)]
pub struct JumpPointSearch {
    search: Option<GridSearch>,
}

impl JumpPointSearch {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SearchAlgorithm for JumpPointSearch {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Jps
    }

    fn name(&self) -> &'static str {
        "JPS"
    }

    fn build(&mut self, map: &Map, start: Coord, target: Coord) -> Result<(), BoundsError> {
        let mut search = GridSearch::run(map, start, target, &CostPlusManhattan, &JumpExpander)?;
        let dense = densify(search.path());
        search.set_path(dense)?;
        self.search = Some(search);
        Ok(())
    }

    delegate_search_accessors!();
}
