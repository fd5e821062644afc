//! Search algorithms for square tile maps.
//!
//! This crate provides the strategies the profiler compares:
//!
//! - **Uniform-cost search** ([`UniformCostSearch`]) — Dijkstra-style
//!   expansion with no heuristic.
//! - **Heuristic search** ([`HeuristicSearch`]) — the same driver ranked by
//!   `cost + manhattan(node, target)`.
//! - **Jump point search** ([`JumpPointSearch`]) — heuristic search with
//!   neighbor pruning and straight-line jumps.
//! - **Scent-field pursuit** ([`ScentField`], [`ScentPursuit`]) — a
//!   double-buffered diffusion field chased by gradient ascent.
//!
//! All graph searches share one driver: a full-grid scan selects the open
//! node of minimal rank (row-major order breaks ties, so runs are
//! bit-for-bit reproducible), the node is closed, and its successors are
//! relaxed. The variants differ only in how they rank nodes and how they
//! enumerate successors. Use [`create`] to build one from an [`Algorithm`]
//! tag, or construct the concrete types directly.

mod algorithm;
mod distance;
mod driver;
mod expand;
mod node;
mod scent;
mod tracer;

pub use algorithm::{
    Algorithm, HeuristicSearch, JumpPointSearch, ParseAlgorithmError, SearchAlgorithm,
    UniformCostSearch, create,
};
pub use distance::{chebyshev, manhattan, octile};
pub use node::{CARDINAL_COST, DIAGONAL_COST, Node, NodeCollection, SENTINEL_COST};
pub use scent::{ScentField, ScentPursuit};
