//! Core types for the pathfinding profiler: integer grid coordinates,
//! the tile map the algorithms search over, and the shared error types.
//!
//! Everything here is plain owned data — [`Map`] is `Send + Sync` so a
//! trial harness can share one map across threads behind an `Arc`.

mod error;
mod geom;
mod map;

pub use error::BoundsError;
pub use geom::Coord;
pub use map::{Map, MapError, Tile};
