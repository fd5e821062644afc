use crate::Coord;

/// Out-of-bounds access on a dense per-cell structure.
///
/// Indexing outside `[0, grid_size)` on either axis is a caller bug, not a
/// recoverable state — callers propagate this rather than substituting a
/// placeholder cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("coordinate {pos} outside the {grid_size}x{grid_size} grid")]
pub struct BoundsError {
    pub pos: Coord,
    pub grid_size: i32,
}

impl BoundsError {
    pub fn new(pos: Coord, grid_size: i32) -> Self {
        Self { pos, grid_size }
    }
}
