use pathprof_core::Coord;

use crate::node::{CARDINAL_COST, DIAGONAL_COST};

/// Manhattan (L1) distance between two coordinates.
///
/// This is the heuristic-search ranking estimate. It overestimates the
/// true remaining cost whenever the optimal route uses diagonals (a
/// diagonal step covers 2 manhattan units for [`DIAGONAL_COST`]), so it is
/// not admissible under this cost model; see [`octile`] for a tight bound.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two coordinates: the number of 8-way
/// steps separating them.
#[inline]
pub fn chebyshev(a: Coord, b: Coord) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Octile distance: exact cost of the best obstacle-free 8-way route under
/// the 1.0/1.4 edge weights, hence an admissible heuristic.
#[inline]
pub fn octile(a: Coord, b: Coord) -> f32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    CARDINAL_COST * (hi - lo) as f32 + DIAGONAL_COST * lo as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_agree_on_axis_moves() {
        let a = Coord::new(2, 3);
        let b = Coord::new(7, 3);
        assert_eq!(manhattan(a, b), 5);
        assert_eq!(chebyshev(a, b), 5);
        assert!((octile(a, b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn diagonal_moves_separate_the_metrics() {
        let a = Coord::ZERO;
        let b = Coord::new(4, 4);
        assert_eq!(manhattan(a, b), 8);
        assert_eq!(chebyshev(a, b), 4);
        assert!((octile(a, b) - 5.6).abs() < 1e-6);
    }

    #[test]
    fn octile_mixes_straight_and_diagonal() {
        // 3 diagonal steps plus 2 straight ones.
        let v = octile(Coord::ZERO, Coord::new(5, 3));
        assert!((v - (2.0 + 3.0 * 1.4)).abs() < 1e-6);
    }
}
