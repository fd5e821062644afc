//! Path reconstruction from parent back-references.

use pathprof_core::{BoundsError, Coord};
#[cfg(test)]
use pathprof_core::Map;

use crate::node::NodeCollection;

/// Walk `parent` links from `target` back to `start`, marking each visited
/// cell, and return the path in start→target order.
///
/// Returns an empty path when the chain is broken before reaching the
/// start. The walk is bounded by the cell count, so a corrupted (cyclic)
/// chain terminates instead of looping; a completed search can never
/// produce one, since each parent is assigned exactly once from a closed
/// node.
pub(crate) fn trace_path(
    nodes: &mut NodeCollection,
    start: Coord,
    target: Coord,
) -> Result<Vec<Coord>, BoundsError> {
    let mut path = Vec::new();
    let mut current = target;

    for _ in 0..nodes.cell_count() {
        nodes.get_mut(current)?.in_path = true;
        path.push(current);
        if current == start {
            path.reverse();
            return Ok(path);
        }
        match nodes.get(current)?.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }

    // Broken or cyclic chain: undo the markings and report no path.
    for &c in &path {
        nodes.get_mut(c)?.in_path = false;
    }
    Ok(Vec::new())
}

/// Check a traced path for the properties every search guarantees: starts
/// at `start`, ends at `target`, and every hop is a valid 8-adjacent move.
#[cfg(test)]
pub(crate) fn assert_connected(map: &Map, path: &[Coord], start: Coord, target: Coord) {
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&target));
    for w in path.windows(2) {
        let d = w[1] - w[0];
        assert!(
            d.x.abs() <= 1 && d.y.abs() <= 1 && d != Coord::ZERO,
            "{} -> {} is not an 8-adjacent step",
            w[0],
            w[1]
        );
    }
    for &c in path {
        assert!(map.valid(c), "{c} is blocked or out of bounds");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(nodes: &mut NodeCollection, coords: &[Coord]) {
        for w in coords.windows(2) {
            nodes.get_mut(w[1]).unwrap().parent = Some(w[0]);
        }
    }

    #[test]
    fn traces_and_reverses() {
        let mut nodes = NodeCollection::new(4);
        let route = [Coord::new(0, 0), Coord::new(1, 1), Coord::new(2, 2)];
        chain(&mut nodes, &route);
        let path = trace_path(&mut nodes, route[0], route[2]).unwrap();
        assert_eq!(path, route);
        for c in route {
            assert!(nodes.get(c).unwrap().in_path());
        }
    }

    #[test]
    fn broken_chain_yields_empty_path() {
        let mut nodes = NodeCollection::new(4);
        // Parent chain stops short of the start node.
        nodes.get_mut(Coord::new(2, 2)).unwrap().parent = Some(Coord::new(1, 1));
        let path = trace_path(&mut nodes, Coord::new(0, 0), Coord::new(2, 2)).unwrap();
        assert!(path.is_empty());
        assert!(!nodes.get(Coord::new(2, 2)).unwrap().in_path());
    }

    #[test]
    fn cyclic_chain_terminates() {
        let mut nodes = NodeCollection::new(3);
        let a = Coord::new(1, 1);
        let b = Coord::new(2, 1);
        nodes.get_mut(a).unwrap().parent = Some(b);
        nodes.get_mut(b).unwrap().parent = Some(a);
        let path = trace_path(&mut nodes, Coord::new(0, 0), a).unwrap();
        assert!(path.is_empty());
    }
}
