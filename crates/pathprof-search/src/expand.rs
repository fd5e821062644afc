//! Successor generation strategies: plain 8-neighbor expansion and
//! jump-point expansion.

use pathprof_core::{BoundsError, Coord, Map};

use crate::driver::{Expander, Successor};
use crate::node::{CARDINAL_COST, DIAGONAL_COST, NodeCollection};

const ALL_DIRS: [Coord; 8] = [
    Coord::new(1, 0),
    Coord::new(-1, 0),
    Coord::new(0, 1),
    Coord::new(0, -1),
    Coord::new(1, 1),
    Coord::new(1, -1),
    Coord::new(-1, 1),
    Coord::new(-1, -1),
];

#[inline]
fn step_cost(dir: Coord) -> f32 {
    if dir.is_diagonal() {
        DIAGONAL_COST
    } else {
        CARDINAL_COST
    }
}

/// Full 8-neighbor expansion: every valid adjacent cell at unit or
/// diagonal edge cost.
pub(crate) struct AdjacentExpander;

impl Expander for AdjacentExpander {
    fn successors(
        &self,
        map: &Map,
        _nodes: &NodeCollection,
        from: Coord,
        _target: Coord,
        out: &mut Vec<Successor>,
    ) -> Result<(), BoundsError> {
        for dir in ALL_DIRS {
            let n = from + dir;
            if map.valid(n) {
                out.push(Successor {
                    pos: n,
                    step_cost: step_cost(dir),
                });
            }
        }
        Ok(())
    }
}

/// Jump-point expansion: prune directions against the travel direction
/// from the parent, then scan each surviving direction in a straight line
/// for the next jump point. Jump points relax at the accumulated
/// straight-line cost, as if directly adjacent.
pub(crate) struct JumpExpander;

impl Expander for JumpExpander {
    fn successors(
        &self,
        map: &Map,
        nodes: &NodeCollection,
        from: Coord,
        target: Coord,
        out: &mut Vec<Successor>,
    ) -> Result<(), BoundsError> {
        let mut dirs = Vec::with_capacity(8);
        match nodes.get(from)?.parent() {
            // The start node has no travel direction: consider all 8.
            None => dirs.extend(ALL_DIRS),
            Some(parent) => prune_dirs(map, from, (from - parent).signum(), &mut dirs),
        }

        for dir in dirs {
            if let Some((jump_point, steps)) = jump(map, from, dir, target) {
                out.push(Successor {
                    pos: jump_point,
                    step_cost: steps as f32 * step_cost(dir),
                });
            }
        }
        Ok(())
    }
}

/// Directions worth scanning from `p` when it was entered moving along
/// `d`: the natural continuations, plus diagonal breakouts exposed by
/// adjacent obstacles (forced neighbors).
fn prune_dirs(map: &Map, p: Coord, d: Coord, dirs: &mut Vec<Coord>) {
    let passable = |c: Coord| map.valid(c);

    if d.is_diagonal() {
        if passable(p + Coord::new(0, d.y)) {
            dirs.push(Coord::new(0, d.y));
        }
        if passable(p + Coord::new(d.x, 0)) {
            dirs.push(Coord::new(d.x, 0));
        }
        if passable(p + Coord::new(d.x, d.y)) {
            dirs.push(Coord::new(d.x, d.y));
        }
        if !passable(p + Coord::new(-d.x, 0)) && passable(p + Coord::new(-d.x, d.y)) {
            dirs.push(Coord::new(-d.x, d.y));
        }
        if !passable(p + Coord::new(0, -d.y)) && passable(p + Coord::new(d.x, -d.y)) {
            dirs.push(Coord::new(d.x, -d.y));
        }
    } else if d.x != 0 {
        if passable(p + Coord::new(d.x, 0)) {
            dirs.push(Coord::new(d.x, 0));
        }
        if !passable(p + Coord::new(0, 1)) && passable(p + Coord::new(d.x, 1)) {
            dirs.push(Coord::new(d.x, 1));
        }
        if !passable(p + Coord::new(0, -1)) && passable(p + Coord::new(d.x, -1)) {
            dirs.push(Coord::new(d.x, -1));
        }
    } else {
        if passable(p + Coord::new(0, d.y)) {
            dirs.push(Coord::new(0, d.y));
        }
        if !passable(p + Coord::new(1, 0)) && passable(p + Coord::new(1, d.y)) {
            dirs.push(Coord::new(1, d.y));
        }
        if !passable(p + Coord::new(-1, 0)) && passable(p + Coord::new(-1, d.y)) {
            dirs.push(Coord::new(-1, d.y));
        }
    }
}

/// Walk in a straight line along `dir` from `p` until the target, a forced
/// neighbor, or a dead end. Returns the jump point and how many cells were
/// covered.
fn jump(map: &Map, p: Coord, dir: Coord, target: Coord) -> Option<(Coord, i32)> {
    let passable = |c: Coord| map.valid(c);
    let mut n = p + dir;
    let mut steps = 1;

    loop {
        if !passable(n) {
            return None;
        }
        if n == target {
            return Some((n, steps));
        }

        if dir.is_diagonal() {
            if (!passable(n + Coord::new(-dir.x, 0)) && passable(n + Coord::new(-dir.x, dir.y)))
                || (!passable(n + Coord::new(0, -dir.y))
                    && passable(n + Coord::new(dir.x, -dir.y)))
            {
                return Some((n, steps));
            }
            // A diagonal scan must also stop wherever one of its component
            // axes would find a jump point.
            if jump(map, n, Coord::new(dir.x, 0), target).is_some()
                || jump(map, n, Coord::new(0, dir.y), target).is_some()
            {
                return Some((n, steps));
            }
        } else if dir.x != 0 {
            if (!passable(n + Coord::new(0, 1)) && passable(n + Coord::new(dir.x, 1)))
                || (!passable(n + Coord::new(0, -1)) && passable(n + Coord::new(dir.x, -1)))
            {
                return Some((n, steps));
            }
        } else if (!passable(n + Coord::new(1, 0)) && passable(n + Coord::new(1, dir.y)))
            || (!passable(n + Coord::new(-1, 0)) && passable(n + Coord::new(-1, dir.y)))
        {
            return Some((n, steps));
        }

        n = n + dir;
        steps += 1;
    }
}

/// Expand a chain of jump points into unit steps. Each consecutive pair
/// lies on a straight (cardinal or diagonal) line by construction.
pub(crate) fn densify(jump_path: &[Coord]) -> Vec<Coord> {
    if jump_path.len() <= 1 {
        return jump_path.to_vec();
    }
    let mut path = Vec::new();
    for w in jump_path.windows(2) {
        let (a, b) = (w[0], w[1]);
        let dir = (b - a).signum();
        debug_assert!(
            {
                let d = b - a;
                d.x == 0 || d.y == 0 || d.x.abs() == d.y.abs()
            },
            "jump segment {a} -> {b} is not straight"
        );
        let mut c = a;
        while c != b {
            path.push(c);
            c = c + dir;
        }
    }
    path.push(*jump_path.last().unwrap());
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathprof_core::Tile;

    fn map_with_blocks(size: i32, blocks: &[(i32, i32)]) -> Map {
        let mut map = Map::open(size, "t");
        for &(x, y) in blocks {
            map.set_tile(Coord::new(x, y), Tile::Blocked).unwrap();
        }
        map
    }

    #[test]
    fn jump_stops_at_target() {
        let map = Map::open(6, "t");
        let hit = jump(&map, Coord::new(0, 2), Coord::new(1, 0), Coord::new(4, 2));
        assert_eq!(hit, Some((Coord::new(4, 2), 4)));
    }

    #[test]
    fn jump_dead_ends_on_open_ground() {
        let map = Map::open(6, "t");
        // Nothing forces a stop before the edge of the map.
        let hit = jump(&map, Coord::new(0, 2), Coord::new(1, 0), Coord::new(0, 5));
        assert_eq!(hit, None);
    }

    #[test]
    fn horizontal_jump_detects_forced_neighbor() {
        // Wall above the scan row opens a diagonal breakout at x=2.
        let map = map_with_blocks(6, &[(2, 1)]);
        let hit = jump(&map, Coord::new(0, 2), Coord::new(1, 0), Coord::new(5, 5));
        // At (2,2) the cell above is blocked and (3,1) is open: forced.
        assert_eq!(hit, Some((Coord::new(2, 2), 2)));
    }

    #[test]
    fn diagonal_jump_stops_when_component_axis_would() {
        let map = map_with_blocks(8, &[(4, 1)]);
        // Scanning (1,1) from (0,0): the horizontal probe from (2,2) finds
        // a forced configuration at (4,2), so (2,2) is a jump point.
        let hit = jump(&map, Coord::new(0, 0), Coord::new(1, 1), Coord::new(7, 7));
        assert_eq!(hit, Some((Coord::new(2, 2), 2)));
    }

    #[test]
    fn pruned_dirs_for_straight_travel_keep_continuation() {
        let map = Map::open(6, "t");
        let mut dirs = Vec::new();
        prune_dirs(&map, Coord::new(2, 2), Coord::new(1, 0), &mut dirs);
        assert_eq!(dirs, vec![Coord::new(1, 0)]);
    }

    #[test]
    fn pruned_dirs_add_forced_breakouts() {
        let map = map_with_blocks(6, &[(2, 1)]);
        let mut dirs = Vec::new();
        prune_dirs(&map, Coord::new(2, 2), Coord::new(1, 0), &mut dirs);
        assert!(dirs.contains(&Coord::new(1, 0)));
        assert!(dirs.contains(&Coord::new(1, -1)));
        assert_eq!(dirs.len(), 2);
    }

    #[test]
    fn pruned_dirs_for_diagonal_travel() {
        let map = Map::open(6, "t");
        let mut dirs = Vec::new();
        prune_dirs(&map, Coord::new(2, 2), Coord::new(1, 1), &mut dirs);
        assert_eq!(
            dirs,
            vec![Coord::new(0, 1), Coord::new(1, 0), Coord::new(1, 1)]
        );
    }

    #[test]
    fn densify_expands_straight_segments() {
        let dense = densify(&[Coord::new(0, 0), Coord::new(3, 3), Coord::new(3, 5)]);
        assert_eq!(
            dense,
            vec![
                Coord::new(0, 0),
                Coord::new(1, 1),
                Coord::new(2, 2),
                Coord::new(3, 3),
                Coord::new(3, 4),
                Coord::new(3, 5),
            ]
        );
    }
}
