//! Per-cell search state.
//!
//! A [`NodeCollection`] is created fresh at the start of every search and
//! lives exactly as long as that search. Nodes are mutated only by the
//! search driver; everything else reads them through the accessors.

use pathprof_core::{BoundsError, Coord};

/// Cost assigned to every node before relaxation reaches it. Any node still
/// at this value is untouched and never eligible for expansion.
pub const SENTINEL_COST: f32 = 1_000_000.0;

/// Edge weight for an orthogonal step.
pub const CARDINAL_COST: f32 = 1.0;

/// Edge weight for a diagonal step.
pub const DIAGONAL_COST: f32 = 1.4;

/// Search bookkeeping for a single cell.
#[derive(Debug, Clone)]
pub struct Node {
    pos: Coord,
    pub(crate) cost: f32,
    pub(crate) closed: bool,
    pub(crate) parent: Option<Coord>,
    pub(crate) in_path: bool,
}

impl Node {
    fn new(pos: Coord) -> Self {
        Self {
            pos,
            cost: SENTINEL_COST,
            closed: false,
            parent: None,
            in_path: false,
        }
    }

    /// The cell this node belongs to.
    #[inline]
    pub fn pos(&self) -> Coord {
        self.pos
    }

    /// Best path cost found so far ([`SENTINEL_COST`] if unreached).
    #[inline]
    pub fn cost(&self) -> f32 {
        self.cost
    }

    /// Whether the node's cost has been finalized.
    #[inline]
    pub fn closed(&self) -> bool {
        self.closed
    }

    /// Back-reference to the predecessor cell, as a coordinate into the
    /// owning collection rather than a live handle.
    #[inline]
    pub fn parent(&self) -> Option<Coord> {
        self.parent
    }

    /// Whether the cell is part of the traced path.
    #[inline]
    pub fn in_path(&self) -> bool {
        self.in_path
    }
}

/// Dense grid of [`Node`]s, one per cell, indexed row-major.
#[derive(Debug)]
pub struct NodeCollection {
    grid_size: i32,
    nodes: Vec<Node>,
}

impl NodeCollection {
    /// Create a collection with one fresh node per cell of a
    /// `grid_size × grid_size` grid.
    pub fn new(grid_size: i32) -> Self {
        assert!(grid_size > 0, "grid size must be positive");
        let mut nodes = Vec::with_capacity((grid_size * grid_size) as usize);
        for y in 0..grid_size {
            for x in 0..grid_size {
                nodes.push(Node::new(Coord::new(x, y)));
            }
        }
        Self { grid_size, nodes }
    }

    /// Side length of the node grid.
    #[inline]
    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.nodes.len()
    }

    /// The node at `c`, or a [`BoundsError`] outside the grid. Never
    /// substitutes a placeholder.
    pub fn get(&self, c: Coord) -> Result<&Node, BoundsError> {
        self.idx(c).map(|i| &self.nodes[i])
    }

    pub(crate) fn get_mut(&mut self, c: Coord) -> Result<&mut Node, BoundsError> {
        self.idx(c).map(|i| &mut self.nodes[i])
    }

    /// Row-major iteration over every node.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Reset every cell to its initial state.
    pub fn clear(&mut self) {
        for n in &mut self.nodes {
            n.cost = SENTINEL_COST;
            n.closed = false;
            n.parent = None;
            n.in_path = false;
        }
    }

    fn idx(&self, c: Coord) -> Result<usize, BoundsError> {
        if c.x < 0 || c.x >= self.grid_size || c.y < 0 || c.y >= self.grid_size {
            return Err(BoundsError::new(c, self.grid_size));
        }
        Ok((c.y * self.grid_size + c.x) as usize)
    }
}
