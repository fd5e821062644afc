//! The tile map the search algorithms run against.
//!
//! Maps are square grids of open/blocked tiles loaded from a plain-text
//! format: one character per cell, `.` for open, anything else blocked.
//! The declared size is implicit — every line must be exactly as wide as
//! the file is tall, and a file violating that fails at load rather than
//! being silently truncated or padded.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::{BoundsError, Coord};

/// A single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Open,
    Blocked,
}

impl Tile {
    fn from_char(c: char) -> Self {
        if c == '.' { Tile::Open } else { Tile::Blocked }
    }
}

/// Errors raised while loading a map file.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("map {name:?} is empty")]
    Empty { name: String },
    #[error("map {name:?} line {line} is {width} cells wide, expected {expected}")]
    RaggedLine {
        name: String,
        line: usize,
        width: usize,
        expected: usize,
    },
    #[error("failed to read map file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A square grid of open/blocked tiles, consumed read-only by every
/// algorithm. Plain owned data: `Send + Sync`, shareable behind `Arc`.
#[derive(Debug, Clone)]
pub struct Map {
    name: String,
    grid_size: i32,
    tiles: Vec<Tile>,
}

impl Map {
    /// Create a fully open map of the given size.
    pub fn open(grid_size: i32, name: impl Into<String>) -> Self {
        assert!(grid_size > 0, "map size must be positive");
        Self {
            name: name.into(),
            grid_size,
            tiles: vec![Tile::Open; (grid_size * grid_size) as usize],
        }
    }

    /// Parse map text in the one-character-per-cell format.
    ///
    /// The grid size is the number of lines; every line must be exactly
    /// that wide.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, MapError> {
        let name = name.into();
        let lines: Vec<&str> = text.lines().collect();
        let size = lines.len();
        if size == 0 {
            return Err(MapError::Empty { name });
        }

        let mut tiles = Vec::with_capacity(size * size);
        for (i, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != size {
                return Err(MapError::RaggedLine {
                    name,
                    line: i + 1,
                    width,
                    expected: size,
                });
            }
            tiles.extend(line.chars().map(Tile::from_char));
        }

        Ok(Self {
            name,
            grid_size: size as i32,
            tiles,
        })
    }

    /// Load a map from a file. The map name is the file stem.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::parse(name, &text)
    }

    /// The map name (file stem for loaded maps).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Side length of the square grid.
    #[inline]
    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    /// Whether the coordinate lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, c: Coord) -> bool {
        c.x >= 0 && c.x < self.grid_size && c.y >= 0 && c.y < self.grid_size
    }

    /// Whether the coordinate is in bounds **and** unblocked. This is the
    /// predicate every algorithm filters neighbors through.
    #[inline]
    pub fn valid(&self, c: Coord) -> bool {
        self.in_bounds(c) && self.tiles[self.idx(c)] == Tile::Open
    }

    /// The tile at a coordinate, or `None` out of bounds.
    pub fn tile(&self, c: Coord) -> Option<Tile> {
        self.in_bounds(c).then(|| self.tiles[self.idx(c)])
    }

    /// Overwrite a tile. Used by tests and map construction, never by the
    /// algorithms.
    pub fn set_tile(&mut self, c: Coord, tile: Tile) -> Result<(), BoundsError> {
        if !self.in_bounds(c) {
            return Err(BoundsError::new(c, self.grid_size));
        }
        let i = self.idx(c);
        self.tiles[i] = tile;
        Ok(())
    }

    /// Number of blocked cells on the map.
    pub fn obstacle_count(&self) -> usize {
        self.tiles.iter().filter(|t| **t == Tile::Blocked).count()
    }

    #[inline]
    fn idx(&self, c: Coord) -> usize {
        (c.y * self.grid_size + c.x) as usize
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.grid_size {
            for x in 0..self.grid_size {
                let c = match self.tiles[(y * self.grid_size + x) as usize] {
                    Tile::Open => '.',
                    Tile::Blocked => '#',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_square_map() {
        let map = Map::parse("t", "..#\n...\n#..").unwrap();
        assert_eq!(map.grid_size(), 3);
        assert_eq!(map.obstacle_count(), 2);
        assert!(map.valid(Coord::new(0, 0)));
        assert!(!map.valid(Coord::new(2, 0)));
        assert!(!map.valid(Coord::new(0, 2)));
        assert!(!map.valid(Coord::new(3, 1)));
        assert!(!map.valid(Coord::new(-1, 0)));
    }

    #[test]
    fn parse_rejects_ragged_lines() {
        let err = Map::parse("bad", "..\n...\n..").unwrap_err();
        match err {
            MapError::RaggedLine { line, width, expected, .. } => {
                assert_eq!(line, 1);
                assert_eq!(width, 2);
                assert_eq!(expected, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_rejects_non_square_height() {
        // Two 3-wide lines: width 3 != height 2, caught on line 1.
        assert!(Map::parse("bad", "...\n...").is_err());
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(matches!(Map::parse("e", ""), Err(MapError::Empty { .. })));
    }

    #[test]
    fn display_round_trips() {
        let text = "..#\n...\n#..\n";
        let map = Map::parse("t", text).unwrap();
        let shown = map.to_string();
        assert_eq!(shown, text);
        let back = Map::parse("t", &shown).unwrap();
        assert_eq!(back.obstacle_count(), map.obstacle_count());
    }

    #[test]
    fn any_non_dot_blocks() {
        let map = Map::parse("t", ".x\nw.").unwrap();
        assert_eq!(map.obstacle_count(), 2);
        assert_eq!(map.tile(Coord::new(1, 0)), Some(Tile::Blocked));
    }

    #[test]
    fn set_tile_checks_bounds() {
        let mut map = Map::open(4, "t");
        map.set_tile(Coord::new(1, 1), Tile::Blocked).unwrap();
        assert!(!map.valid(Coord::new(1, 1)));
        assert!(map.set_tile(Coord::new(4, 0), Tile::Blocked).is_err());
    }
}
