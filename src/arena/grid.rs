//! Arena grid: dimensions and terrain
//!
//! Terrain is laid down during setup and never changes afterwards. Who
//! stands where is tracked by the roster, not here.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::{checked_cell_count, ArenaConfig};
use crate::core::error::{ArenaError, Result};
use crate::core::types::Position;
use crate::robot::Marker;

/// Terrain type of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Empty,
    /// Blocks movement
    Mound,
    /// Traps whoever enters for the rest of the game
    Pit,
    /// Burns whoever enters
    FlameTrap,
}

impl Terrain {
    pub fn marker(&self) -> Marker {
        match self {
            Terrain::Empty => Marker::Empty,
            Terrain::Mound => Marker::Mound,
            Terrain::Pit => Marker::Pit,
            Terrain::FlameTrap => Marker::FlameTrap,
        }
    }

    pub fn glyph(&self) -> char {
        self.marker().glyph()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Terrain::Empty)
    }
}

/// How many of each terrain feature to scatter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HazardCounts {
    pub mounds: usize,
    pub pits: usize,
    pub flame_traps: usize,
}

impl HazardCounts {
    pub fn total(&self) -> usize {
        self.mounds + self.pits + self.flame_traps
    }
}

impl From<&ArenaConfig> for HazardCounts {
    fn from(config: &ArenaConfig) -> Self {
        Self {
            mounds: config.mounds,
            pits: config.pits,
            flame_traps: config.flame_traps,
        }
    }
}

/// Rectangular terrain grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<Terrain>,
}

impl Grid {
    /// Create an all-empty grid. Both dimensions must be at least 10 and the
    /// cell count at most [`MAX_ARENA_CELLS`](crate::core::config::MAX_ARENA_CELLS).
    pub fn new(rows: i32, cols: i32) -> Result<Self> {
        let cells = checked_cell_count(rows, cols)?;

        Ok(Self {
            rows,
            cols,
            cells: vec![Terrain::Empty; cells],
        })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.rows && pos.col >= 0 && pos.col < self.cols
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.row * self.cols + pos.col) as usize)
    }

    /// Terrain at a cell, `None` when out of bounds
    pub fn terrain(&self, pos: Position) -> Option<Terrain> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Set terrain at a cell (setup only). Out-of-bounds writes are ignored.
    pub fn set_terrain(&mut self, pos: Position, terrain: Terrain) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = terrain;
        }
    }

    pub fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|t| t.is_empty()).count()
    }

    /// Uniformly random cell, in bounds
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Position {
        Position::new(rng.gen_range(0..self.rows), rng.gen_range(0..self.cols))
    }

    /// Place `count` cells of `terrain` on distinct empty cells.
    ///
    /// Redraws on collision, so the grid must have at least `count` empty
    /// cells. `ArenaConfig::validate` guarantees that for configured runs.
    pub fn scatter<R: Rng>(&mut self, count: usize, terrain: Terrain, rng: &mut R) {
        debug_assert!(count <= self.empty_cells(), "scatter would never terminate");

        let mut placed = 0;
        while placed < count {
            let pos = self.random_cell(rng);
            if self.terrain(pos) == Some(Terrain::Empty) {
                self.set_terrain(pos, terrain);
                placed += 1;
            }
        }
    }

    /// Mounds first, then pits, then flame traps
    pub fn scatter_hazards<R: Rng>(&mut self, counts: HazardCounts, rng: &mut R) {
        self.scatter(counts.mounds, Terrain::Mound, rng);
        self.scatter(counts.pits, Terrain::Pit, rng);
        self.scatter(counts.flame_traps, Terrain::FlameTrap, rng);
    }

    /// All in-bounds positions, row-major
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| Position::new(r, c)))
    }
}
