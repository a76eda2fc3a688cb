//! Robot roster
//!
//! One `RobotEntry` per robot, in load order. Load order fixes both the
//! display symbol and the turn order. Entries are never removed; a robot that
//! is knocked out stays on the board as a downed marker.

use libloading::Library;
use rand::Rng;

use crate::arena::grid::Grid;
use crate::core::error::{ArenaError, Result};
use crate::core::types::Position;
use crate::robot::Robot;

/// Display symbols, handed out by load order
pub const ROBOT_SYMBOLS: [char; 9] = ['!', '@', '#', '$', '%', '^', '&', '*', '?'];

pub fn symbol_for_index(index: usize) -> char {
    ROBOT_SYMBOLS[index % ROBOT_SYMBOLS.len()]
}

/// Arena-side record for one robot
pub struct RobotEntry {
    pub name: String,
    pub symbol: char,
    pub position: Position,
    alive: bool,
    /// Set when the robot falls into a pit; permanent
    pub immobilized: bool,

    // Field order matters: the behavior object's code lives in `module`,
    // so it has to be dropped first.
    robot: Box<dyn Robot>,
    module: Option<Library>,
}

impl RobotEntry {
    pub fn new(robot: Box<dyn Robot>, module: Option<Library>, symbol: char) -> Self {
        Self {
            name: robot.name().to_string(),
            symbol,
            position: Position::default(),
            alive: true,
            immobilized: false,
            robot,
            module,
        }
    }

    /// Still fighting?
    pub fn is_alive(&self) -> bool {
        self.alive && self.robot.health() > 0
    }

    /// Knock the robot out. There is no way back.
    pub fn eliminate(&mut self) {
        self.alive = false;
    }

    pub fn robot(&self) -> &dyn Robot {
        self.robot.as_ref()
    }

    pub fn robot_mut(&mut self) -> &mut dyn Robot {
        self.robot.as_mut()
    }

    /// Was this robot loaded from a shared library?
    pub fn is_dynamic(&self) -> bool {
        self.module.is_some()
    }

    /// Move the robot and tell it where it now stands
    pub fn relocate(&mut self, pos: Position) {
        self.position = pos;
        self.robot.move_to(pos.row, pos.col);
    }

    /// Board glyph: own symbol while alive, `X` once downed
    pub fn glyph(&self) -> char {
        if self.is_alive() { self.symbol } else { 'X' }
    }
}

impl std::fmt::Debug for RobotEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RobotEntry")
            .field("name", &self.name)
            .field("symbol", &self.symbol)
            .field("position", &self.position)
            .field("alive", &self.is_alive())
            .field("immobilized", &self.immobilized)
            .field("dynamic", &self.is_dynamic())
            .finish()
    }
}

/// Index of the robot standing on `pos`, dead or alive
pub fn occupant_at(roster: &[RobotEntry], pos: Position) -> Option<usize> {
    roster.iter().position(|e| e.position == pos)
}

/// Index of the live robot standing on `pos`
pub fn live_occupant_at(roster: &[RobotEntry], pos: Position) -> Option<usize> {
    roster.iter().position(|e| e.is_alive() && e.position == pos)
}

pub fn alive_count(roster: &[RobotEntry]) -> usize {
    roster.iter().filter(|e| e.is_alive()).count()
}

/// Can a robot be set down here? Needs empty terrain and nobody else on it.
pub fn is_free_cell(grid: &Grid, roster: &[RobotEntry], pos: Position, exclude: usize) -> bool {
    grid.terrain(pos).is_some_and(|t| t.is_empty())
        && !roster
            .iter()
            .enumerate()
            .any(|(i, e)| i != exclude && e.position == pos)
}

/// Put every robot on a random free cell, in roster order.
///
/// Redraws until a free cell turns up, so the free-cell count is checked
/// first.
pub fn place_randomly<R: Rng>(grid: &Grid, roster: &mut [RobotEntry], rng: &mut R) -> Result<()> {
    let free = grid.empty_cells();
    if roster.len() > free {
        return Err(ArenaError::ArenaFull { robots: roster.len(), free });
    }

    // Park everyone off-grid so stale default positions don't collide
    for entry in roster.iter_mut() {
        entry.position = Position::new(-1, -1);
    }

    for index in 0..roster.len() {
        let pos = loop {
            let candidate = grid.random_cell(rng);
            if is_free_cell(grid, roster, candidate, index) {
                break candidate;
            }
        };
        roster[index].relocate(pos);
        tracing::debug!(robot = %roster[index].name, %pos, "placed robot");
    }

    Ok(())
}
