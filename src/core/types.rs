//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Round counter (simulation time unit)
pub type Round = u32;

/// Cell coordinate on the arena grid (row-major, origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Position `steps` cells along `direction`
    pub fn step(&self, direction: Direction, steps: i32) -> Self {
        let (dr, dc) = direction.delta();
        Self::new(self.row + dr * steps, self.col + dc * steps)
    }

    pub fn offset(&self, dr: i32, dc: i32) -> Self {
        Self::new(self.row + dr, self.col + dc)
    }

    /// Chebyshev distance (king moves)
    pub fn distance(&self, other: &Self) -> i32 {
        (self.row - other.row).abs().max((self.col - other.col).abs())
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// The eight compass octants, numbered clockwise from north.
///
/// Codes 1-8 are what robots hand the engine; code 0 means "no direction"
/// and has no variant here. Radar, movement and shot inference all go
/// through this one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    North = 1,
    NorthEast = 2,
    East = 3,
    SouthEast = 4,
    South = 5,
    SouthWest = 6,
    West = 7,
    NorthWest = 8,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Decode a robot-supplied direction code. Anything outside 1-8 is `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1..=8 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }

    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Unit vector as (row delta, col delta)
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Lateral offset used for the 3-wide radar ray and flamethrower band
    pub fn perpendicular(&self) -> (i32, i32) {
        let (dr, dc) = self.delta();
        (-dc, dr)
    }

    /// Octant matching the sign pattern of a row/col delta.
    ///
    /// Any non-zero delta maps to exactly one octant (steep or shallow
    /// diagonals fold onto the nearest diagonal by sign). A zero delta has no
    /// direction.
    pub fn from_delta(dr: i32, dc: i32) -> Option<Self> {
        match (dr.signum(), dc.signum()) {
            (-1, 0) => Some(Direction::North),
            (-1, 1) => Some(Direction::NorthEast),
            (0, 1) => Some(Direction::East),
            (1, 1) => Some(Direction::SouthEast),
            (1, 0) => Some(Direction::South),
            (1, -1) => Some(Direction::SouthWest),
            (0, -1) => Some(Direction::West),
            (-1, -1) => Some(Direction::NorthWest),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::NorthEast => "northeast",
            Direction::East => "east",
            Direction::SouthEast => "southeast",
            Direction::South => "south",
            Direction::SouthWest => "southwest",
            Direction::West => "west",
            Direction::NorthWest => "northwest",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
