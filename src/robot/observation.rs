//! What a radar sweep hands back to a robot

use serde::{Deserialize, Serialize};

use crate::core::types::Position;

/// Contents of one observed cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    Empty,
    Mound,
    Pit,
    FlameTrap,
    /// A robot that is still fighting
    Robot,
    /// A robot that has been knocked out
    Downed,
}

impl Marker {
    /// Single-character glyph, shared with the board renderer
    pub fn glyph(&self) -> char {
        match self {
            Marker::Empty => '.',
            Marker::Mound => 'M',
            Marker::Pit => 'P',
            Marker::FlameTrap => 'F',
            Marker::Robot => 'R',
            Marker::Downed => 'X',
        }
    }
}

/// One visible cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarObservation {
    pub marker: Marker,
    pub position: Position,
}

impl RadarObservation {
    pub fn new(marker: Marker, position: Position) -> Self {
        Self { marker, position }
    }

    pub fn row(&self) -> i32 {
        self.position.row
    }

    pub fn col(&self) -> i32 {
        self.position.col
    }

    pub fn is_enemy(&self) -> bool {
        self.marker == Marker::Robot
    }
}
