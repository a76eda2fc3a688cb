use thiserror::Error;

use crate::core::types::Position;

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("Arena must be at least {min}x{min} (got {rows}x{cols})")]
    GridTooSmall { rows: i32, cols: i32, min: i32 },

    #[error("Arena of {rows}x{cols} exceeds the {max}-cell limit")]
    GridTooLarge { rows: i32, cols: i32, max: usize },

    #[error("Cannot scatter {requested} hazards on a {cells}-cell grid")]
    TooManyHazards { requested: usize, cells: usize },

    #[error("No room to place {robots} robots ({free} free cells)")]
    ArenaFull { robots: usize, free: usize },

    #[error("Cell {0} is blocked or occupied")]
    CellOccupied(Position),

    #[error("Robot index {0} out of range")]
    UnknownRobot(usize),

    #[error("Arena is no longer in setup")]
    NotInSetup,

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
