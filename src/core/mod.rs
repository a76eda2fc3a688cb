pub mod config;
pub mod error;
pub mod types;

pub use config::{checked_cell_count, ArenaConfig, LoaderConfig, MAX_ARENA_CELLS, MIN_ARENA_SIZE};
pub use error::{ArenaError, Result};
pub use types::{Direction, Position, Round};
