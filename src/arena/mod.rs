//! The arena: grid, roster and the rules that run a battle

pub mod combat;
pub mod events;
pub mod execution;
pub mod grid;
pub mod movement;
pub mod radar;
pub mod render;
pub mod roster;

#[cfg(test)]
mod testing;

pub use combat::{DamageReport, ShotResult, WastedShot};
pub use events::{ArenaEvent, ArenaEventKind, ArenaEventLog, ArenaOutcome};
pub use execution::{Arena, ArenaPhase};
pub use grid::{Grid, HazardCounts, Terrain};
pub use movement::{MoveHalt, MoveRefusal, MovementResult};
pub use render::render_board;
pub use roster::RobotEntry;
