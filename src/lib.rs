//! Robot Arena - turn-based grid combat between loadable robots

pub mod arena;
pub mod core;
pub mod loader;
pub mod prelude;
pub mod robot;
