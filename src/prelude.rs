//! Everything a robot author needs
//!
//! ```ignore
//! use robot_arena::prelude::*;
//! ```

pub use crate::core::types::{Direction, Position};
pub use crate::robot::{Marker, MoveRequest, RadarObservation, Robot, RobotBase, WeaponKind};
