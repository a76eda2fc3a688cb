//! Robot capability contract
//!
//! Every combatant, whether compiled into the arena or loaded from a shared
//! library at startup, is a `Box<dyn Robot>`. A robot only decides; the arena
//! owns its position, applies all stat changes and adjudicates every action.
//!
//! Robot libraries export a single C-ABI factory named [`FACTORY_SYMBOL`],
//! normally generated with [`export_robot!`](crate::export_robot):
//!
//! ```ignore
//! use robot_arena::prelude::*;
//!
//! struct Sentinel { base: RobotBase }
//!
//! impl Robot for Sentinel {
//!     fn base(&self) -> &RobotBase { &self.base }
//!     fn base_mut(&mut self) -> &mut RobotBase { &mut self.base }
//!     fn radar_direction(&mut self) -> i32 { 0 }
//!     fn receive_radar(&mut self, _radar: &[RadarObservation]) {}
//!     fn shot_target(&mut self) -> Option<Position> { None }
//!     fn move_request(&mut self) -> MoveRequest { MoveRequest::stay() }
//! }
//!
//! robot_arena::export_robot!(Sentinel { base: RobotBase::new("Sentinel", 2, 5, WeaponKind::Hammer) });
//! ```

pub mod base;
pub mod observation;
pub mod weapon;

pub use base::RobotBase;
pub use observation::{Marker, RadarObservation};
pub use weapon::WeaponKind;

use crate::core::types::{Direction, Position};

/// Name of the factory every robot library must export
pub const FACTORY_SYMBOL: &[u8] = b"create_robot";

/// Signature of the exported factory. A null return means "no robot".
pub type RobotFactory = unsafe extern "C" fn() -> *mut Box<dyn Robot>;

/// A movement decision: direction code (1-8) and number of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveRequest {
    pub direction: i32,
    pub distance: i32,
}

impl MoveRequest {
    pub fn new(direction: i32, distance: i32) -> Self {
        Self { direction, distance }
    }

    pub fn toward(direction: Direction, distance: i32) -> Self {
        Self::new(direction.code(), distance)
    }

    /// Direction code 0 is "not moving"
    pub fn stay() -> Self {
        Self::default()
    }
}

pub trait Robot {
    /// Stat block the engine reads and mutates
    fn base(&self) -> &RobotBase;
    fn base_mut(&mut self) -> &mut RobotBase;

    /// Direction code 0-8 for this turn's radar sweep
    fn radar_direction(&mut self) -> i32;

    fn receive_radar(&mut self, observations: &[RadarObservation]);

    /// `Some(cell)` fires this turn instead of moving
    fn shot_target(&mut self) -> Option<Position>;

    /// Only asked when `shot_target` returned `None`
    fn move_request(&mut self) -> MoveRequest;

    fn name(&self) -> &str {
        &self.base().name
    }

    /// Called once after construction, before any decision
    fn bind_boundaries(&mut self, rows: i32, cols: i32) {
        self.base_mut().set_boundaries(rows, cols);
    }

    /// Authoritative position after every relocation
    fn move_to(&mut self, row: i32, col: i32) {
        self.base_mut().set_position(row, col);
    }

    fn health(&self) -> i32 {
        self.base().health()
    }

    fn armor(&self) -> i32 {
        self.base().armor()
    }

    fn move_speed(&self) -> i32 {
        self.base().move_speed()
    }

    fn weapon(&self) -> WeaponKind {
        self.base().weapon()
    }

    fn grenades(&self) -> i32 {
        self.base().grenades()
    }

    fn status(&self) -> String {
        self.base().summary()
    }

    // Engine-only mutators

    fn apply_damage(&mut self, amount: i32) -> i32 {
        self.base_mut().take_damage(amount)
    }

    fn reduce_armor(&mut self, amount: i32) {
        self.base_mut().reduce_armor(amount);
    }

    fn disable_movement(&mut self) {
        self.base_mut().disable_movement();
    }

    fn decrement_grenades(&mut self) {
        self.base_mut().decrement_grenades();
    }
}

/// Export a robot constructor as the library's `create_robot` factory.
///
/// The robot library must be built with the same compiler and against the
/// same `robot_arena` build as the arena that loads it.
#[macro_export]
macro_rules! export_robot {
    ($ctor:expr) => {
        #[no_mangle]
        #[allow(improper_ctypes_definitions)]
        pub extern "C" fn create_robot() -> *mut ::std::boxed::Box<dyn $crate::robot::Robot> {
            let robot: ::std::boxed::Box<dyn $crate::robot::Robot> = ::std::boxed::Box::new($ctor);
            ::std::boxed::Box::into_raw(::std::boxed::Box::new(robot))
        }
    };
}
