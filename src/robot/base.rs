//! Stat block shared by every robot
//!
//! Robot authors embed a `RobotBase` and hand it to the engine through
//! `Robot::base`/`Robot::base_mut`; the engine then owns all stat changes.

use serde::{Deserialize, Serialize};

use crate::core::types::Position;
use crate::robot::weapon::WeaponKind;

pub const STARTING_HEALTH: i32 = 100;
pub const STARTING_GRENADES: i32 = 10;

pub const MIN_MOVE_SPEED: i32 = 2;
pub const MAX_MOVE_SPEED: i32 = 5;
pub const MAX_ARMOR: i32 = 5;
/// Move speed and armor trade off against each other
pub const MAX_MOVE_PLUS_ARMOR: i32 = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotBase {
    pub name: String,
    health: i32,
    armor: i32,
    move_speed: i32,
    weapon: WeaponKind,
    grenades: i32,

    position: Position,
    /// Arena size as (rows, cols); zero until the arena binds it
    boundaries: (i32, i32),
}

impl RobotBase {
    /// Build a stat block. Move speed is clamped to 2..=5 and armor to 0..=5;
    /// whatever exceeds the combined budget of 7 comes off the armor.
    pub fn new(name: impl Into<String>, move_speed: i32, armor: i32, weapon: WeaponKind) -> Self {
        let move_speed = move_speed.clamp(MIN_MOVE_SPEED, MAX_MOVE_SPEED);
        let armor = armor
            .clamp(0, MAX_ARMOR)
            .min(MAX_MOVE_PLUS_ARMOR - move_speed);

        Self {
            name: name.into(),
            health: STARTING_HEALTH,
            armor,
            move_speed,
            weapon,
            grenades: if weapon.uses_ordnance() { STARTING_GRENADES } else { 0 },
            position: Position::default(),
            boundaries: (0, 0),
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn armor(&self) -> i32 {
        self.armor
    }

    pub fn move_speed(&self) -> i32 {
        self.move_speed
    }

    pub fn weapon(&self) -> WeaponKind {
        self.weapon
    }

    pub fn grenades(&self) -> i32 {
        self.grenades
    }

    /// Last position the arena reported
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn boundaries(&self) -> (i32, i32) {
        self.boundaries
    }

    pub fn set_boundaries(&mut self, rows: i32, cols: i32) {
        self.boundaries = (rows, cols);
    }

    pub fn set_position(&mut self, row: i32, col: i32) {
        self.position = Position::new(row, col);
    }

    /// Subtract damage and return the new health (never below zero)
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        self.health = (self.health - amount.max(0)).max(0);
        self.health
    }

    pub fn reduce_armor(&mut self, amount: i32) {
        self.armor = (self.armor - amount.max(0)).max(0);
    }

    pub fn disable_movement(&mut self) {
        self.move_speed = 0;
    }

    pub fn decrement_grenades(&mut self) {
        self.grenades = (self.grenades - 1).max(0);
    }

    pub fn summary(&self) -> String {
        format!(
            "Health: {} Armor: {} Move: {} Weapon: {} Grenades: {} Position: {}",
            self.health, self.armor, self.move_speed, self.weapon, self.grenades, self.position
        )
    }
}
