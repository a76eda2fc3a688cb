//! Scripted robots for unit tests

use crate::arena::roster::RobotEntry;
use crate::core::types::Position;
use crate::robot::{MoveRequest, RadarObservation, Robot, RobotBase, WeaponKind};

/// A robot that repeats the same decisions every turn
pub struct Script {
    pub base: RobotBase,
    pub radar: i32,
    pub shot: Option<Position>,
    pub movement: MoveRequest,
    pub seen: Vec<RadarObservation>,
    pub turns: u32,
}

impl Script {
    pub fn new(weapon: WeaponKind) -> Self {
        Self {
            base: RobotBase::new("Script", 3, 0, weapon),
            radar: 0,
            shot: None,
            movement: MoveRequest::stay(),
            seen: Vec::new(),
            turns: 0,
        }
    }

    pub fn idle() -> Self {
        Self::new(WeaponKind::Railgun)
    }

    pub fn with_stats(mut self, move_speed: i32, armor: i32) -> Self {
        let name = self.base.name.clone();
        self.base = RobotBase::new(name, move_speed, armor, self.base.weapon());
        self
    }

    pub fn shooting(mut self, target: Position) -> Self {
        self.shot = Some(target);
        self
    }

    pub fn moving(mut self, request: MoveRequest) -> Self {
        self.movement = request;
        self
    }
}

impl Robot for Script {
    fn base(&self) -> &RobotBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RobotBase {
        &mut self.base
    }

    fn radar_direction(&mut self) -> i32 {
        self.turns += 1;
        self.radar
    }

    fn receive_radar(&mut self, observations: &[RadarObservation]) {
        self.seen = observations.to_vec();
    }

    fn shot_target(&mut self) -> Option<Position> {
        self.shot
    }

    fn move_request(&mut self) -> MoveRequest {
        self.movement
    }
}

pub fn entry_at(robot: Script, pos: Position) -> RobotEntry {
    let mut entry = RobotEntry::new(Box::new(robot), None, '!');
    entry.relocate(pos);
    entry
}
