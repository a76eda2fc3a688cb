//! Sentinel: heavy armor, short legs, a hammer.
//!
//! Sweeps its radar clockwise. Swings at any robot standing next to it,
//! closes one cell at a time on a robot it has seen, and otherwise wanders.

use robot_arena::prelude::*;

struct Sentinel {
    base: RobotBase,
    radar_dir: i32,
    enemy: Option<Position>,
    wander: i32,
}

impl Sentinel {
    fn new() -> Self {
        Self {
            base: RobotBase::new("Sentinel", 2, 5, WeaponKind::Hammer),
            radar_dir: 1,
            enemy: None,
            wander: 0,
        }
    }
}

impl Robot for Sentinel {
    fn base(&self) -> &RobotBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RobotBase {
        &mut self.base
    }

    fn radar_direction(&mut self) -> i32 {
        let dir = self.radar_dir;
        self.radar_dir = dir % 8 + 1;
        dir
    }

    fn receive_radar(&mut self, observations: &[RadarObservation]) {
        self.enemy = observations.iter().find(|o| o.is_enemy()).map(|o| o.position);
    }

    fn shot_target(&mut self) -> Option<Position> {
        let me = self.base.position();
        self.enemy.filter(|enemy| enemy.distance(&me) == 1)
    }

    fn move_request(&mut self) -> MoveRequest {
        let me = self.base.position();
        match self.enemy.and_then(|e| Direction::from_delta(e.row - me.row, e.col - me.col)) {
            Some(direction) => MoveRequest::toward(direction, 1),
            None => {
                // Pseudo-random walk: step through the octants out of order
                self.wander = (self.wander + 3) % 8;
                MoveRequest::new(self.wander + 1, 1)
            }
        }
    }
}

robot_arena::export_robot!(Sentinel::new());
