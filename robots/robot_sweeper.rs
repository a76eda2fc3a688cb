//! Sweeper: a fast railgunner that patrols in straight lines.
//!
//! Each turn it points the radar along its patrol heading. Anything it sees
//! gets shot; otherwise it keeps going and turns right at walls and mounds.

use robot_arena::prelude::*;

struct Sweeper {
    base: RobotBase,
    heading: Direction,
    target: Option<Position>,
    blocked: bool,
}

impl Sweeper {
    fn new() -> Self {
        Self {
            base: RobotBase::new("Sweeper", 4, 2, WeaponKind::Railgun),
            heading: Direction::East,
            target: None,
            blocked: false,
        }
    }

    fn turn_right(&mut self) {
        self.heading = Direction::from_code((self.heading.code() + 1) % 8 + 1).unwrap_or(Direction::North);
    }
}

impl Robot for Sweeper {
    fn base(&self) -> &RobotBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RobotBase {
        &mut self.base
    }

    fn radar_direction(&mut self) -> i32 {
        self.heading.code()
    }

    fn receive_radar(&mut self, observations: &[RadarObservation]) {
        let me = self.base.position();
        self.target = observations
            .iter()
            .filter(|o| o.is_enemy())
            .min_by_key(|o| o.position.distance(&me))
            .map(|o| o.position);

        let ahead = me.step(self.heading, 1);
        let (rows, cols) = self.base.boundaries();
        let off_grid = ahead.row < 0 || ahead.col < 0 || ahead.row >= rows || ahead.col >= cols;
        let obstacle = observations
            .iter()
            .any(|o| o.position == ahead && matches!(o.marker, Marker::Mound | Marker::Pit | Marker::FlameTrap));
        self.blocked = off_grid || obstacle;
    }

    fn shot_target(&mut self) -> Option<Position> {
        self.target
    }

    fn move_request(&mut self) -> MoveRequest {
        if self.blocked {
            self.turn_right();
            return MoveRequest::stay();
        }
        MoveRequest::toward(self.heading, self.base.move_speed())
    }
}

robot_arena::export_robot!(Sweeper::new());
