//! Shared helpers for integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use robot_arena::arena::Grid;
use robot_arena::core::config::ArenaConfig;
use robot_arena::prelude::*;

/// What a scripted robot has been told, readable after it is boxed
#[derive(Debug, Default)]
pub struct Transcript {
    pub turns: u32,
    pub radar: Vec<Vec<RadarObservation>>,
}

/// Robot that makes the same decisions every turn
pub struct Scripted {
    base: RobotBase,
    radar: i32,
    shot: Option<Position>,
    movement: MoveRequest,
    transcript: Rc<RefCell<Transcript>>,
}

impl Scripted {
    pub fn new(name: &str, move_speed: i32, armor: i32, weapon: WeaponKind) -> Self {
        Self {
            base: RobotBase::new(name, move_speed, armor, weapon),
            radar: 0,
            shot: None,
            movement: MoveRequest::stay(),
            transcript: Rc::default(),
        }
    }

    pub fn idle(name: &str) -> Self {
        Self::new(name, 3, 0, WeaponKind::Railgun)
    }

    pub fn radar(mut self, code: i32) -> Self {
        self.radar = code;
        self
    }

    pub fn shooting(mut self, target: Position) -> Self {
        self.shot = Some(target);
        self
    }

    pub fn moving(mut self, direction: Direction, distance: i32) -> Self {
        self.movement = MoveRequest::toward(direction, distance);
        self
    }

    pub fn transcript(&self) -> Rc<RefCell<Transcript>> {
        Rc::clone(&self.transcript)
    }
}

impl Robot for Scripted {
    fn base(&self) -> &RobotBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RobotBase {
        &mut self.base
    }

    fn radar_direction(&mut self) -> i32 {
        self.transcript.borrow_mut().turns += 1;
        self.radar
    }

    fn receive_radar(&mut self, observations: &[RadarObservation]) {
        self.transcript.borrow_mut().radar.push(observations.to_vec());
    }

    fn shot_target(&mut self) -> Option<Position> {
        self.shot
    }

    fn move_request(&mut self) -> MoveRequest {
        self.movement
    }
}

/// Quiet, seeded config
pub fn test_config() -> ArenaConfig {
    ArenaConfig {
        watch_live: false,
        seed: Some(1234),
        ..ArenaConfig::default()
    }
}

/// Terrain-free grid
pub fn open_grid(rows: i32, cols: i32) -> Grid {
    Grid::new(rows, cols).expect("grid")
}

/// Fresh scratch directory under the system temp dir
pub fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("robot-arena-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("scratch dir");
    dir
}
