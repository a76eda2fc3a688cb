//! Robot movement, one cell at a time
//!
//! Mounds and live robots stop a move before the blocked cell. Pits and
//! flame traps are entered and then end the move: a pit for good, a flame
//! trap after one flamethrower-strength burn.

use rand::Rng;

use crate::arena::combat::{apply_weapon_damage, DamageReport};
use crate::arena::grid::{Grid, Terrain};
use crate::arena::roster::{live_occupant_at, RobotEntry};
use crate::core::types::{Direction, Position};
use crate::robot::{MoveRequest, WeaponKind};

/// Why a move never started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRefusal {
    /// The mover is knocked out
    Down,
    /// Stuck in a pit or otherwise without movement
    Stuck,
    /// Direction code outside 1-8, or nothing left after clamping distance
    NotMoving,
}

/// Why stepping stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveHalt {
    /// Covered the full (clamped) distance
    Completed,
    Boundary,
    Mound,
    Robot(usize),
    Pit,
    FlameTrap,
}

/// Result of a movement request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovementResult {
    Refused(MoveRefusal),
    Stepped {
        direction: Direction,
        from: Position,
        to: Position,
        halt: MoveHalt,
        /// Flame trap burn, if any
        damage: Option<DamageReport>,
    },
}

impl MovementResult {
    /// Did the robot end up somewhere else?
    pub fn moved(&self) -> bool {
        matches!(self, MovementResult::Stepped { from, to, .. } if from != to)
    }
}

/// Resolve `mover`'s movement request
pub fn resolve_move<R: Rng>(
    grid: &Grid,
    roster: &mut [RobotEntry],
    mover: usize,
    request: MoveRequest,
    rng: &mut R,
) -> MovementResult {
    let Some(entry) = roster.get(mover) else {
        return MovementResult::Refused(MoveRefusal::Down);
    };
    if !entry.is_alive() {
        return MovementResult::Refused(MoveRefusal::Down);
    }
    if entry.immobilized || entry.robot().move_speed() <= 0 {
        return MovementResult::Refused(MoveRefusal::Stuck);
    }

    let Some(direction) = Direction::from_code(request.direction) else {
        return MovementResult::Refused(MoveRefusal::NotMoving);
    };

    let distance = request.distance.min(entry.robot().move_speed());
    if distance <= 0 {
        return MovementResult::Refused(MoveRefusal::NotMoving);
    }

    let from = entry.position;
    let mut halt = MoveHalt::Completed;
    let mut damage = None;

    for _ in 0..distance {
        let next = roster[mover].position.step(direction, 1);

        let Some(terrain) = grid.terrain(next) else {
            halt = MoveHalt::Boundary;
            break;
        };

        if let Some(other) = live_occupant_at(roster, next).filter(|&i| i != mover) {
            halt = MoveHalt::Robot(other);
            break;
        }

        match terrain {
            Terrain::Mound => {
                halt = MoveHalt::Mound;
                break;
            }
            Terrain::Pit => {
                let entry = &mut roster[mover];
                entry.relocate(next);
                entry.immobilized = true;
                entry.robot_mut().disable_movement();
                halt = MoveHalt::Pit;
                break;
            }
            Terrain::FlameTrap => {
                let entry = &mut roster[mover];
                entry.relocate(next);
                damage = apply_weapon_damage(entry, mover, WeaponKind::Flamethrower, rng);
                halt = MoveHalt::FlameTrap;
                break;
            }
            Terrain::Empty => {
                roster[mover].relocate(next);
            }
        }
    }

    MovementResult::Stepped {
        direction,
        from,
        to: roster[mover].position,
        halt,
        damage,
    }
}
