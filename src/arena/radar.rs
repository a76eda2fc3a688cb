//! Radar sweeps
//!
//! Code 0 sees the eight neighbouring cells. Codes 1-8 see a 3-wide ray from
//! the robot to the edge of the arena in that octant.

use crate::arena::grid::Grid;
use crate::arena::roster::{live_occupant_at, occupant_at, RobotEntry};
use crate::core::types::{Direction, Position};
use crate::robot::{Marker, RadarObservation};

/// What a cell looks like to radar: a robot hides the terrain under it
pub fn observe_cell(grid: &Grid, roster: &[RobotEntry], pos: Position) -> Option<Marker> {
    let terrain = grid.terrain(pos)?;
    if live_occupant_at(roster, pos).is_some() {
        return Some(Marker::Robot);
    }
    Some(match occupant_at(roster, pos) {
        Some(_) => Marker::Downed,
        None => terrain.marker(),
    })
}

/// Run one sweep for `observer`.
///
/// Out-of-range codes and downed observers see nothing.
pub fn sweep(grid: &Grid, roster: &[RobotEntry], observer: usize, code: i32) -> Vec<RadarObservation> {
    let mut results = Vec::new();

    let Some(entry) = roster.get(observer) else {
        return results;
    };
    if !entry.is_alive() {
        return results;
    }
    let origin = entry.position;

    let mut add_cell = |pos: Position| {
        if pos == origin {
            return;
        }
        if let Some(marker) = observe_cell(grid, roster, pos) {
            results.push(RadarObservation::new(marker, pos));
        }
    };

    if code == 0 {
        for dr in -1..=1 {
            for dc in -1..=1 {
                add_cell(origin.offset(dr, dc));
            }
        }
        return results;
    }

    let Some(direction) = Direction::from_code(code) else {
        return results;
    };
    let (pr, pc) = direction.perpendicular();

    let mut cur = origin.step(direction, 1);
    while grid.in_bounds(cur) {
        add_cell(cur);
        add_cell(cur.offset(pr, pc));
        add_cell(cur.offset(-pr, -pc));
        cur = cur.step(direction, 1);
    }

    results
}
