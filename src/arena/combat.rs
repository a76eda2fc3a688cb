//! Weapon fire and damage
//!
//! A shot picks a target cell. Every weapon except the grenade only uses the
//! target to pick one of the eight octants; the grenade lands on the target
//! itself. Damage rolls go through the arena's seeded RNG.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arena::grid::Grid;
use crate::arena::roster::RobotEntry;
use crate::core::types::{Direction, Position};
use crate::robot::WeaponKind;

/// How many cells the flamethrower band reaches
pub const FLAMETHROWER_REACH: i32 = 4;
/// Armor points convert to this many percent of mitigation...
pub const MITIGATION_PER_ARMOR: i32 = 10;
/// ...up to this cap
pub const MAX_MITIGATION: i32 = 90;

/// One robot taking one hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReport {
    pub target: usize,
    pub raw: i32,
    pub dealt: i32,
    pub health: i32,
    pub eliminated: bool,
}

/// Why a shot had no effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WastedShot {
    /// Target is the shooter's own cell
    NoDirection,
    OutOfGrenades,
    /// Grenade thrown off the board (the grenade is still spent)
    OffBoard,
    ShooterDown,
}

impl WastedShot {
    pub fn describe(&self) -> &'static str {
        match self {
            WastedShot::NoDirection => "has no direction to fire in",
            WastedShot::OutOfGrenades => "is out of grenades",
            WastedShot::OffBoard => "throws a grenade off the board",
            WastedShot::ShooterDown => "is down and cannot fire",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShotResult {
    Wasted(WastedShot),
    Fired {
        weapon: WeaponKind,
        /// `None` for grenades, which land on the target instead
        direction: Option<Direction>,
        hits: Vec<DamageReport>,
    },
}

impl ShotResult {
    pub fn hits(&self) -> &[DamageReport] {
        match self {
            ShotResult::Fired { hits, .. } => hits,
            ShotResult::Wasted(_) => &[],
        }
    }
}

/// Percentage of damage absorbed by armor
pub fn mitigation_percent(armor: i32) -> i32 {
    (armor.max(0) * MITIGATION_PER_ARMOR).min(MAX_MITIGATION)
}

/// `floor(raw * (1 - mitigation))`, in integer arithmetic
pub fn mitigated_damage(raw: i32, armor: i32) -> i32 {
    raw.max(0) * (100 - mitigation_percent(armor)) / 100
}

pub fn roll_damage<R: Rng>(weapon: WeaponKind, rng: &mut R) -> i32 {
    let (min, max) = weapon.damage_range();
    rng.gen_range(min..=max)
}

/// Hit one robot with one weapon.
///
/// Downed robots are left alone. Armor soaks part of the roll and then wears
/// down by one point.
pub fn apply_weapon_damage<R: Rng>(
    entry: &mut RobotEntry,
    index: usize,
    weapon: WeaponKind,
    rng: &mut R,
) -> Option<DamageReport> {
    if !entry.is_alive() {
        return None;
    }

    let raw = roll_damage(weapon, rng);
    let armor = entry.robot().armor();
    let dealt = mitigated_damage(raw, armor);

    if armor > 0 {
        entry.robot_mut().reduce_armor(1);
    }

    let health = entry.robot_mut().apply_damage(dealt);
    let eliminated = health <= 0;
    if eliminated {
        entry.eliminate();
    }

    Some(DamageReport {
        target: index,
        raw,
        dealt,
        health,
        eliminated,
    })
}

/// Cells a shot at `target` covers, nearest first, plus the octant it was
/// fired in (`None` for grenades, which land on the target itself).
pub fn strike_area(
    grid: &Grid,
    weapon: WeaponKind,
    origin: Position,
    target: Position,
) -> Result<(Option<Direction>, Vec<Position>), WastedShot> {
    if weapon == WeaponKind::Grenade {
        if !grid.in_bounds(target) {
            return Err(WastedShot::OffBoard);
        }
        return Ok((None, blast_cells(grid, target)));
    }

    let direction = Direction::from_delta(target.row - origin.row, target.col - origin.col)
        .ok_or(WastedShot::NoDirection)?;
    let mut cells = Vec::new();

    match weapon {
        WeaponKind::Railgun => {
            let mut cur = origin.step(direction, 1);
            while grid.in_bounds(cur) {
                cells.push(cur);
                cur = cur.step(direction, 1);
            }
        }
        WeaponKind::Hammer => {
            let cur = origin.step(direction, 1);
            if grid.in_bounds(cur) {
                cells.push(cur);
            }
        }
        WeaponKind::Flamethrower => {
            cells = flame_band(grid, origin, direction);
        }
        WeaponKind::Grenade => {}
    }

    Ok((Some(direction), cells))
}

/// Flamethrower cone: four cells out, one cell either side
pub fn flame_band(grid: &Grid, origin: Position, direction: Direction) -> Vec<Position> {
    let (pr, pc) = direction.perpendicular();
    let mut cells = Vec::new();
    for k in 1..=FLAMETHROWER_REACH {
        let center = origin.step(direction, k);
        if !grid.in_bounds(center) {
            break;
        }
        cells.push(center);
        cells.extend(
            [center.offset(pr, pc), center.offset(-pr, -pc)]
                .into_iter()
                .filter(|p| grid.in_bounds(*p)),
        );
    }
    cells
}

/// 3x3 grenade blast, clipped to the grid
pub fn blast_cells(grid: &Grid, center: Position) -> Vec<Position> {
    (-1..=1)
        .flat_map(|dr| (-1..=1).map(move |dc| center.offset(dr, dc)))
        .filter(|p| grid.in_bounds(*p))
        .collect()
}

fn damage_cells<R: Rng>(
    roster: &mut [RobotEntry],
    cells: &[Position],
    weapon: WeaponKind,
    rng: &mut R,
) -> Vec<DamageReport> {
    let mut hits = Vec::new();
    for cell in cells {
        for (index, entry) in roster.iter_mut().enumerate() {
            if entry.is_alive() && entry.position == *cell {
                hits.extend(apply_weapon_damage(entry, index, weapon, rng));
            }
        }
    }
    hits
}

/// Resolve `shooter` firing at `target`
pub fn resolve_shot<R: Rng>(
    grid: &Grid,
    roster: &mut [RobotEntry],
    shooter: usize,
    target: Position,
    rng: &mut R,
) -> ShotResult {
    let Some(entry) = roster.get_mut(shooter) else {
        return ShotResult::Wasted(WastedShot::ShooterDown);
    };
    if !entry.is_alive() {
        return ShotResult::Wasted(WastedShot::ShooterDown);
    }

    let weapon = entry.robot().weapon();
    let origin = entry.position;

    if weapon.uses_ordnance() {
        if entry.robot().grenades() <= 0 {
            return ShotResult::Wasted(WastedShot::OutOfGrenades);
        }
        entry.robot_mut().decrement_grenades();
    }

    match strike_area(grid, weapon, origin, target) {
        Ok((direction, cells)) => {
            let hits = damage_cells(roster, &cells, weapon, rng);
            ShotResult::Fired { weapon, direction, hits }
        }
        Err(reason) => ShotResult::Wasted(reason),
    }
}
