//! End-to-end arena scenarios

mod common;

use std::collections::HashSet;

use common::{open_grid, test_config, Scripted};
use robot_arena::arena::{Arena, ArenaEventKind, ArenaOutcome, ArenaPhase, Terrain, WastedShot};
use robot_arena::core::config::ArenaConfig;
use robot_arena::core::error::ArenaError;
use robot_arena::prelude::*;

#[test]
fn test_railgun_fires_east_along_row() {
    let mut arena = Arena::from_grid(open_grid(20, 20), test_config());
    let gunner = arena
        .add_robot(Box::new(Scripted::idle("Gunner").shooting(Position::new(5, 10))))
        .unwrap();
    let target = arena.add_robot(Box::new(Scripted::idle("Target"))).unwrap();
    let bystander = arena.add_robot(Box::new(Scripted::idle("Bystander"))).unwrap();
    arena.place_robot(gunner, Position::new(5, 5)).unwrap();
    arena.place_robot(target, Position::new(5, 10)).unwrap();
    arena.place_robot(bystander, Position::new(6, 10)).unwrap();

    let log = arena.run_round();

    let shot = log
        .for_actor(gunner)
        .find_map(|e| match &e.kind {
            ArenaEventKind::Shot { direction, weapon, .. } => Some((*direction, *weapon)),
            _ => None,
        })
        .expect("gunner should fire");
    assert_eq!(shot, (Some(Direction::East), WeaponKind::Railgun));

    let health = arena.robots()[target].robot().health();
    assert!((80..=90).contains(&health), "railgun does 10-20, got health {}", health);
    assert_eq!(arena.robots()[bystander].robot().health(), 100);
    assert_eq!(arena.robots()[gunner].robot().health(), 100);
}

#[test]
fn test_mound_stops_move_after_two_cells() {
    let mut grid = open_grid(20, 20);
    grid.set_terrain(Position::new(5, 8), Terrain::Mound);
    let mut arena = Arena::from_grid(grid, test_config());

    let runner = arena
        .add_robot(Box::new(Scripted::new("Runner", 3, 0, WeaponKind::Railgun).moving(Direction::East, 5)))
        .unwrap();
    let other = arena.add_robot(Box::new(Scripted::idle("Other"))).unwrap();
    arena.place_robot(runner, Position::new(5, 5)).unwrap();
    arena.place_robot(other, Position::new(15, 15)).unwrap();

    arena.run_round();

    assert_eq!(arena.robots()[runner].position, Position::new(5, 7));
    assert_eq!(arena.robots()[runner].robot().base().position(), Position::new(5, 7));
}

#[test]
fn test_round_cap_is_a_draw() {
    let config = ArenaConfig {
        max_rounds: 5,
        ..test_config()
    };
    let mut arena = Arena::from_grid(open_grid(12, 12), config);
    arena.add_robot(Box::new(Scripted::idle("A"))).unwrap();
    arena.add_robot(Box::new(Scripted::idle("B"))).unwrap();
    arena.place_robots_randomly().unwrap();

    let outcome = arena.run();

    assert_eq!(outcome, ArenaOutcome::Draw);
    assert_eq!(arena.round(), 5);
    assert_eq!(arena.alive_count(), 2);
    assert_eq!(arena.phase(), ArenaPhase::GameOver);
}

#[test]
fn test_empty_grenade_pouch_wastes_the_shot() {
    let mut arena = Arena::from_grid(open_grid(20, 20), test_config());
    let lobber = arena
        .add_robot(Box::new(
            Scripted::new("Lobber", 3, 0, WeaponKind::Grenade).shooting(Position::new(15, 15)),
        ))
        .unwrap();
    let other = arena.add_robot(Box::new(Scripted::idle("Other"))).unwrap();
    arena.place_robot(lobber, Position::new(2, 2)).unwrap();
    arena.place_robot(other, Position::new(0, 19)).unwrap();

    for _ in 0..10 {
        arena.run_round();
    }
    assert_eq!(arena.robots()[lobber].robot().grenades(), 0);

    let log = arena.run_round();
    assert!(log
        .kinds()
        .any(|k| *k == ArenaEventKind::ShotWasted { reason: WastedShot::OutOfGrenades }));
    assert!(!log.kinds().any(|k| matches!(k, ArenaEventKind::Damaged { .. })));
    assert_eq!(arena.robots()[lobber].robot().grenades(), 0);
    assert_eq!(arena.robots()[other].robot().health(), 100);
}

#[test]
fn test_last_robot_standing_wins() {
    let mut arena = Arena::from_grid(open_grid(15, 15), test_config());
    let smasher = arena
        .add_robot(Box::new(
            Scripted::new("Smasher", 3, 0, WeaponKind::Hammer).shooting(Position::new(7, 8)),
        ))
        .unwrap();
    let victim = arena.add_robot(Box::new(Scripted::idle("Victim"))).unwrap();
    arena.place_robot(smasher, Position::new(7, 7)).unwrap();
    arena.place_robot(victim, Position::new(7, 8)).unwrap();

    let outcome = arena.run();

    assert_eq!(
        outcome,
        ArenaOutcome::Winner {
            index: smasher,
            name: "Smasher".into(),
            symbol: '!',
        }
    );
    assert!(!arena.robots()[victim].is_alive());
    assert_eq!(arena.robots()[victim].glyph(), 'X');
}

#[test]
fn test_eliminated_robot_never_acts_or_takes_damage() {
    let mut arena = Arena::from_grid(open_grid(15, 15), test_config());
    let smasher = arena
        .add_robot(Box::new(
            Scripted::new("Smasher", 3, 0, WeaponKind::Hammer).shooting(Position::new(3, 4)),
        ))
        .unwrap();
    let victim_robot = Scripted::idle("Victim");
    let victim_log = victim_robot.transcript();
    let victim = arena.add_robot(Box::new(victim_robot)).unwrap();
    let watcher = arena.add_robot(Box::new(Scripted::idle("Watcher"))).unwrap();

    arena.place_robot(smasher, Position::new(3, 3)).unwrap();
    arena.place_robot(victim, Position::new(3, 4)).unwrap();
    arena.place_robot(watcher, Position::new(12, 12)).unwrap();

    arena.run_round();
    arena.run_round();
    assert!(!arena.robots()[victim].is_alive());
    let turns = victim_log.borrow().turns;
    let health = arena.robots()[victim].robot().health();
    assert_eq!(turns, 1);

    for _ in 0..3 {
        let log = arena.run_round();
        assert!(log.for_actor(victim).next().is_none());
        assert!(!log
            .kinds()
            .any(|k| matches!(k, ArenaEventKind::Damaged { target, .. } if *target == victim)));
    }
    assert_eq!(victim_log.borrow().turns, turns);
    assert_eq!(arena.robots()[victim].robot().health(), health);
    assert!(!arena.is_finished());
}

#[test]
fn test_radar_reports_enemies_to_the_robot() {
    let mut arena = Arena::from_grid(open_grid(20, 20), test_config());
    let looker = Scripted::idle("Looker").radar(Direction::East.code());
    let looker_log = looker.transcript();
    let a = arena.add_robot(Box::new(looker)).unwrap();
    let b = arena.add_robot(Box::new(Scripted::idle("Far"))).unwrap();
    arena.place_robot(a, Position::new(10, 2)).unwrap();
    arena.place_robot(b, Position::new(11, 17)).unwrap();

    arena.run_round();

    let transcript = looker_log.borrow();
    let seen = &transcript.radar[0];
    assert!(seen
        .iter()
        .any(|o| o.marker == Marker::Robot && o.position == Position::new(11, 17)));
    assert!(seen.iter().all(|o| o.position.col > 2 && (9..=11).contains(&o.position.row)));
}

#[test]
fn test_random_placement_never_overlaps() {
    for seed in 0..20 {
        let config = ArenaConfig {
            rows: 10,
            cols: 10,
            mounds: 30,
            pits: 20,
            flame_traps: 20,
            seed: Some(seed),
            ..test_config()
        };
        let mut arena = Arena::new(config).unwrap();
        for i in 0..9 {
            arena.add_robot(Box::new(Scripted::idle(&format!("R{}", i)))).unwrap();
        }
        arena.place_robots_randomly().unwrap();

        let mut seen = HashSet::new();
        for entry in arena.robots() {
            assert_eq!(arena.grid().terrain(entry.position), Some(Terrain::Empty));
            assert!(seen.insert(entry.position), "overlap at {}", entry.position);
        }
    }
}

#[test]
fn test_full_arena_rejected_before_placement() {
    let config = ArenaConfig {
        rows: 10,
        cols: 10,
        mounds: 99,
        pits: 0,
        flame_traps: 0,
        ..test_config()
    };
    let mut arena = Arena::new(config).unwrap();
    arena.add_robot(Box::new(Scripted::idle("A"))).unwrap();
    arena.add_robot(Box::new(Scripted::idle("B"))).unwrap();

    assert!(matches!(
        arena.place_robots_randomly(),
        Err(ArenaError::ArenaFull { robots: 2, free: 1 })
    ));
}

#[test]
fn test_grid_smaller_than_ten_rejected() {
    for (rows, cols) in [(9, 20), (20, 9), (0, 0)] {
        let config = ArenaConfig { rows, cols, ..test_config() };
        assert!(matches!(Arena::new(config), Err(ArenaError::GridTooSmall { .. })));
    }
    assert!(Arena::new(ArenaConfig { rows: 10, cols: 10, ..test_config() }).is_ok());
}

#[test]
fn test_same_seed_same_battle() {
    let play = || {
        let mut arena = Arena::new(ArenaConfig { max_rounds: 30, ..test_config() }).unwrap();
        arena
            .add_robot(Box::new(Scripted::new("North", 3, 1, WeaponKind::Flamethrower).moving(Direction::North, 2)))
            .unwrap();
        arena
            .add_robot(Box::new(Scripted::new("South", 2, 3, WeaponKind::Railgun).moving(Direction::South, 2)))
            .unwrap();
        arena.place_robots_randomly().unwrap();
        arena.run();
        arena
            .robots()
            .iter()
            .map(|e| (e.position, e.robot().health()))
            .collect::<Vec<_>>()
    };
    assert_eq!(play(), play());
}
