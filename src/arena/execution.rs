//! Arena state and the round loop
//!
//! An arena moves through Setup, Running and GameOver. Robots are added and
//! placed during setup. Each round every live robot, in load order, takes
//! one turn: radar sweep, then either a shot or a move.

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::arena::combat::{self, DamageReport, ShotResult};
use crate::arena::events::{ArenaEventKind, ArenaEventLog, ArenaOutcome};
use crate::arena::grid::{Grid, HazardCounts};
use crate::arena::movement::{self, MoveHalt, MoveRefusal, MovementResult};
use crate::arena::radar;
use crate::arena::roster::{self, symbol_for_index, RobotEntry, ROBOT_SYMBOLS};
use crate::core::config::ArenaConfig;
use crate::core::error::{ArenaError, Result};
use crate::core::types::{Position, Round};
use crate::loader::{LoadReport, LoadedRobot, RobotLoader};
use crate::robot::Robot;

/// Arena lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaPhase {
    Setup,
    Running,
    GameOver,
}

pub struct Arena {
    config: ArenaConfig,
    grid: Grid,
    robots: Vec<RobotEntry>,
    rng: ChaCha8Rng,
    seed: u64,
    round: Round,
    phase: ArenaPhase,
    outcome: Option<ArenaOutcome>,
}

impl Arena {
    /// Validate `config`, build the grid and scatter terrain
    pub fn new(config: ArenaConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut grid = Grid::new(config.rows, config.cols)?;
        grid.scatter_hazards(HazardCounts::from(&config), &mut rng);

        tracing::info!(
            rows = config.rows,
            cols = config.cols,
            hazards = config.hazard_count(),
            seed,
            "arena created"
        );

        Ok(Self::assemble(config, grid, rng, seed))
    }

    /// Use a prepared grid instead of scattering terrain. The grid's size
    /// overrides `config.rows`/`config.cols`.
    pub fn from_grid(grid: Grid, mut config: ArenaConfig) -> Self {
        config.rows = grid.rows();
        config.cols = grid.cols();
        let seed = config.seed.unwrap_or_else(rand::random);
        let rng = ChaCha8Rng::seed_from_u64(seed);
        Self::assemble(config, grid, rng, seed)
    }

    fn assemble(config: ArenaConfig, grid: Grid, rng: ChaCha8Rng, seed: u64) -> Self {
        Self {
            config,
            grid,
            robots: Vec::new(),
            rng,
            seed,
            round: 0,
            phase: ArenaPhase::Setup,
            outcome: None,
        }
    }

    // === ACCESSORS ===

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn robots(&self) -> &[RobotEntry] {
        &self.robots
    }

    pub fn robot(&self, index: usize) -> Option<&RobotEntry> {
        self.robots.get(index)
    }

    /// Rounds completed so far
    pub fn round(&self) -> Round {
        self.round
    }

    pub fn phase(&self) -> ArenaPhase {
        self.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn outcome(&self) -> Option<&ArenaOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == ArenaPhase::GameOver
    }

    pub fn alive_count(&self) -> usize {
        roster::alive_count(&self.robots)
    }

    // === SETUP ===

    /// Add an in-process robot. Returns its roster index.
    pub fn add_robot(&mut self, robot: Box<dyn Robot>) -> Result<usize> {
        self.register(robot, None)
    }

    /// Add a robot loaded from a shared library, keeping the library alive
    /// for as long as the robot is.
    pub fn add_loaded(&mut self, loaded: LoadedRobot) -> Result<usize> {
        let LoadedRobot { robot, library, .. } = loaded;
        self.register(robot, Some(library))
    }

    fn register(&mut self, mut robot: Box<dyn Robot>, module: Option<libloading::Library>) -> Result<usize> {
        if self.phase != ArenaPhase::Setup {
            return Err(ArenaError::NotInSetup);
        }

        robot.bind_boundaries(self.grid.rows(), self.grid.cols());

        let index = self.robots.len();
        let symbol = symbol_for_index(index);
        if index == ROBOT_SYMBOLS.len() {
            tracing::warn!("more than {} robots, board symbols will repeat", ROBOT_SYMBOLS.len());
        }

        let entry = RobotEntry::new(robot, module, symbol);
        tracing::info!(robot = %entry.name, %symbol, index, dynamic = entry.is_dynamic(), "robot joined");
        self.robots.push(entry);
        Ok(index)
    }

    /// Discover, compile and load robots per `config.loader`, adding every
    /// one that loads. Failures are in the returned report.
    pub fn load_robots(&mut self) -> Result<LoadReport> {
        if self.phase != ArenaPhase::Setup {
            return Err(ArenaError::NotInSetup);
        }

        let loader = RobotLoader::new(self.config.loader.clone());
        let mut report = loader.load_all();

        for loaded in std::mem::take(&mut report.loaded) {
            self.add_loaded(loaded)?;
        }

        tracing::info!(
            loaded = self.robots.len(),
            failed = report.failures.len(),
            "robot loading finished"
        );
        Ok(report)
    }

    /// Put one robot on a chosen cell
    pub fn place_robot(&mut self, index: usize, pos: Position) -> Result<()> {
        if self.phase != ArenaPhase::Setup {
            return Err(ArenaError::NotInSetup);
        }
        if index >= self.robots.len() {
            return Err(ArenaError::UnknownRobot(index));
        }
        if !roster::is_free_cell(&self.grid, &self.robots, pos, index) {
            return Err(ArenaError::CellOccupied(pos));
        }
        self.robots[index].relocate(pos);
        Ok(())
    }

    /// Put every robot on a distinct random empty cell
    pub fn place_robots_randomly(&mut self) -> Result<()> {
        if self.phase != ArenaPhase::Setup {
            return Err(ArenaError::NotInSetup);
        }
        roster::place_randomly(&self.grid, &mut self.robots, &mut self.rng)
    }

    /// Leave setup. An arena with fewer than two robots, or a zero round
    /// cap, is over immediately.
    pub fn start(&mut self) -> ArenaEventLog {
        let mut log = ArenaEventLog::new();
        if self.phase != ArenaPhase::Setup {
            return log;
        }

        self.phase = ArenaPhase::Running;
        tracing::info!(robots = self.robots.len(), max_rounds = self.config.max_rounds, "battle started");

        if self.game_over() {
            self.finish(&mut log);
        }
        log
    }

    // === ROUNDS ===

    fn game_over(&self) -> bool {
        self.alive_count() <= 1 || self.round >= self.config.max_rounds
    }

    /// Play one round. Starts the arena if still in setup; does nothing
    /// once the game is over.
    pub fn run_round(&mut self) -> ArenaEventLog {
        let mut log = if self.phase == ArenaPhase::Setup {
            self.start()
        } else {
            ArenaEventLog::new()
        };
        if self.phase != ArenaPhase::Running {
            return log;
        }

        for index in 0..self.robots.len() {
            if !self.robots[index].is_alive() {
                continue;
            }
            self.take_turn(index, &mut log);
        }

        self.round += 1;
        tracing::debug!(round = self.round, alive = self.alive_count(), "round complete");

        if self.game_over() {
            self.finish(&mut log);
        }
        log
    }

    /// Play until the game ends, pausing between rounds when watching live
    pub fn run(&mut self) -> ArenaOutcome {
        self.start();
        while self.phase == ArenaPhase::Running {
            self.run_round();
            self.pause_between_rounds();
        }
        self.outcome.clone().unwrap_or(ArenaOutcome::Draw)
    }

    /// Sleep for `round_delay_ms` if `watch_live` is set and the game goes on
    pub fn pause_between_rounds(&self) {
        if self.config.watch_live && self.phase == ArenaPhase::Running {
            std::thread::sleep(Duration::from_millis(self.config.round_delay_ms));
        }
    }

    fn take_turn(&mut self, index: usize, log: &mut ArenaEventLog) {
        let round = self.round;
        let actor = Some(index);

        let status = self.robots[index].robot().status();
        log.push(
            round,
            actor,
            ArenaEventKind::TurnStarted { status: status.clone() },
            format!("{} {} begins turn. {}", self.robots[index].name, self.robots[index].symbol, status),
        );

        // Sense
        let code = self.robots[index].robot_mut().radar_direction();
        let observations = radar::sweep(&self.grid, &self.robots, index, code);
        log.push(
            round,
            actor,
            ArenaEventKind::RadarSwept { code, observations: observations.len() },
            format!("{} sweeps radar {} ({} contacts)", self.robots[index].name, code, observations.len()),
        );
        self.robots[index].robot_mut().receive_radar(&observations);

        // Act
        if let Some(target) = self.robots[index].robot_mut().shot_target() {
            let result = combat::resolve_shot(&self.grid, &mut self.robots, index, target, &mut self.rng);
            narrate_shot(&self.robots, round, index, target, &result, log);
        } else {
            let request = self.robots[index].robot_mut().move_request();
            let result = movement::resolve_move(&self.grid, &mut self.robots, index, request, &mut self.rng);
            narrate_move(&self.robots, round, index, &result, log);
        }
    }

    fn finish(&mut self, log: &mut ArenaEventLog) {
        let outcome = self.compute_outcome();
        self.phase = ArenaPhase::GameOver;
        tracing::info!(round = self.round, %outcome, "game over");
        log.push(
            self.round,
            None,
            ArenaEventKind::GameOver { outcome: outcome.clone() },
            format!("Game over after {} rounds. {}", self.round, outcome),
        );
        self.outcome = Some(outcome);
    }

    /// The one robot left standing wins; anything else is a draw
    pub fn compute_outcome(&self) -> ArenaOutcome {
        let mut alive = self.robots.iter().enumerate().filter(|(_, e)| e.is_alive());
        match (alive.next(), alive.next()) {
            (Some((index, entry)), None) => ArenaOutcome::Winner {
                index,
                name: entry.name.clone(),
                symbol: entry.symbol,
            },
            _ => ArenaOutcome::Draw,
        }
    }
}

fn narrate_damage(roster: &[RobotEntry], round: Round, actor: usize, hits: &[DamageReport], log: &mut ArenaEventLog) {
    for hit in hits {
        let name = &roster[hit.target].name;
        log.push(
            round,
            Some(actor),
            ArenaEventKind::Damaged {
                target: hit.target,
                raw: hit.raw,
                dealt: hit.dealt,
                health: hit.health,
            },
            format!("{} takes {} damage. Health: {}", name, hit.dealt, hit.health),
        );
        if hit.eliminated {
            log.push(
                round,
                Some(actor),
                ArenaEventKind::Eliminated { target: hit.target },
                format!("{} is out!", name),
            );
        }
    }
}

fn narrate_shot(
    roster: &[RobotEntry],
    round: Round,
    actor: usize,
    target: Position,
    result: &ShotResult,
    log: &mut ArenaEventLog,
) {
    let name = &roster[actor].name;
    match result {
        ShotResult::Wasted(reason) => {
            log.push(
                round,
                Some(actor),
                ArenaEventKind::ShotWasted { reason: *reason },
                format!("{} {}", name, reason.describe()),
            );
        }
        ShotResult::Fired { weapon, direction, hits } => {
            let aim = match direction {
                Some(d) => format!("{} toward {}", d, target),
                None => format!("at {}", target),
            };
            log.push(
                round,
                Some(actor),
                ArenaEventKind::Shot {
                    weapon: *weapon,
                    direction: *direction,
                    target,
                },
                format!("{} fires {} {}", name, weapon, aim),
            );
            narrate_damage(roster, round, actor, hits, log);
        }
    }
}

fn narrate_move(roster: &[RobotEntry], round: Round, actor: usize, result: &MovementResult, log: &mut ArenaEventLog) {
    let name = &roster[actor].name;
    match result {
        MovementResult::Refused(MoveRefusal::Stuck) => {
            log.push(round, Some(actor), ArenaEventKind::Stuck, format!("{} is stuck and cannot move", name));
        }
        MovementResult::Refused(MoveRefusal::NotMoving) | MovementResult::Refused(MoveRefusal::Down) => {
            log.push(round, Some(actor), ArenaEventKind::NotMoving, format!("{} is not moving", name));
        }
        MovementResult::Stepped { from, to, halt, damage, .. } => {
            match halt {
                MoveHalt::Pit => log.push(
                    round,
                    Some(actor),
                    ArenaEventKind::FellIntoPit { at: *to },
                    format!("{} falls into a pit at {}", name, to),
                ),
                MoveHalt::FlameTrap => log.push(
                    round,
                    Some(actor),
                    ArenaEventKind::Scorched { at: *to },
                    format!("{} runs into a flame trap at {}", name, to),
                ),
                _ => {}
            }
            if let Some(burn) = damage {
                narrate_damage(roster, round, actor, std::slice::from_ref(burn), log);
            }

            if from != to {
                log.push(
                    round,
                    Some(actor),
                    ArenaEventKind::Moved { from: *from, to: *to },
                    format!("{} moves from {} to {}", name, from, to),
                );
            } else {
                log.push(
                    round,
                    Some(actor),
                    ArenaEventKind::Stayed { at: *to },
                    format!("{} stays at {}", name, to),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::grid::Terrain;
    use crate::arena::testing::Script;
    use crate::core::types::Direction;
    use crate::robot::{MoveRequest, WeaponKind};

    fn config() -> ArenaConfig {
        ArenaConfig {
            watch_live: false,
            seed: Some(42),
            ..ArenaConfig::default()
        }
    }

    fn open_arena() -> Arena {
        Arena::from_grid(Grid::new(20, 20).unwrap(), config())
    }

    #[test]
    fn test_new_scatters_configured_hazards() {
        let arena = Arena::new(config()).unwrap();
        let hazards = arena
            .grid()
            .positions()
            .filter(|&p| arena.grid().terrain(p) != Some(Terrain::Empty))
            .count();
        assert_eq!(hazards, 11);
        assert_eq!(arena.phase(), ArenaPhase::Setup);
        assert_eq!(arena.seed(), 42);
    }

    #[test]
    fn test_same_seed_same_terrain() {
        let a = Arena::new(config()).unwrap();
        let b = Arena::new(config()).unwrap();
        for pos in a.grid().positions() {
            assert_eq!(a.grid().terrain(pos), b.grid().terrain(pos));
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Arena::new(ArenaConfig { rows: 5, ..config() });
        assert!(matches!(result, Err(ArenaError::GridTooSmall { .. })));
    }

    #[test]
    fn test_symbols_follow_load_order() {
        let mut arena = open_arena();
        for _ in 0..10 {
            arena.add_robot(Box::new(Script::idle())).unwrap();
        }
        let symbols: Vec<char> = arena.robots().iter().map(|e| e.symbol).collect();
        assert_eq!(&symbols[..3], &['!', '@', '#']);
        assert_eq!(symbols[9], '!');
        assert_eq!(arena.robots()[0].robot().base().boundaries(), (20, 20));
    }

    #[test]
    fn test_place_robot_rejects_taken_cells() {
        let mut grid = Grid::new(20, 20).unwrap();
        grid.set_terrain(Position::new(3, 3), Terrain::Pit);
        let mut arena = Arena::from_grid(grid, config());
        arena.add_robot(Box::new(Script::idle())).unwrap();
        arena.add_robot(Box::new(Script::idle())).unwrap();

        arena.place_robot(0, Position::new(1, 1)).unwrap();
        assert!(matches!(arena.place_robot(1, Position::new(1, 1)), Err(ArenaError::CellOccupied(_))));
        assert!(matches!(arena.place_robot(1, Position::new(3, 3)), Err(ArenaError::CellOccupied(_))));
        assert!(matches!(arena.place_robot(1, Position::new(20, 0)), Err(ArenaError::CellOccupied(_))));
        assert!(matches!(arena.place_robot(7, Position::new(2, 2)), Err(ArenaError::UnknownRobot(7))));
    }

    #[test]
    fn test_setup_closes_after_start() {
        let mut arena = open_arena();
        arena.add_robot(Box::new(Script::idle())).unwrap();
        arena.add_robot(Box::new(Script::idle())).unwrap();
        arena.start();

        assert_eq!(arena.phase(), ArenaPhase::Running);
        assert!(matches!(arena.add_robot(Box::new(Script::idle())), Err(ArenaError::NotInSetup)));
        assert!(matches!(arena.place_robot(0, Position::new(0, 0)), Err(ArenaError::NotInSetup)));
    }

    #[test]
    fn test_lone_robot_wins_at_start() {
        let mut arena = open_arena();
        arena.add_robot(Box::new(Script::idle())).unwrap();
        let log = arena.start();

        assert!(arena.is_finished());
        assert_eq!(arena.outcome().and_then(|o| o.winner()), Some(0));
        assert!(log.kinds().any(|k| matches!(k, ArenaEventKind::GameOver { .. })));
    }

    #[test]
    fn test_empty_arena_is_a_draw() {
        let mut arena = open_arena();
        assert_eq!(arena.run(), ArenaOutcome::Draw);
    }

    #[test]
    fn test_round_narrates_each_turn() {
        let mut arena = open_arena();
        arena.add_robot(Box::new(Script::idle().moving(MoveRequest::toward(Direction::South, 2)))).unwrap();
        arena.add_robot(Box::new(Script::idle())).unwrap();
        arena.place_robot(0, Position::new(1, 1)).unwrap();
        arena.place_robot(1, Position::new(10, 10)).unwrap();

        let log = arena.run_round();
        assert_eq!(arena.round(), 1);
        assert_eq!(arena.robots()[0].position, Position::new(3, 1));

        let first: Vec<_> = log.for_actor(0).map(|e| e.kind.clone()).collect();
        assert!(matches!(first[0], ArenaEventKind::TurnStarted { .. }));
        assert!(matches!(first[1], ArenaEventKind::RadarSwept { code: 0, .. }));
        assert!(matches!(first[2], ArenaEventKind::Moved { .. }));

        let second: Vec<_> = log.for_actor(1).map(|e| e.kind.clone()).collect();
        assert!(matches!(second.last(), Some(ArenaEventKind::NotMoving)));
    }

    #[test]
    fn test_shot_eliminates_and_ends_game() {
        let mut arena = open_arena();
        arena
            .add_robot(Box::new(Script::new(WeaponKind::Hammer).shooting(Position::new(5, 6))))
            .unwrap();
        arena.add_robot(Box::new(Script::idle())).unwrap();
        arena.place_robot(0, Position::new(5, 5)).unwrap();
        arena.place_robot(1, Position::new(5, 6)).unwrap();

        // Hammer does 50-60 against zero armor: two hits finish it
        let outcome = arena.run();
        assert_eq!(outcome.winner(), Some(0));
        assert_eq!(arena.round(), 2);
        assert!(!arena.robots()[1].is_alive());
    }

    #[test]
    fn test_round_cap_draws() {
        let mut arena = Arena::from_grid(Grid::new(20, 20).unwrap(), ArenaConfig { max_rounds: 3, ..config() });
        arena.add_robot(Box::new(Script::idle())).unwrap();
        arena.add_robot(Box::new(Script::idle())).unwrap();
        arena.place_robots_randomly().unwrap();

        assert_eq!(arena.run(), ArenaOutcome::Draw);
        assert_eq!(arena.round(), 3);
        assert!(arena.run_round().is_empty());
    }
}
