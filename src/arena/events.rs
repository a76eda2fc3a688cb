//! Turn-by-turn narration
//!
//! Everything that happens in a round is recorded as an `ArenaEvent`. The
//! console transcript is just these events printed in order.

use serde::{Deserialize, Serialize};

use crate::arena::combat::WastedShot;
use crate::core::types::{Direction, Position, Round};
use crate::robot::WeaponKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaOutcome {
    Winner { index: usize, name: String, symbol: char },
    /// Nobody left standing, or the round cap hit with several survivors
    Draw,
}

impl ArenaOutcome {
    pub fn winner(&self) -> Option<usize> {
        match self {
            ArenaOutcome::Winner { index, .. } => Some(*index),
            ArenaOutcome::Draw => None,
        }
    }
}

impl std::fmt::Display for ArenaOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArenaOutcome::Winner { name, symbol, .. } => write!(f, "Winner: {} {}", name, symbol),
            ArenaOutcome::Draw => f.write_str("No winner (draw)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaEventKind {
    TurnStarted { status: String },
    RadarSwept { code: i32, observations: usize },
    Shot { weapon: WeaponKind, direction: Option<Direction>, target: Position },
    ShotWasted { reason: WastedShot },
    Damaged { target: usize, raw: i32, dealt: i32, health: i32 },
    Eliminated { target: usize },
    Moved { from: Position, to: Position },
    Stayed { at: Position },
    Stuck,
    NotMoving,
    FellIntoPit { at: Position },
    Scorched { at: Position },
    GameOver { outcome: ArenaOutcome },
}

/// One narrated happening
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaEvent {
    pub round: Round,
    /// Robot whose turn it was; `None` for arena-level events
    pub actor: Option<usize>,
    pub kind: ArenaEventKind,
    pub description: String,
}

/// Events from a single round
#[derive(Debug, Clone, Default)]
pub struct ArenaEventLog {
    pub events: Vec<ArenaEvent>,
}

impl ArenaEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, round: Round, actor: Option<usize>, kind: ArenaEventKind, description: String) {
        tracing::debug!(round, actor = ?actor, "{}", description);
        self.events.push(ArenaEvent {
            round,
            actor,
            kind,
            description,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArenaEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &ArenaEventKind> {
        self.events.iter().map(|e| &e.kind)
    }

    /// Events for one robot's turn
    pub fn for_actor(&self, actor: usize) -> impl Iterator<Item = &ArenaEvent> {
        self.events.iter().filter(move |e| e.actor == Some(actor))
    }
}
