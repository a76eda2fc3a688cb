//! Robot Arena - Entry Point
//!
//! Loads the robots found in the robots directory, drops them onto a fresh
//! arena and plays rounds until one is left standing or the round cap hits.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use robot_arena::arena::{render_board, Arena, ArenaOutcome};
use robot_arena::core::config::ArenaConfig;
use robot_arena::core::error::Result;

/// Turn-based robot combat on a hazard-strewn grid
#[derive(Parser, Debug)]
#[command(name = "robot-arena")]
#[command(about = "Load robot_*.rs sources and fight them out on a grid")]
struct Args {
    /// Arena config file (TOML). Defaults are used if it does not exist.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Directory scanned for robot sources
    #[arg(long)]
    robots_dir: Option<PathBuf>,

    #[arg(long)]
    rows: Option<i32>,

    #[arg(long)]
    cols: Option<i32>,

    /// Rounds before the game is called a draw
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Run rounds back to back without pausing
    #[arg(long)]
    no_watch: bool,

    /// Output format for the final result: text or json
    #[arg(long, default_value = "text")]
    format: String,
}

impl Args {
    /// Command-line flags win over the config file
    fn apply(&self, config: &mut ArenaConfig) {
        if let Some(dir) = &self.robots_dir {
            config.loader.robots_dir = dir.clone();
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(max_rounds) = self.max_rounds {
            config.max_rounds = max_rounds;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.no_watch {
            config.watch_live = false;
        }
    }
}

/// JSON output structure
#[derive(Serialize)]
struct ArenaResult {
    outcome: ArenaOutcome,
    rounds: u32,
    survivors: Vec<String>,
    skipped: Vec<String>,
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("robot_arena=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = ArenaConfig::load(&args.config)?;
    args.apply(&mut config);

    let mut arena = Arena::new(config)?;
    let report = arena.load_robots()?;
    arena.place_robots_randomly()?;

    println!("\n=== ROBOT ARENA ===");
    for entry in arena.robots() {
        println!("  {} {}  {}", entry.symbol, entry.name, entry.robot().status());
    }
    for failure in &report.failures {
        println!("  skipped {}: {}", failure.candidate.display(), failure.error);
    }
    println!();

    let opening = arena.start();
    for event in opening.iter() {
        println!("{}", event.description);
    }

    while !arena.is_finished() {
        println!("{}", render_board(&arena));
        let log = arena.run_round();
        for event in log.iter() {
            println!("{}", event.description);
        }
        println!();
        arena.pause_between_rounds();
    }

    let outcome = arena.outcome().cloned().unwrap_or(ArenaOutcome::Draw);
    let result = ArenaResult {
        outcome,
        rounds: arena.round(),
        survivors: arena
            .robots()
            .iter()
            .filter(|e| e.is_alive())
            .map(|e| e.name.clone())
            .collect(),
        skipped: report
            .failures
            .iter()
            .map(|f| f.candidate.display().to_string())
            .collect(),
        seed: arena.seed(),
    };

    match args.format.as_str() {
        "json" => print_json(&result),
        "text" => print_text(&result),
        _ => {
            eprintln!("Unknown format '{}', defaulting to text", args.format);
            print_text(&result);
        }
    }

    Ok(())
}

fn print_text(result: &ArenaResult) {
    println!("Arena Result");
    println!("============");
    println!("{}", result.outcome);
    println!("Rounds: {}", result.rounds);
    println!("Survivors: {}", result.survivors.join(", "));
    if !result.skipped.is_empty() {
        println!("Skipped: {}", result.skipped.join(", "));
    }
    println!("Seed: {}", result.seed);
}

fn print_json(result: &ArenaResult) {
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!(error = %e, "failed to serialize result"),
    }
}
