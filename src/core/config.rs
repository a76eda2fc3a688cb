//! Arena configuration
//!
//! Every field has a default, so an empty or missing config file yields the
//! stock 20x20 arena. Values are read from TOML:
//!
//! ```toml
//! rows = 20
//! cols = 20
//! mounds = 5
//! max_rounds = 200
//! watch_live = false
//!
//! [loader]
//! robots_dir = "robots"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{ArenaError, Result};

/// Smallest permitted arena edge
pub const MIN_ARENA_SIZE: i32 = 10;

/// Largest permitted number of cells
pub const MAX_ARENA_CELLS: usize = 1_000_000;

/// Cell count of a `rows` x `cols` arena, checked against both size limits
pub fn checked_cell_count(rows: i32, cols: i32) -> Result<usize> {
    if rows < MIN_ARENA_SIZE || cols < MIN_ARENA_SIZE {
        return Err(ArenaError::GridTooSmall {
            rows,
            cols,
            min: MIN_ARENA_SIZE,
        });
    }

    (rows as usize)
        .checked_mul(cols as usize)
        .filter(|&cells| cells <= MAX_ARENA_CELLS)
        .ok_or(ArenaError::GridTooLarge {
            rows,
            cols,
            max: MAX_ARENA_CELLS,
        })
}

/// Configuration for one arena run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    // === GRID ===
    pub rows: i32,
    pub cols: i32,

    // === TERRAIN ===
    /// Mounds block movement
    pub mounds: usize,
    /// Pits immobilize whoever falls in
    pub pits: usize,
    /// Flame traps scorch whoever walks onto them
    pub flame_traps: usize,

    // === PACING ===
    /// Rounds before the game is called a draw
    pub max_rounds: u32,

    /// Pause between rounds so a human can follow along
    pub watch_live: bool,
    pub round_delay_ms: u64,

    /// Seed for terrain, placement and damage rolls. Random when absent.
    pub seed: Option<u64>,

    pub loader: LoaderConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 20,

            mounds: 5,
            pits: 3,
            flame_traps: 3,

            max_rounds: 200,
            watch_live: true,
            round_delay_ms: 1000,
            seed: None,

            loader: LoaderConfig::default(),
        }
    }
}

impl ArenaConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file.
    ///
    /// A missing file is not an error: the arena falls back to defaults.
    /// A file that exists but does not parse is.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!(path = %path.display(), "loaded arena config");
        Ok(config)
    }

    /// Total terrain cells to scatter
    pub fn hazard_count(&self) -> usize {
        self.mounds + self.pits + self.flame_traps
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let cells = checked_cell_count(self.rows, self.cols)?;

        // Scatter redraws until it finds an empty cell, so leave at least one
        if self.hazard_count() >= cells {
            return Err(ArenaError::TooManyHazards {
                requested: self.hazard_count(),
                cells,
            });
        }

        Ok(())
    }
}

/// Where robot sources live and how they get built
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory scanned for robot sources
    pub robots_dir: PathBuf,
    /// Directory that receives compiled robot libraries
    pub output_dir: PathBuf,

    /// Source files must start with this...
    pub prefix: String,
    /// ...and end with this
    pub suffix: String,

    pub compiler: String,

    /// Compiled arena library robots link against (`librobot_arena.rlib`).
    /// Defaults to the cargo profile directory the running executable was
    /// built into (`target/<profile>/`, also from test binaries in `deps/`).
    /// Set it explicitly for an installed binary, which has no rlib beside it.
    pub contract_lib: Option<PathBuf>,
    /// Directory holding the arena's own dependencies (`target/<profile>/deps`)
    pub dependency_dir: Option<PathBuf>,

    /// Extra arguments appended to every compile command
    pub extra_args: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            robots_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            prefix: "robot_".into(),
            suffix: ".rs".into(),
            compiler: "rustc".into(),
            contract_lib: None,
            dependency_dir: None,
            extra_args: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ArenaConfig::default();
        assert_eq!(config.rows, 20);
        assert_eq!(config.cols, 20);
        assert_eq!(config.max_rounds, 200);
        assert_eq!(config.hazard_count(), 11);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_small_grid_rejected() {
        let config = ArenaConfig { rows: 9, ..Default::default() };
        assert!(matches!(config.validate(), Err(ArenaError::GridTooSmall { .. })));

        let config = ArenaConfig { cols: 3, ..Default::default() };
        assert!(matches!(config.validate(), Err(ArenaError::GridTooSmall { .. })));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let config = ArenaConfig { rows: 50_000, cols: 50_000, ..Default::default() };
        assert!(matches!(config.validate(), Err(ArenaError::GridTooLarge { .. })));

        let config = ArenaConfig { rows: i32::MAX, cols: i32::MAX, ..Default::default() };
        assert!(matches!(config.validate(), Err(ArenaError::GridTooLarge { .. })));

        assert_eq!(checked_cell_count(1000, 1000).unwrap(), MAX_ARENA_CELLS);
        assert!(checked_cell_count(1000, 1001).is_err());
    }

    #[test]
    fn test_hazards_must_fit() {
        let config = ArenaConfig {
            rows: 10,
            cols: 10,
            mounds: 50,
            pits: 30,
            flame_traps: 20,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ArenaError::TooManyHazards { .. })));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ArenaConfig::from_toml_str(
            r#"
            rows = 12
            max_rounds = 50
            seed = 7

            [loader]
            robots_dir = "bots"
            "#,
        )
        .unwrap();

        assert_eq!(config.rows, 12);
        assert_eq!(config.cols, 20);
        assert_eq!(config.max_rounds, 50);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.loader.robots_dir, PathBuf::from("bots"));
        assert_eq!(config.loader.prefix, "robot_");
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let result = ArenaConfig::from_toml_str("rows = \"many\"");
        assert!(matches!(result, Err(ArenaError::Config(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = ArenaConfig::load(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(config.rows, 20);
    }
}
