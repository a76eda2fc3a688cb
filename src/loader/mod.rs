//! Robot discovery, compilation and loading
//!
//! Any file in the robots directory named `<prefix><stem><suffix>` is a robot
//! candidate. Each one is compiled to a shared library, opened, and asked for
//! one instance through its factory. A broken candidate is logged and
//! skipped; the rest of the roster still loads.

pub mod compile;
pub mod discovery;
pub mod module;

pub use compile::{default_library_paths, RobotCompiler};
pub use discovery::{discover_sources, is_robot_source};
pub use module::{open_robot, LoadedRobot};

use std::path::PathBuf;

use thiserror::Error;

use crate::core::config::LoaderConfig;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to run compiler '{compiler}': {source}")]
    Spawn {
        compiler: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to compile {}: {stderr}", path.display())]
    Compile {
        path: PathBuf,
        status: Option<i32>,
        stderr: String,
    },

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("{} has no create_robot factory: {source}", path.display())]
    MissingFactory {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("create_robot in {} returned no robot", path.display())]
    NullInstance { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A candidate that did not make it into the roster
#[derive(Debug)]
pub struct LoadFailure {
    pub candidate: PathBuf,
    pub error: LoadError,
}

#[derive(Debug, Default)]
pub struct LoadReport {
    /// In discovery order
    pub loaded: Vec<LoadedRobot>,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }
}

pub struct RobotLoader {
    config: LoaderConfig,
    compiler: RobotCompiler,
}

impl RobotLoader {
    pub fn new(config: LoaderConfig) -> Self {
        let compiler = RobotCompiler::from_config(&config);
        Self { config, compiler }
    }

    pub fn compiler(&self) -> &RobotCompiler {
        &self.compiler
    }

    /// Candidate source files, sorted by file name
    pub fn discover(&self) -> Result<Vec<PathBuf>, LoadError> {
        Ok(discover_sources(
            &self.config.robots_dir,
            &self.config.prefix,
            &self.config.suffix,
        )?)
    }

    /// Compile and open a single candidate
    pub fn load_one(&self, source: &std::path::Path) -> Result<LoadedRobot, LoadError> {
        let library = self.compiler.compile(source)?;
        open_robot(&library)
    }

    /// Load every candidate, collecting failures instead of stopping at them
    pub fn load_all(&self) -> LoadReport {
        let mut report = LoadReport::default();

        let sources = match self.discover() {
            Ok(sources) => sources,
            Err(error) => {
                tracing::error!(dir = %self.config.robots_dir.display(), %error, "cannot scan for robots");
                report.failures.push(LoadFailure {
                    candidate: self.config.robots_dir.clone(),
                    error,
                });
                return report;
            }
        };

        if sources.is_empty() {
            tracing::warn!(dir = %self.config.robots_dir.display(), "no robot sources found");
        }

        for source in sources {
            match self.load_one(&source) {
                Ok(loaded) => {
                    tracing::info!(robot = %loaded.robot.name(), source = %source.display(), "loaded robot");
                    report.loaded.push(loaded);
                }
                Err(error) => {
                    tracing::warn!(source = %source.display(), %error, "skipping robot");
                    report.failures.push(LoadFailure {
                        candidate: source,
                        error,
                    });
                }
            }
        }

        report
    }
}
