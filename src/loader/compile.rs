//! Building robot sources into loadable libraries
//!
//! Each source is compiled on its own as a `cdylib` that links against this
//! crate's rlib, so robots share the arena's `Robot` trait and stat block.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::config::LoaderConfig;
use crate::loader::LoadError;

/// Name the arena library is linked under inside robot sources
pub const CONTRACT_CRATE: &str = "robot_arena";

/// `(contract_lib, dependency_dir)` for an executable living in `exe_dir`.
///
/// Cargo puts binaries in `target/<profile>/` and test harnesses in
/// `target/<profile>/deps/`; both resolve to the profile directory, which holds
/// `librobot_arena.rlib` and `deps/`. An installed binary has no rlib beside it,
/// so the paths must then come from the config.
pub fn default_library_paths(exe_dir: &Path) -> (PathBuf, PathBuf) {
    let profile_dir = if exe_dir.file_name().is_some_and(|name| name == "deps") {
        exe_dir.parent().unwrap_or(exe_dir)
    } else {
        exe_dir
    };
    (
        profile_dir.join(format!("lib{}.rlib", CONTRACT_CRATE)),
        profile_dir.join("deps"),
    )
}

#[derive(Debug, Clone)]
pub struct RobotCompiler {
    pub compiler: String,
    pub output_dir: PathBuf,
    pub contract_lib: Option<PathBuf>,
    pub dependency_dir: Option<PathBuf>,
    pub extra_args: Vec<String>,
}

impl RobotCompiler {
    /// Fill in unset library paths from the running executable's location.
    /// See [`default_library_paths`] for where they are expected.
    pub fn from_config(config: &LoaderConfig) -> Self {
        let defaults = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(default_library_paths));

        let contract_lib = config
            .contract_lib
            .clone()
            .or_else(|| defaults.as_ref().map(|(lib, _)| lib.clone()));
        let dependency_dir = config
            .dependency_dir
            .clone()
            .or_else(|| defaults.as_ref().map(|(_, deps)| deps.clone()));

        if let Some(lib) = contract_lib.as_ref().filter(|lib| !lib.exists()) {
            tracing::warn!(
                contract_lib = %lib.display(),
                "arena library not found, robots will fail to compile; set loader.contract_lib"
            );
        }

        Self {
            compiler: config.compiler.clone(),
            output_dir: config.output_dir.clone(),
            contract_lib,
            dependency_dir,
            extra_args: config.extra_args.clone(),
        }
    }

    /// `robots/robot_sentinel.rs` -> `<output_dir>/librobot_sentinel.so` (per platform)
    pub fn library_path(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.output_dir.join(format!(
            "{}{}{}",
            std::env::consts::DLL_PREFIX,
            stem,
            std::env::consts::DLL_SUFFIX
        ))
    }

    pub fn command(&self, source: &Path) -> Command {
        let crate_name = source
            .file_stem()
            .map(|s| s.to_string_lossy().replace('-', "_"))
            .unwrap_or_default();

        let mut cmd = Command::new(&self.compiler);
        cmd.arg("--edition=2021")
            .arg("--crate-type=cdylib")
            .arg("--crate-name")
            .arg(crate_name)
            .arg("-o")
            .arg(self.library_path(source))
            .arg(source);

        if let Some(lib) = &self.contract_lib {
            cmd.arg("--extern")
                .arg(format!("{}={}", CONTRACT_CRATE, lib.display()));
        }
        if let Some(deps) = &self.dependency_dir {
            cmd.arg("-L").arg(format!("dependency={}", deps.display()));
        }
        cmd.args(&self.extra_args);
        cmd
    }

    /// Compile one source, returning the library path
    pub fn compile(&self, source: &Path) -> Result<PathBuf, LoadError> {
        std::fs::create_dir_all(&self.output_dir)?;
        let output_path = self.library_path(source);
        let mut cmd = self.command(source);
        tracing::info!(source = %source.display(), output = %output_path.display(), "compiling robot");
        tracing::debug!(command = ?cmd, "compile command");

        let output = cmd.output().map_err(|source| LoadError::Spawn {
            compiler: self.compiler.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(LoadError::Compile {
                path: source.to_path_buf(),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output_path)
    }
}
