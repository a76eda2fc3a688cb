//! Opening a compiled robot library and calling its factory

use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};

use crate::loader::LoadError;
use crate::robot::{Robot, RobotFactory, FACTORY_SYMBOL};

/// A robot instance together with the library its code lives in.
///
/// `robot` is declared before `library` so it is dropped first.
pub struct LoadedRobot {
    pub robot: Box<dyn Robot>,
    pub library: Library,
    /// Library file the robot was loaded from
    pub source: PathBuf,
}

impl std::fmt::Debug for LoadedRobot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedRobot")
            .field("name", &self.robot.name())
            .field("source", &self.source)
            .finish()
    }
}

/// Load `path` and build one robot from its `create_robot` factory
pub fn open_robot(path: &Path) -> Result<LoadedRobot, LoadError> {
    // SAFETY: the library was just built by the loader against this crate's
    // rlib; running its initializers is what loading a robot means.
    let library = unsafe { Library::new(path) }.map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let raw = {
        // SAFETY: `RobotFactory` is the signature `export_robot!` generates.
        let factory: Symbol<RobotFactory> =
            unsafe { library.get(FACTORY_SYMBOL) }.map_err(|source| LoadError::MissingFactory {
                path: path.to_path_buf(),
                source,
            })?;
        unsafe { factory() }
    };

    if raw.is_null() {
        return Err(LoadError::NullInstance {
            path: path.to_path_buf(),
        });
    }

    // SAFETY: non-null pointers from the factory come from `Box::into_raw`.
    let robot = *unsafe { Box::from_raw(raw) };

    Ok(LoadedRobot {
        robot,
        library,
        source: path.to_path_buf(),
    })
}
