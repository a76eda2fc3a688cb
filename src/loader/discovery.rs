//! Finding robot sources on disk

use std::io;
use std::path::{Path, PathBuf};

/// Does `file_name` follow the `<prefix><stem><suffix>` convention with a
/// non-empty stem?
pub fn is_robot_source(file_name: &str, prefix: &str, suffix: &str) -> bool {
    file_name.len() > prefix.len() + suffix.len()
        && file_name.starts_with(prefix)
        && file_name.ends_with(suffix)
}

/// Regular files in `dir` that look like robot sources, sorted by file name
/// so load order is stable across runs and platforms.
pub fn discover_sources(dir: &Path, prefix: &str, suffix: &str) -> io::Result<Vec<PathBuf>> {
    let mut sources = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if is_robot_source(name, prefix, suffix) {
            sources.push(entry.path());
        }
    }

    sources.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(sources)
}
