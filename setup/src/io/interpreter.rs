//! Python interpreter lookup for the CMake configure step.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use tracing::debug;

const CANDIDATES: [&str; 2] = ["python", "python3"];

/// Use the configured interpreter, or the first candidate found on `PATH`.
///
/// A configured relative path is taken relative to `root`.
pub fn resolve_python(configured: Option<&Path>, root: &Path) -> Result<PathBuf> {
    resolve_python_with(configured, root, path_lookup)
}

/// Look `name` up on `PATH`.
pub fn path_lookup(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Like [`resolve_python`], with the `PATH` lookup supplied by the caller.
pub fn resolve_python_with<F>(configured: Option<&Path>, root: &Path, lookup: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    if let Some(path) = configured {
        let resolved = if path.is_absolute() || path.components().count() == 1 {
            path.to_path_buf()
        } else {
            root.join(path)
        };
        debug!(python = %resolved.display(), "using configured interpreter");
        return Ok(resolved);
    }
    for name in CANDIDATES {
        if let Some(found) = lookup(name) {
            debug!(python = %found.display(), "found interpreter on PATH");
            return Ok(found);
        }
    }
    Err(anyhow!(
        "no python interpreter on PATH (tried {}); set build.python in the config",
        CANDIDATES.join(", ")
    ))
}
