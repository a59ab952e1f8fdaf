//! Checks on the operator's package/environment manager session.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Variable set by Conda while an environment is active.
pub const CONDA_PREFIX_VAR: &str = "CONDA_PREFIX";

/// Prefix of the active Conda environment, if any.
pub fn active_conda_prefix() -> Option<PathBuf> {
    std::env::var_os(CONDA_PREFIX_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Refuse to delete `target` while the active environment lives inside it.
///
/// The environment cannot be deactivated from a child process, so the
/// operator has to run `conda deactivate` first.
pub fn ensure_not_active(target: &Path, active_prefix: Option<&Path>) -> Result<()> {
    let Some(prefix) = active_prefix else {
        return Ok(());
    };
    let target = absolute(target);
    let prefix = absolute(prefix);
    if prefix.starts_with(&target) {
        bail!(
            "environment {} is active inside {}; run `conda deactivate` first",
            prefix.display(),
            target.display()
        );
    }
    Ok(())
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
