//! Directory creation and navigation checks.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::core::types::DirAction;

/// Create `path` unless it already exists as a directory.
///
/// The parent must already exist. A non-directory at `path` is an error.
pub fn ensure_dir(path: &Path) -> Result<DirAction> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => {
            debug!(path = %path.display(), "directory exists");
            Ok(DirAction::Existing)
        }
        Ok(_) => bail!("{} exists but is not a directory", path.display()),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            fs::create_dir(path).with_context(|| format!("create directory {}", path.display()))?;
            debug!(path = %path.display(), "directory created");
            Ok(DirAction::Created)
        }
        Err(err) => Err(err).with_context(|| format!("stat {}", path.display())),
    }
}

/// Check that `path` can be used as a working directory.
pub fn enter_dir(path: &Path) -> Result<()> {
    let meta =
        fs::metadata(path).with_context(|| format!("cannot enter {}", path.display()))?;
    if !meta.is_dir() {
        bail!("cannot enter {}: not a directory", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_then_reports_existing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = temp.path().join("software");

        assert_eq!(ensure_dir(&dir).expect("first"), DirAction::Created);
        assert!(dir.is_dir());
        assert_eq!(ensure_dir(&dir).expect("second"), DirAction::Existing);
    }

    #[test]
    fn refuses_regular_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("software");
        fs::write(&path, "not a dir").expect("write");

        let err = ensure_dir(&path).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
        assert!(enter_dir(&path).is_err());
    }

    #[test]
    fn missing_parent_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("missing").join("child");
        assert!(ensure_dir(&path).is_err());
        assert!(enter_dir(&path).is_err());
    }
}
