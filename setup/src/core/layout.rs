//! Directory layout of the provisioned dependency.
//!
//! ```text
//! <root>/<software_dir>/<dependency>/             clone runs here
//! <root>/<software_dir>/<dependency>/<dependency>/  checkout
//! <root>/<software_dir>/<dependency>/<build_dir>/   cmake runs here
//! ```

use std::path::{Path, PathBuf};

use crate::io::config::SetupConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub root: PathBuf,
    pub software_dir: PathBuf,
    pub dependency_dir: PathBuf,
    pub checkout_dir: PathBuf,
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    pub teardown_target: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>, cfg: &SetupConfig) -> Self {
        let root = root.into();
        let software_dir = root.join(&cfg.layout.software_dir);
        let dependency_dir = software_dir.join(&cfg.layout.dependency);
        let checkout_dir = dependency_dir.join(clone_dir_name(&cfg.source.repository));
        Self {
            source_dir: checkout_dir.join(&cfg.source.source_subdir),
            build_dir: dependency_dir.join(&cfg.layout.build_dir),
            teardown_target: root.join(&cfg.teardown.target),
            root,
            software_dir,
            dependency_dir,
            checkout_dir,
        }
    }

    /// Directories provisioning ensures, parents first.
    pub fn provisioned_dirs(&self) -> [&Path; 3] {
        [&self.software_dir, &self.dependency_dir, &self.build_dir]
    }

    /// Resolve a configured path against the root unless it is absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// Directory name `git clone <url>` picks: last path segment without `.git`.
pub fn clone_dir_name(repository: &str) -> &str {
    let trimmed = repository.trim_end_matches('/');
    let last = trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(trimmed);
    last.strip_suffix(".git").unwrap_or(last)
}
