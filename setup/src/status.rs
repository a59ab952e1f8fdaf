//! `status`: report the layout and the executables the pipeline needs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::core::inventory::{ExecutableEntry, match_executables};
use crate::core::layout::Layout;
use crate::exit_codes;

/// Build outputs land in `<build>/<platform>-<config>/[<config>/]`.
const SEARCH_DEPTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirStatus {
    pub label: &'static str,
    pub path: PathBuf,
    pub exists: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub dirs: Vec<DirStatus>,
    pub executables: Vec<ExecutableEntry>,
}

impl StatusReport {
    pub fn complete(&self) -> bool {
        self.dirs.iter().all(|d| d.exists) && self.executables.iter().all(|e| e.path.is_some())
    }

    pub fn exit_code(&self) -> i32 {
        if self.complete() {
            exit_codes::OK
        } else {
            exit_codes::INCOMPLETE
        }
    }

    /// Human-readable report, one line per entry.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for dir in &self.dirs {
            let mark = if dir.exists { "ok" } else { "missing" };
            out.push_str(&format!("{:<8} {:<10} {}\n", mark, dir.label, dir.path.display()));
        }
        for exe in &self.executables {
            match &exe.path {
                Some(path) => out.push_str(&format!("ok       {} {}\n", exe.name, path.display())),
                None => out.push_str(&format!("missing  {}\n", exe.name)),
            }
        }
        out
    }
}

pub fn collect_status(layout: &Layout) -> Result<StatusReport> {
    let dirs = vec![
        dir_status("software", &layout.software_dir),
        dir_status("dependency", &layout.dependency_dir),
        dir_status("checkout", &layout.checkout_dir),
        dir_status("build", &layout.build_dir),
    ];
    let files = if layout.build_dir.is_dir() {
        build_files(&layout.build_dir)?
    } else {
        Vec::new()
    };
    debug!(files = files.len(), "scanned build tree");
    let executables = match_executables(files.iter().map(PathBuf::as_path));
    Ok(StatusReport { dirs, executables })
}

fn dir_status(label: &'static str, path: &Path) -> DirStatus {
    DirStatus {
        label,
        path: path.to_path_buf(),
        exists: path.is_dir(),
    }
}

fn build_files(build_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(build_dir)
        .max_depth(SEARCH_DEPTH)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("walk {}", build_dir.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::inventory::REQUIRED_EXECUTABLES;
    use crate::io::config::SetupConfig;
    use std::fs;

    #[test]
    fn empty_root_is_incomplete() {
        let temp = tempfile::tempdir().expect("tempdir");
        let layout = Layout::new(temp.path(), &SetupConfig::default());

        let report = collect_status(&layout).expect("status");

        assert!(report.dirs.iter().all(|d| !d.exists));
        assert!(report.executables.iter().all(|e| e.path.is_none()));
        assert_eq!(report.exit_code(), exit_codes::INCOMPLETE);
        assert!(report.render_text().contains("missing  openMVG_main_IncrementalSfM"));
    }

    #[test]
    fn installed_build_is_complete() {
        let temp = tempfile::tempdir().expect("tempdir");
        let layout = Layout::new(temp.path(), &SetupConfig::default());
        let bin_dir = layout.build_dir.join("Windows-AMD64-Release").join("Release");
        fs::create_dir_all(&bin_dir).expect("mkdir");
        fs::create_dir_all(&layout.checkout_dir).expect("mkdir");
        for name in REQUIRED_EXECUTABLES {
            fs::write(bin_dir.join(format!("{name}.exe")), "").expect("write");
        }

        let report = collect_status(&layout).expect("status");

        assert!(report.complete());
        assert_eq!(report.exit_code(), exit_codes::OK);
    }

    #[test]
    fn executables_below_search_depth_are_ignored() {
        let temp = tempfile::tempdir().expect("tempdir");
        let layout = Layout::new(temp.path(), &SetupConfig::default());
        let deep = layout.build_dir.join("a").join("b").join("c");
        fs::create_dir_all(&deep).expect("mkdir");
        fs::write(deep.join(REQUIRED_EXECUTABLES[0]), "").expect("write");

        let report = collect_status(&layout).expect("status");
        assert!(report.executables.iter().all(|e| e.path.is_none()));
    }
}
