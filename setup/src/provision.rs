//! `provision`: ensure the layout, then clone, configure and install.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::core::layout::Layout;
use crate::core::plan::{BuildSettings, ProvisionPlan, provision_plan};
use crate::core::types::{DirAction, Step, ToolExit};
use crate::exit_codes;
use crate::io::config::SetupConfig;
use crate::io::dirs::{ensure_dir, enter_dir};
use crate::io::interpreter::{path_lookup, resolve_python_with};
use crate::io::process::ToolRunner;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirReport {
    pub path: PathBuf,
    pub action: DirAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: Step,
    pub exit: ToolExit,
}

/// What `run_provision` did, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProvisionReport {
    pub dirs: Vec<DirReport>,
    pub steps: Vec<StepReport>,
}

impl ProvisionReport {
    /// Exit status of the last tool, as a shell script would report it.
    pub fn exit_code(&self) -> i32 {
        self.steps
            .last()
            .map(|report| report.exit.propagated_code())
            .unwrap_or(exit_codes::OK)
    }

    pub fn failed_steps(&self) -> Vec<Step> {
        self.steps
            .iter()
            .filter(|report| !report.exit.success())
            .map(|report| report.step)
            .collect()
    }
}

/// Resolve the layout and the tool plan without touching the filesystem.
pub fn prepare(root: &Path, cfg: &SetupConfig) -> Result<(Layout, ProvisionPlan)> {
    prepare_with(root, cfg, path_lookup)
}

fn prepare_with<F>(root: &Path, cfg: &SetupConfig, lookup: F) -> Result<(Layout, ProvisionPlan)>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    cfg.validate()?;
    let layout = Layout::new(root, cfg);
    let python = resolve_python_with(cfg.build.python.as_deref(), root, lookup)
        .context("interpreter lookup failed; nothing was created or run")?;
    let settings = BuildSettings::resolve(&layout, cfg, python);
    let plan = provision_plan(&layout, cfg, &settings);
    Ok((layout, plan))
}

/// Ensure `software/<dependency>/<build>` exists, then run clone, configure
/// and install in order.
///
/// A directory that cannot be created or entered aborts before any further
/// tool runs. Tool failures do not stop later steps; they show up in the
/// report and in [`ProvisionReport::exit_code`].
#[instrument(skip_all, fields(root = %root.display()))]
pub fn run_provision<R: ToolRunner>(
    root: &Path,
    cfg: &SetupConfig,
    runner: &R,
) -> Result<ProvisionReport> {
    let (layout, plan) = prepare(root, cfg)?;
    enter_dir(&layout.root).context("project root")?;

    let mut report = ProvisionReport::default();
    for dir in layout.provisioned_dirs() {
        let action = ensure_dir(dir)?;
        info!(path = %dir.display(), ?action, "layout directory");
        report.dirs.push(DirReport {
            path: dir.to_path_buf(),
            action,
        });
    }

    for invocation in &plan.invocations {
        enter_dir(&invocation.workdir)
            .with_context(|| format!("{} step aborted", invocation.step))?;
        let exit = runner.run(invocation)?;
        if !exit.success() {
            warn!(step = %invocation.step, exit_code = ?exit.code, "tool failed, continuing");
        }
        report.steps.push(StepReport {
            step: invocation.step,
            exit,
        });
    }
    Ok(report)
}

/// Lines printed by `provision --dry-run`.
pub fn describe(layout: &Layout, plan: &ProvisionPlan) -> Vec<String> {
    let mut lines = Vec::new();
    for dir in layout.provisioned_dirs() {
        let state = if dir.is_dir() { "exists" } else { "create" };
        lines.push(format!("dir {state} {}", dir.display()));
    }
    for invocation in &plan.invocations {
        lines.push(format!(
            "run {} in {}: {}",
            invocation.step,
            invocation.workdir.display(),
            invocation.command_line()
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingRunner, TestRoot};

    #[test]
    fn exit_code_is_last_step() {
        let report = ProvisionReport {
            dirs: Vec::new(),
            steps: vec![
                StepReport {
                    step: Step::Clone,
                    exit: ToolExit { code: Some(128) },
                },
                StepReport {
                    step: Step::Install,
                    exit: ToolExit { code: Some(0) },
                },
            ],
        };
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.failed_steps(), vec![Step::Clone]);
    }

    #[test]
    fn signal_exit_maps_to_one() {
        let report = ProvisionReport {
            dirs: Vec::new(),
            steps: vec![StepReport {
                step: Step::Install,
                exit: ToolExit { code: None },
            }],
        };
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn describe_lists_dirs_then_commands() {
        let root = TestRoot::new().expect("root");
        let (layout, plan) = prepare(root.path(), &root.config).expect("prepare");
        let lines = describe(&layout, &plan);

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("dir create "));
        assert!(lines[3].contains("git clone --recursive"));
        assert!(lines[5].ends_with("cmake --build . --target install"));
    }

    #[test]
    fn missing_interpreter_reports_nothing_was_run() {
        let mut root = TestRoot::new().expect("root");
        root.config.build.python = None;

        let err = prepare_with(root.path(), &root.config, |_| None).unwrap_err();

        let msg = format!("{err:#}");
        assert!(msg.contains("nothing was created or run"));
        assert!(msg.contains("build.python"));
        assert!(!root.path().join("software").exists());
    }

    #[test]
    fn missing_root_aborts_before_tools() {
        let root = TestRoot::new().expect("root");
        let runner = RecordingRunner::succeeding();
        let missing = root.path().join("nope");

        let err = run_provision(&missing, &root.config, &runner).unwrap_err();
        assert!(format!("{err:#}").contains("project root"));
        assert!(runner.calls().is_empty());
    }
}
