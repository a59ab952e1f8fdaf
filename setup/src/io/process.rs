//! Running external tools (git, cmake) with inherited stdio.
//!
//! Tool output is streamed straight to the operator; only the exit status is
//! observed. No timeout or retry is applied.

use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use tracing::{debug, error, info, instrument};

use crate::core::types::{ToolExit, ToolInvocation};

/// Seam between orchestration and process execution.
pub trait ToolRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<ToolExit>;
}

/// Runs tools as child processes of this one.
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    #[instrument(skip_all, fields(step = %invocation.step, program = %invocation.program))]
    fn run(&self, invocation: &ToolInvocation) -> Result<ToolExit> {
        info!(
            workdir = %invocation.workdir.display(),
            command = %invocation.command_line(),
            "running tool"
        );
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .current_dir(&invocation.workdir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let status = match cmd.status() {
            Ok(status) => status,
            Err(e) => {
                error!(err = %e, "failed to spawn tool");
                return Err(e).with_context(|| format!("spawn {}", invocation.program));
            }
        };

        debug!(exit_code = ?status.code(), "tool finished");
        Ok(ToolExit::from(status))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::core::types::Step;

    fn invocation(program: &str, args: &[&str], workdir: &std::path::Path) -> ToolInvocation {
        ToolInvocation {
            step: Step::Install,
            program: program.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            workdir: workdir.to_path_buf(),
        }
    }

    #[test]
    fn reports_exit_code() {
        let temp = tempfile::tempdir().expect("tempdir");
        let exit = SystemRunner
            .run(&invocation("sh", &["-c", "exit 7"], temp.path()))
            .expect("run");
        assert_eq!(exit.code, Some(7));
        assert!(!exit.success());
    }

    #[test]
    fn runs_in_workdir() {
        let temp = tempfile::tempdir().expect("tempdir");
        let exit = SystemRunner
            .run(&invocation("sh", &["-c", "touch marker"], temp.path()))
            .expect("run");
        assert!(exit.success());
        assert!(temp.path().join("marker").is_file());
    }

    #[test]
    fn missing_program_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = SystemRunner
            .run(&invocation("sispo-setup-no-such-tool", &[], temp.path()))
            .unwrap_err();
        assert!(err.to_string().contains("spawn sispo-setup-no-such-tool"));
    }
}
