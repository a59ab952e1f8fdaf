//! Shared types for setup core logic.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Which provisioning step a tool invocation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Clone,
    Configure,
    Install,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::Clone => "clone",
            Step::Configure => "configure",
            Step::Install => "install",
        };
        f.write_str(label)
    }
}

/// A single external tool call: program, arguments and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub step: Step,
    pub program: String,
    pub args: Vec<String>,
    pub workdir: PathBuf,
}

impl ToolInvocation {
    /// Shell-like rendering for logs and `--dry-run`.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Outcome of ensuring a directory exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirAction {
    Created,
    Existing,
}

/// Exit of an external tool. `code` is `None` when killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolExit {
    pub code: Option<i32>,
}

impl ToolExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Exit code to propagate as our own; signal termination maps to 1.
    pub fn propagated_code(&self) -> i32 {
        self.code.unwrap_or(1)
    }
}

impl From<std::process::ExitStatus> for ToolExit {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}
