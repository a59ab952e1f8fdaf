//! Test-only helpers: a recording tool runner and a scratch project root.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::types::{ToolExit, ToolInvocation};
use crate::io::config::SetupConfig;
use crate::io::process::ToolRunner;

/// Records every invocation and answers with scripted exit codes.
///
/// Once the script is exhausted every call succeeds with code 0.
pub struct RecordingRunner {
    exits: RefCell<VecDeque<ToolExit>>,
    calls: RefCell<Vec<ToolInvocation>>,
}

impl RecordingRunner {
    pub fn new(codes: Vec<Option<i32>>) -> Self {
        Self {
            exits: RefCell::new(codes.into_iter().map(|code| ToolExit { code }).collect()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(Vec::new())
    }

    pub fn calls(&self) -> Vec<ToolInvocation> {
        self.calls.borrow().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(ToolInvocation::command_line)
            .collect()
    }
}

impl ToolRunner for RecordingRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<ToolExit> {
        self.calls.borrow_mut().push(invocation.clone());
        Ok(self
            .exits
            .borrow_mut()
            .pop_front()
            .unwrap_or(ToolExit { code: Some(0) }))
    }
}

/// Temporary project root with a config that does not depend on `PATH`.
pub struct TestRoot {
    dir: tempfile::TempDir,
    pub config: SetupConfig,
}

impl TestRoot {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        let mut config = SetupConfig::default();
        config.build.python = Some(PathBuf::from("/usr/bin/python3"));
        Ok(Self { dir, config })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
