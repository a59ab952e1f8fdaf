//! I/O helpers for setup commands.

pub mod config;
pub mod dirs;
pub mod environment;
pub mod interpreter;
pub mod process;
pub mod prompt;
