//! Provisioning and teardown of the openMVG dependency used by sispo.
//!
//! The crate keeps the same split throughout:
//!
//! - **[`core`]**: Pure, deterministic logic (directory layout, tool invocation
//!   plan, confirmation state machine, executable inventory). No I/O.
//! - **[`io`]**: Side-effecting operations (config file, directory creation,
//!   child processes, operator prompt).
//!
//! Orchestration modules ([`provision`], [`teardown`], [`status`]) coordinate
//! core logic with I/O to implement CLI commands.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod provision;
pub mod status;
pub mod teardown;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
