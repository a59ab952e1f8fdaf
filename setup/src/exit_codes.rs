//! Stable exit codes for sispo-setup commands.
//!
//! `provision` is the exception: it exits with the status of the last tool it ran.

/// Command succeeded, or the operator declined teardown.
pub const OK: i32 = 0;
/// Invalid config, navigation failure, or other runner errors.
pub const INVALID: i32 = 1;
/// `status` found missing directories or executables.
pub const INCOMPLETE: i32 = 2;
