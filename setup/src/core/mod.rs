//! Deterministic, pure logic shared by the setup commands.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data and return deterministic outputs suitable for tests.

pub mod confirm;
pub mod inventory;
pub mod layout;
pub mod plan;
pub mod types;
