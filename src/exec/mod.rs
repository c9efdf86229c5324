// src/exec/mod.rs

//! Process execution layer.
//!
//! This module runs the test binary in an isolated child process using
//! `tokio::process::Command` and reports how it ended.
//!
//! - [`isolation`] builds the command with the child environment reset to a
//!   deterministic baseline.
//! - [`supervisor`] spawns the child and supervises the bounded,
//!   interrupt-aware wait.
//! - [`status`] holds the raw termination observations the classifier
//!   consumes.

pub mod isolation;
pub mod status;
pub mod supervisor;

pub use isolation::isolated_command;
pub use status::{EXEC_FAILURE_CODE, TerminationStatus, WaitOutcome};
pub use supervisor::spawn_and_wait;
