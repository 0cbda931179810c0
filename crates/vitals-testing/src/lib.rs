//! Testing infrastructure for vitals integration tests.
//!
//! This crate provides utilities for writing integration tests:
//! - `StubRunner`: scripted command output in place of the host utilities
//! - `fixtures`: captured output of each utility on real machines
//! - `TestWorld`: isolated config directory and CLI execution

pub mod fixtures;
pub mod stub;
pub mod world;

pub use stub::StubRunner;
pub use world::{CliResult, TestWorld};
