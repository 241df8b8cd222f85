//! Command-line interface for the `s2match` binary.

pub mod commands;
pub mod types;

pub use types::{Cli, Commands, CompareArgs};
