//! CLI module for jswitch
//!
//! Handles command-line argument parsing and command dispatch.

mod args;
pub mod commands;
pub mod json_output;
pub mod style;
pub mod ui;

pub use args::{Cli, Commands, ConfigCommands};
pub use commands::CliContext;
