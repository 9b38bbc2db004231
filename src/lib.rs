//! jswitch library - shared code for the `jswitch` CLI
//!
//! Switches the machine-wide (or per-user) Java installation by rewriting
//! `JAVA_HOME` and `PATH` in the persistent environment store, then telling
//! running programs that the environment changed.

// Production-ready clippy configuration
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::suspicious)]
// Allow documentation lints - internal code, not public API
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::items_after_statements)]

pub mod cli;
pub mod config;
pub mod core;
pub mod environment;
pub mod runtimes;
