//! Core module - shared types, errors, paths and privilege helpers

mod error;
pub mod paths;
mod privilege;
pub mod testing;
mod types;

pub use error::{JswitchError, Result, format_error_with_suggestion, suggest_for_anyhow};
pub use privilege::{elevate, is_elevated, relaunch_args};
pub use types::*;
