//! Configuration loading

mod settings;

pub use settings::{CONFIG_TEMPLATE, Settings};
