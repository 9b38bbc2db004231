//! jswitch Settings and Configuration

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{JswitchError, Result, Scope, paths};

/// Commented starter file written by `jswitch config init`
pub const CONFIG_TEMPLATE: &str = r#"# jswitch configuration
#
# Each entry under [versions] maps a label to a Java install root
# (the directory containing bin/). Order here is the order shown in menus.

# Where JAVA_HOME and PATH are written: "machine" or "user" (user is Windows-only)
scope = "machine"

# How long to wait for running programs to acknowledge the change (Windows)
notify_timeout_ms = 1000

# Re-launch with sudo / UAC when writing machine-scope variables
auto_elevate = true

# Unix only: file holding machine-wide variables
# machine_env_file = "/etc/environment"

# Override the PATH list separator (";" on Windows, ":" elsewhere)
# path_separator = ";"

[versions]
# Java8 = 'D:\java\jdk-8u361'
# Java11 = 'D:\java\jdk-11.0.23'
# Java17 = '/usr/lib/jvm/java-17-openjdk'
"#;

/// jswitch configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scope JAVA_HOME and PATH are read from and written to
    pub scope: Scope,

    /// Upper bound for the environment-change broadcast
    pub notify_timeout_ms: u64,

    /// PATH list separator override
    pub path_separator: Option<char>,

    /// Machine-wide environment file (Unix)
    pub machine_env_file: PathBuf,

    /// Re-launch elevated when a machine-scope write needs it
    pub auto_elevate: bool,

    /// Label -> install root, in presentation order
    pub versions: IndexMap<String, PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scope: Scope::Machine,
            notify_timeout_ms: 1000,
            path_separator: None,
            machine_env_file: paths::default_machine_env_file(),
            auto_elevate: true,
            versions: IndexMap::new(),
        }
    }
}

impl Settings {
    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| JswitchError::ConfigError(format!("{}: {e}", path.display())))
    }

    /// Parse settings from TOML text
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Render the effective settings as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| JswitchError::ConfigError(e.to_string()))
    }

    /// Get the config file path
    #[must_use]
    pub fn config_path(explicit: Option<&Path>) -> PathBuf {
        paths::config_file(explicit)
    }

    /// Separator between PATH entries
    #[must_use]
    pub fn separator(&self) -> char {
        self.path_separator
            .unwrap_or(if cfg!(windows) { ';' } else { ':' })
    }

    #[must_use]
    pub fn notify_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.notify_timeout_ms)
    }
}
