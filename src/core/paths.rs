//! Shared filesystem paths with test-friendly overrides.

use std::path::{Path, PathBuf};

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn fallback_home_dir() -> PathBuf {
    home::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Config directory (default: platform config dir + `jswitch`, or ~/.config/jswitch).
#[must_use]
pub fn config_dir() -> PathBuf {
    env_path("JSWITCH_CONFIG_DIR").unwrap_or_else(|| {
        dirs::config_dir()
            .map(|d| d.join("jswitch"))
            .unwrap_or_else(|| fallback_home_dir().join(".config/jswitch"))
    })
}

/// Config file path, honouring an explicit override first.
#[must_use]
pub fn config_file(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    env_path("JSWITCH_CONFIG").unwrap_or_else(|| config_dir().join("config.toml"))
}

/// System-wide environment file read by PAM on most Linux distributions.
#[must_use]
pub fn default_machine_env_file() -> PathBuf {
    PathBuf::from("/etc/environment")
}
