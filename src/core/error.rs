//! Error types for jswitch with helpful suggestions

use thiserror::Error;

use crate::core::Scope;

/// Convenience Result type for jswitch operations
pub type Result<T> = std::result::Result<T, JswitchError>;

#[derive(Error, Debug)]
pub enum JswitchError {
    #[error("Unknown Java version: {0}")]
    UnknownVersion(String),

    #[error("Failed to read {variable} ({scope} scope): {source}")]
    EnvironmentRead {
        variable: String,
        scope: Scope,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {variable} ({scope} scope): {source}")]
    EnvironmentWrite {
        variable: String,
        scope: Scope,
        #[source]
        source: std::io::Error,
    },

    #[error("Partial switch: {written} was updated but writing {failed} failed: {source}")]
    PartialSwitch {
        written: String,
        failed: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid version registry: {0}")]
    InvalidRegistry(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl JswitchError {
    /// Get a helpful suggestion for how to fix this error
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::UnknownVersion(_) => {
                Some("Try: jswitch list to see the configured Java versions")
            }
            Self::EnvironmentWrite { scope, .. } | Self::EnvironmentRead { scope, .. } => {
                match scope {
                    Scope::Machine => Some(
                        "Machine-wide variables need elevated privileges.\nRe-run from an administrator shell (or with sudo)",
                    ),
                    Scope::User => Some(
                        "User-scope variables are only supported on Windows.\nUse --scope machine on this platform",
                    ),
                }
            }
            Self::PartialSwitch { .. } => Some(
                "JAVA_HOME and PATH are now out of sync.\nRe-run the same jswitch use command to finish the switch",
            ),
            Self::InvalidRegistry(_) => Some(
                "Every [versions] entry needs a unique, non-empty label and a unique install root",
            ),
            Self::ConfigError(_) => Some(
                "Check the config file for syntax errors.\nShow its location with: jswitch config path",
            ),
            Self::IoError(_) => None,
        }
    }
}

/// Format an error with its suggestion for display
pub fn format_error_with_suggestion(err: &JswitchError) -> String {
    let mut msg = format!("Error: {err}");
    if let Some(suggestion) = err.suggestion() {
        msg.push_str("\n\n💡 ");
        msg.push_str(suggestion);
    }
    msg
}

/// Find a suggestion for an anyhow error, looking through its context chain
pub fn suggest_for_anyhow(err: &anyhow::Error) -> Option<&'static str> {
    if let Some(err) = err.chain().find_map(|e| e.downcast_ref::<JswitchError>()) {
        return err.suggestion();
    }

    let msg = format!("{err:#}").to_lowercase();
    if msg.contains("permission denied") || msg.contains("access is denied") {
        return Some("Try running from an administrator shell, or with sudo");
    }
    if msg.contains("not a terminal") {
        return Some("Pass the version label explicitly: jswitch use <LABEL>");
    }

    None
}
