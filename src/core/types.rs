//! Core types shared across jswitch

use std::fmt;

use serde::{Deserialize, Serialize};

/// Variable holding the active Java installation root
pub const JAVA_HOME: &str = "JAVA_HOME";

/// Executable search path variable
pub const PATH: &str = "PATH";

/// Visibility level of a persistent environment variable
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    /// All users and processes on the host
    #[default]
    Machine,
    /// The current user's sessions only
    User,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Machine => write!(f, "machine"),
            Self::User => write!(f, "user"),
        }
    }
}

/// The Java version currently in effect, derived from `JAVA_HOME`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "kebab-case")]
pub enum ActiveVersion {
    /// `JAVA_HOME` matches a registered install root
    Known(String),
    /// `JAVA_HOME` is empty or points somewhere jswitch does not manage
    Unrecognized(String),
}

impl ActiveVersion {
    /// Registered label, if any
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Known(label) => Some(label),
            Self::Unrecognized(_) => None,
        }
    }

    /// No `JAVA_HOME` configured at all
    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unrecognized(raw) if raw.is_empty())
    }

    /// `JAVA_HOME` set to an installation outside the registry
    #[must_use]
    pub fn is_foreign(&self) -> bool {
        matches!(self, Self::Unrecognized(raw) if !raw.is_empty())
    }
}

impl fmt::Display for ActiveVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(label) => write!(f, "{label}"),
            Self::Unrecognized(raw) if raw.is_empty() => write!(f, "no Java configured"),
            Self::Unrecognized(raw) => write!(f, "unmanaged ({raw})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_variants_are_distinguishable() {
        let unset = ActiveVersion::Unrecognized(String::new());
        let foreign = ActiveVersion::Unrecognized("/usr/lib/jvm/default".to_string());

        assert!(unset.is_unset());
        assert!(!unset.is_foreign());
        assert!(foreign.is_foreign());
        assert!(!foreign.is_unset());
        assert_ne!(unset, foreign);
    }

    #[test]
    fn test_known_label() {
        let active = ActiveVersion::Known("Java17".to_string());
        assert_eq!(active.label(), Some("Java17"));
        assert_eq!(active.to_string(), "Java17");
    }

    #[test]
    fn test_scope_serde_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            scope: Scope,
        }
        let parsed: Wrapper = toml::from_str("scope = \"user\"").unwrap();
        assert_eq!(parsed.scope, Scope::User);
    }
}
