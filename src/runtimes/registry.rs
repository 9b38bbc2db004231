//! Registry of installed Java versions

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Serialize;

use super::path_list::fold_case;

use crate::config::Settings;
use crate::core::{ActiveVersion, JswitchError, Result};

/// A configured Java installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionEntry {
    pub label: String,
    pub root: PathBuf,
}

impl VersionEntry {
    pub fn new(label: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            root: root.into(),
        }
    }

    /// Directory prepended to PATH when this version is active
    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// Install root as written to `JAVA_HOME`
    #[must_use]
    pub fn root_str(&self) -> String {
        self.root.to_string_lossy().into_owned()
    }
}

/// Ordered, validated label <-> install root table
#[derive(Debug, Clone, Default)]
pub struct VersionRegistry {
    entries: Vec<VersionEntry>,
}

impl VersionRegistry {
    /// Build a registry, rejecting empty labels and duplicate labels or roots
    pub fn new(entries: Vec<VersionEntry>) -> Result<Self> {
        let mut labels = HashSet::new();
        let mut roots = HashSet::new();

        for entry in &entries {
            if entry.label.trim().is_empty() {
                return Err(JswitchError::InvalidRegistry(
                    "version label must not be empty".to_string(),
                ));
            }
            if !labels.insert(entry.label.as_str()) {
                return Err(JswitchError::InvalidRegistry(format!(
                    "duplicate label '{}'",
                    entry.label
                )));
            }
            if !roots.insert(fold_case(&entry.root_str())) {
                return Err(JswitchError::InvalidRegistry(format!(
                    "install root {} is registered more than once",
                    entry.root.display()
                )));
            }
        }

        Ok(Self { entries })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings
                .versions
                .iter()
                .map(|(label, root)| VersionEntry::new(label.clone(), root.clone()))
                .collect(),
        )
    }

    /// Look up an entry by exact label
    pub fn resolve(&self, label: &str) -> Result<&VersionEntry> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .ok_or_else(|| JswitchError::UnknownVersion(label.to_string()))
    }

    /// Reverse lookup: which label does this `JAVA_HOME` value belong to?
    ///
    /// Comparison is case-insensitive but otherwise exact; a trailing
    /// separator or different spelling of the same directory won't match.
    #[must_use]
    pub fn detect(&self, current_home: &str) -> ActiveVersion {
        if current_home.is_empty() {
            return ActiveVersion::Unrecognized(String::new());
        }

        let needle = fold_case(current_home);
        self.entries
            .iter()
            .find(|e| fold_case(&e.root_str()) == needle)
            .map_or_else(
                || ActiveVersion::Unrecognized(current_home.to_string()),
                |e| ActiveVersion::Known(e.label.clone()),
            )
    }

    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    #[must_use]
    pub fn entries(&self) -> &[VersionEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
