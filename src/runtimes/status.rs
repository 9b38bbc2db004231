//! Detection of the active Java version

use serde::Serialize;

use super::path_list::java_segments;
use super::registry::VersionRegistry;
use crate::core::{ActiveVersion, JAVA_HOME, JswitchError, PATH, Result, Scope};
use crate::environment::EnvironmentStore;

/// Read a variable from the store, treating "unset" as empty
pub fn read_variable(
    store: &impl EnvironmentStore,
    variable: &str,
    scope: Scope,
) -> Result<String> {
    store
        .get(variable, scope)
        .map(Option::unwrap_or_default)
        .map_err(|source| JswitchError::EnvironmentRead {
            variable: variable.to_string(),
            scope,
            source,
        })
}

/// Reverse-look-up the stored `JAVA_HOME` in the registry
pub fn current_status(
    registry: &VersionRegistry,
    store: &impl EnvironmentStore,
    scope: Scope,
) -> Result<ActiveVersion> {
    let home = read_variable(store, JAVA_HOME, scope)?;
    Ok(registry.detect(&home))
}

/// Everything `jswitch status` shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub active: ActiveVersion,
    pub scope: Scope,
    pub java_home: String,
    pub java_path_entries: Vec<String>,
}

pub fn status_report(
    registry: &VersionRegistry,
    store: &impl EnvironmentStore,
    scope: Scope,
    separator: char,
) -> Result<StatusReport> {
    let java_home = read_variable(store, JAVA_HOME, scope)?;
    let path = read_variable(store, PATH, scope)?;

    Ok(StatusReport {
        active: registry.detect(&java_home),
        scope,
        java_path_entries: java_segments(&path, separator)
            .into_iter()
            .map(str::to_string)
            .collect(),
        java_home,
    })
}
