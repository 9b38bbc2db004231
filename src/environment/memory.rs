//! In-memory environment store with write-failure injection

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

use super::EnvironmentStore;
use crate::core::Scope;

/// Environment store backed by a map, for tests and dry runs.
///
/// Clones share state, so a test can hand one clone to the switcher and
/// inspect another afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    vars: Arc<Mutex<HashMap<(Scope, String), String>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    writes: Arc<Mutex<Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a machine-scope variable
    #[must_use]
    pub fn with_var(self, variable: &str, value: &str) -> Self {
        self.insert(Scope::Machine, variable, value);
        self
    }

    /// Seed a variable at an explicit scope
    pub fn insert(&self, scope: Scope, variable: &str, value: &str) {
        self.vars
            .lock()
            .insert((scope, variable.to_string()), value.to_string());
    }

    /// Make every future write of `variable` fail with `PermissionDenied`
    pub fn fail_writes_to(&self, variable: &str) {
        self.failing.lock().insert(variable.to_string());
    }

    /// Current machine-scope value of a variable
    pub fn value(&self, variable: &str) -> Option<String> {
        self.vars
            .lock()
            .get(&(Scope::Machine, variable.to_string()))
            .cloned()
    }

    /// Names of successfully written variables, in write order
    pub fn write_log(&self) -> Vec<String> {
        self.writes.lock().clone()
    }
}

impl EnvironmentStore for MemoryStore {
    fn get(&self, variable: &str, scope: Scope) -> io::Result<Option<String>> {
        Ok(self.vars.lock().get(&(scope, variable.to_string())).cloned())
    }

    fn set(&self, variable: &str, value: &str, scope: Scope) -> io::Result<()> {
        if self.failing.lock().contains(variable) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("write to {variable} rejected"),
            ));
        }
        self.vars
            .lock()
            .insert((scope, variable.to_string()), value.to_string());
        self.writes.lock().push(variable.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scopes_are_isolated() {
        let store = MemoryStore::new().with_var("JAVA_HOME", "/opt/jdk8");
        assert_eq!(
            store.get("JAVA_HOME", Scope::Machine).unwrap().as_deref(),
            Some("/opt/jdk8")
        );
        assert_eq!(store.get("JAVA_HOME", Scope::User).unwrap(), None);
    }

    #[test]
    fn test_injected_failure_leaves_value_untouched() {
        let store = MemoryStore::new().with_var("PATH", "/usr/bin");
        store.fail_writes_to("PATH");

        let err = store.set("PATH", "/opt/jdk/bin", Scope::Machine).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(store.value("PATH").as_deref(), Some("/usr/bin"));
        assert!(store.write_log().is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.set("JAVA_HOME", "/opt/jdk17", Scope::Machine).unwrap();
        assert_eq!(handle.value("JAVA_HOME").as_deref(), Some("/opt/jdk17"));
        assert_eq!(handle.write_log(), vec!["JAVA_HOME".to_string()]);
    }
}
