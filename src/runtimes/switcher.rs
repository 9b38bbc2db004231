//! Switching the active Java installation

use serde::Serialize;

use super::notifier::{ChangeNotifier, NotifyOutcome};
use super::path_list::rebuild_path;
use super::registry::VersionRegistry;
use super::status::{self, StatusReport};
use crate::core::{ActiveVersion, JAVA_HOME, JswitchError, PATH, Result, Scope};
use crate::environment::EnvironmentStore;

/// Values a switch would write, computed without touching the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchPlan {
    pub label: String,
    pub scope: Scope,
    pub previous_home: String,
    pub previous_path: String,
    pub java_home: String,
    pub path: String,
}

impl SwitchPlan {
    /// Applying the plan wouldn't change anything
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.previous_home == self.java_home && self.previous_path == self.path
    }
}

/// Outcome of a completed switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchResult {
    pub label: String,
    pub java_home: String,
    pub path: String,
    pub notification: NotifyOutcome,
}

impl SwitchResult {
    /// Whether running programs acknowledged the change
    #[must_use]
    pub fn notified(&self) -> bool {
        self.notification.succeeded()
    }
}

/// Rewrites JAVA_HOME and PATH through an [`EnvironmentStore`]
pub struct EnvironmentSwitcher<'a, S, N> {
    registry: &'a VersionRegistry,
    store: S,
    notifier: N,
    scope: Scope,
    separator: char,
}

impl<'a, S: EnvironmentStore, N: ChangeNotifier> EnvironmentSwitcher<'a, S, N> {
    /// Machine scope with the platform PATH separator
    pub fn new(registry: &'a VersionRegistry, store: S, notifier: N) -> Self {
        Self {
            registry,
            store,
            notifier,
            scope: Scope::Machine,
            separator: if cfg!(windows) { ';' } else { ':' },
        }
    }

    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &VersionRegistry {
        self.registry
    }

    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    #[must_use]
    pub fn separator(&self) -> char {
        self.separator
    }

    fn read(&self, variable: &str) -> Result<String> {
        status::read_variable(&self.store, variable, self.scope)
    }

    /// Current `JAVA_HOME`, empty when unset
    pub fn current_home(&self) -> Result<String> {
        self.read(JAVA_HOME)
    }

    /// Current `PATH`, empty when unset
    pub fn current_path(&self) -> Result<String> {
        self.read(PATH)
    }

    /// Which registered version `JAVA_HOME` points at
    pub fn current_status(&self) -> Result<ActiveVersion> {
        status::current_status(self.registry, &self.store, self.scope)
    }

    pub fn status_report(&self) -> Result<StatusReport> {
        status::status_report(self.registry, &self.store, self.scope, self.separator)
    }

    /// Compute the new JAVA_HOME and PATH for `label` without writing them
    pub fn plan(&self, label: &str) -> Result<SwitchPlan> {
        let entry = self.registry.resolve(label)?;
        let bin_dir = entry.bin_dir();

        let previous_home = self.current_home()?;
        let previous_path = self.current_path()?;
        let path = rebuild_path(&previous_path, &bin_dir.to_string_lossy(), self.separator);

        Ok(SwitchPlan {
            label: entry.label.clone(),
            scope: self.scope,
            previous_home,
            previous_path,
            java_home: entry.root_str(),
            path,
        })
    }

    /// Point JAVA_HOME and PATH at `label` and broadcast the change.
    ///
    /// JAVA_HOME is written first. If the PATH write then fails the store is
    /// left half-switched and [`JswitchError::PartialSwitch`] is returned;
    /// nothing is rolled back.
    pub fn switch_to(&self, label: &str) -> Result<SwitchResult> {
        let plan = self.plan(label)?;
        tracing::info!(
            "Switching to {} ({} scope): JAVA_HOME={}",
            plan.label,
            plan.scope,
            plan.java_home
        );
        tracing::debug!("PATH {} -> {}", plan.previous_path, plan.path);

        self.store
            .set(JAVA_HOME, &plan.java_home, self.scope)
            .map_err(|source| JswitchError::EnvironmentWrite {
                variable: JAVA_HOME.to_string(),
                scope: self.scope,
                source,
            })?;
        tracing::debug!("Wrote {JAVA_HOME}");

        if let Err(source) = self.store.set(PATH, &plan.path, self.scope) {
            tracing::error!("{JAVA_HOME} updated but {PATH} write failed: {source}");
            return Err(JswitchError::PartialSwitch {
                written: JAVA_HOME.to_string(),
                failed: PATH.to_string(),
                source,
            });
        }
        tracing::debug!("Wrote {PATH}");

        let notification = self.notifier.broadcast_environment_changed();
        if notification.is_failure() {
            tracing::warn!("Environment change broadcast {notification}");
        } else {
            tracing::debug!("Environment change broadcast {notification}");
        }

        Ok(SwitchResult {
            label: plan.label,
            java_home: plan.java_home,
            path: plan.path,
            notification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{RecordingNotifier, sample_registry};
    use crate::environment::MemoryStore;
    use crate::runtimes::notifier::NoopNotifier;
    use crate::runtimes::path_list::is_java_segment;
    use crate::runtimes::registry::VersionEntry;

    fn scenario_store() -> MemoryStore {
        MemoryStore::new()
            .with_var(JAVA_HOME, "/opt/jdk8")
            .with_var(PATH, "/opt/jdk8/bin;/usr/bin")
    }

    #[cfg(unix)]
    #[test]
    fn test_switch_scenario() {
        let registry = sample_registry();
        let store = scenario_store();
        let notifier = RecordingNotifier::acknowledging();
        let switcher = EnvironmentSwitcher::new(&registry, &store, &notifier).with_separator(';');

        let result = switcher.switch_to("Java17").unwrap();

        assert_eq!(result.label, "Java17");
        assert!(result.notified());
        assert_eq!(store.value(JAVA_HOME).as_deref(), Some("/opt/jdk17"));
        assert_eq!(store.value(PATH).as_deref(), Some("/opt/jdk17/bin;/usr/bin"));
        assert_eq!(notifier.calls(), 1);
    }

    #[test]
    fn test_every_label_round_trips_through_store() {
        let registry = sample_registry();
        let store = scenario_store();
        let switcher =
            EnvironmentSwitcher::new(&registry, &store, RecordingNotifier::acknowledging())
                .with_separator(';');

        for entry in registry.entries() {
            switcher.switch_to(&entry.label).unwrap();
            assert_eq!(switcher.current_home().unwrap(), entry.root_str());
            assert_eq!(
                switcher.current_status().unwrap(),
                ActiveVersion::Known(entry.label.clone())
            );

            let path = switcher.current_path().unwrap();
            let mut segments = path.split(';');
            assert_eq!(
                segments.next(),
                Some(entry.bin_dir().to_string_lossy().as_ref())
            );
            assert!(segments.all(|s| !is_java_segment(s)));
        }
    }

    #[test]
    fn test_switch_is_idempotent() {
        let registry = sample_registry();
        let store = scenario_store();
        let switcher = EnvironmentSwitcher::new(&registry, &store, NoopNotifier)
            .with_separator(';');

        switcher.switch_to("Java11").unwrap();
        let once = (store.value(JAVA_HOME), store.value(PATH));
        switcher.switch_to("Java11").unwrap();
        let twice = (store.value(JAVA_HOME), store.value(PATH));

        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_label_writes_nothing() {
        let registry = sample_registry();
        let store = scenario_store();
        let notifier = RecordingNotifier::acknowledging();
        let switcher = EnvironmentSwitcher::new(&registry, &store, &notifier).with_separator(';');

        let err = switcher.switch_to("Java99").unwrap_err();

        assert!(matches!(err, JswitchError::UnknownVersion(ref l) if l == "Java99"));
        assert!(store.write_log().is_empty());
        assert_eq!(store.value(JAVA_HOME).as_deref(), Some("/opt/jdk8"));
        assert_eq!(store.value(PATH).as_deref(), Some("/opt/jdk8/bin;/usr/bin"));
        assert_eq!(notifier.calls(), 0);
    }

    #[test]
    fn test_path_write_failure_is_partial_switch() {
        let registry = sample_registry();
        let store = scenario_store();
        store.fail_writes_to(PATH);
        let notifier = RecordingNotifier::acknowledging();
        let switcher = EnvironmentSwitcher::new(&registry, &store, &notifier).with_separator(';');

        let err = switcher.switch_to("Java17").unwrap_err();

        match err {
            JswitchError::PartialSwitch {
                written, failed, ..
            } => {
                assert_eq!(written, JAVA_HOME);
                assert_eq!(failed, PATH);
            }
            other => panic!("expected PartialSwitch, got {other:?}"),
        }
        assert_eq!(switcher.current_home().unwrap(), registry.resolve("Java17").unwrap().root_str());
        assert_eq!(store.value(PATH).as_deref(), Some("/opt/jdk8/bin;/usr/bin"));
        assert_eq!(notifier.calls(), 0);
    }

    #[test]
    fn test_java_home_write_failure_is_clean_failure() {
        let registry = sample_registry();
        let store = scenario_store();
        store.fail_writes_to(JAVA_HOME);
        let switcher = EnvironmentSwitcher::new(&registry, &store, NoopNotifier);

        let err = switcher.switch_to("Java17").unwrap_err();

        assert!(matches!(
            err,
            JswitchError::EnvironmentWrite { ref variable, scope: Scope::Machine, .. } if variable == JAVA_HOME
        ));
        assert!(store.write_log().is_empty());
    }

    #[test]
    fn test_notification_failure_does_not_fail_switch() {
        let registry = sample_registry();
        let store = scenario_store();
        let notifier = RecordingNotifier::with_outcome(NotifyOutcome::TimedOut);
        let switcher = EnvironmentSwitcher::new(&registry, &store, &notifier);

        let result = switcher.switch_to("Java8").unwrap();

        assert!(!result.notified());
        assert_eq!(result.notification, NotifyOutcome::TimedOut);
        assert_eq!(store.value(JAVA_HOME).as_deref(), Some("/opt/jdk8"));
    }

    #[test]
    fn test_plan_does_not_write() {
        let registry = sample_registry();
        let store = scenario_store();
        let switcher = EnvironmentSwitcher::new(&registry, &store, NoopNotifier)
            .with_separator(';');

        let plan = switcher.plan("Java17").unwrap();

        assert_eq!(plan.previous_home, "/opt/jdk8");
        assert_eq!(plan.java_home, "/opt/jdk17");
        assert!(!plan.is_noop());
        assert!(store.write_log().is_empty());
    }

    #[test]
    fn test_unset_java_home_status() {
        let registry = sample_registry();
        let store = MemoryStore::new();
        let switcher = EnvironmentSwitcher::new(&registry, &store, NoopNotifier);

        assert_eq!(
            switcher.current_status().unwrap(),
            ActiveVersion::Unrecognized(String::new())
        );
    }

    #[test]
    fn test_scope_is_respected() {
        let registry =
            VersionRegistry::new(vec![VersionEntry::new("Java21", "/opt/jdk21")]).unwrap();
        let store = MemoryStore::new();
        let switcher =
            EnvironmentSwitcher::new(&registry, &store, NoopNotifier).with_scope(Scope::User);

        switcher.switch_to("Java21").unwrap();

        assert_eq!(store.value(JAVA_HOME), None);
        assert_eq!(
            store.get(JAVA_HOME, Scope::User).unwrap().as_deref(),
            Some("/opt/jdk21")
        );
    }
}
