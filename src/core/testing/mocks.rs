//! Mock implementations for testing

use std::sync::Arc;

use parking_lot::Mutex;

use crate::runtimes::{ChangeNotifier, NotifyOutcome};

/// Change notifier that counts broadcasts and returns a configurable outcome
#[derive(Debug, Clone)]
pub struct RecordingNotifier {
    outcome: Arc<Mutex<NotifyOutcome>>,
    calls: Arc<Mutex<usize>>,
}

impl RecordingNotifier {
    /// Notifier whose broadcasts always return `outcome`
    pub fn with_outcome(outcome: NotifyOutcome) -> Self {
        Self {
            outcome: Arc::new(Mutex::new(outcome)),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Every broadcast is acknowledged
    pub fn acknowledging() -> Self {
        Self::with_outcome(NotifyOutcome::Acknowledged)
    }

    /// Change the outcome of future broadcasts
    pub fn set_outcome(&self, outcome: NotifyOutcome) {
        *self.outcome.lock() = outcome;
    }

    /// Number of broadcasts so far
    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

impl ChangeNotifier for RecordingNotifier {
    fn broadcast_environment_changed(&self) -> NotifyOutcome {
        *self.calls.lock() += 1;
        self.outcome.lock().clone()
    }
}
