//! Environment-change broadcast
//!
//! After JAVA_HOME/PATH are rewritten, already-running programs (Explorer,
//! new terminals spawned from it) only see the new values once they are told
//! the environment changed. On Windows that is a `WM_SETTINGCHANGE`
//! broadcast; other platforms have no equivalent.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// Result of a best-effort change broadcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "kebab-case")]
pub enum NotifyOutcome {
    Acknowledged,
    TimedOut,
    Failed(String),
    NotApplicable,
}

impl NotifyOutcome {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Acknowledged)
    }

    /// Broadcast was attempted and did not go through
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::TimedOut | Self::Failed(_))
    }
}

impl fmt::Display for NotifyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Acknowledged => write!(f, "acknowledged"),
            Self::TimedOut => write!(f, "timed out"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
            Self::NotApplicable => write!(f, "not applicable on this platform"),
        }
    }
}

/// Tells the OS session that environment variables changed
pub trait ChangeNotifier {
    /// Never blocks past its timeout and never fails the caller
    fn broadcast_environment_changed(&self) -> NotifyOutcome;
}

impl<T: ChangeNotifier + ?Sized> ChangeNotifier for &T {
    fn broadcast_environment_changed(&self) -> NotifyOutcome {
        (**self).broadcast_environment_changed()
    }
}

impl<T: ChangeNotifier + ?Sized> ChangeNotifier for Box<T> {
    fn broadcast_environment_changed(&self) -> NotifyOutcome {
        (**self).broadcast_environment_changed()
    }
}

/// Notifier for platforms without a broadcast primitive
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl ChangeNotifier for NoopNotifier {
    fn broadcast_environment_changed(&self) -> NotifyOutcome {
        NotifyOutcome::NotApplicable
    }
}

/// `WM_SETTINGCHANGE("Environment")` sent to all top-level windows
#[cfg(windows)]
#[derive(Debug, Clone, Copy)]
pub struct SettingChangeBroadcast {
    timeout: Duration,
}

#[cfg(windows)]
impl SettingChangeBroadcast {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[cfg(windows)]
impl ChangeNotifier for SettingChangeBroadcast {
    fn broadcast_environment_changed(&self) -> NotifyOutcome {
        use windows_sys::Win32::Foundation::ERROR_TIMEOUT;
        use windows_sys::Win32::UI::WindowsAndMessaging::{
            HWND_BROADCAST, SMTO_ABORTIFHUNG, SendMessageTimeoutW, WM_SETTINGCHANGE,
        };

        let area: Vec<u16> = "Environment".encode_utf16().chain(Some(0)).collect();
        let timeout_ms = u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX);
        let mut result = 0usize;

        let sent = unsafe {
            SendMessageTimeoutW(
                HWND_BROADCAST,
                WM_SETTINGCHANGE,
                0,
                area.as_ptr() as isize,
                SMTO_ABORTIFHUNG,
                timeout_ms,
                &mut result,
            )
        };

        if sent != 0 {
            return NotifyOutcome::Acknowledged;
        }

        let err = std::io::Error::last_os_error();
        if err.raw_os_error() == Some(ERROR_TIMEOUT as i32) {
            NotifyOutcome::TimedOut
        } else {
            NotifyOutcome::Failed(err.to_string())
        }
    }
}

/// The broadcast mechanism for the current platform
#[cfg(windows)]
pub fn platform_notifier(timeout: Duration) -> Box<dyn ChangeNotifier> {
    Box::new(SettingChangeBroadcast::new(timeout))
}

/// The broadcast mechanism for the current platform
#[cfg(not(windows))]
pub fn platform_notifier(timeout: Duration) -> Box<dyn ChangeNotifier> {
    tracing::trace!("No environment broadcast on this platform (timeout {timeout:?} unused)");
    Box::new(NoopNotifier)
}
