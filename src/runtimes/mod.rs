//! Java runtime registry, detection and switching

mod notifier;
pub mod path_list;
mod registry;
pub mod status;
mod switcher;

pub use notifier::{ChangeNotifier, NoopNotifier, NotifyOutcome, platform_notifier};
#[cfg(windows)]
pub use notifier::SettingChangeBroadcast;
pub use registry::{VersionEntry, VersionRegistry};
pub use status::{StatusReport, current_status};
pub use switcher::{EnvironmentSwitcher, SwitchPlan, SwitchResult};
