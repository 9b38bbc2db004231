//! Persistent environment variable stores
//!
//! Every read and write of `JAVA_HOME` / `PATH` goes through [`EnvironmentStore`],
//! so the switcher never touches host state directly.

use std::io;

use crate::config::Settings;
use crate::core::Scope;

#[cfg(unix)]
mod env_file;
mod memory;
#[cfg(windows)]
mod registry;

#[cfg(unix)]
pub use env_file::{DEFAULT_SYSTEM_PATH, EnvFileStore};
pub use memory::MemoryStore;
#[cfg(windows)]
pub use registry::RegistryStore;

/// Named-variable access at a given visibility scope
pub trait EnvironmentStore {
    /// Read a variable. `Ok(None)` means the variable is not set.
    fn get(&self, variable: &str, scope: Scope) -> io::Result<Option<String>>;

    /// Persist a variable, replacing any previous value
    fn set(&self, variable: &str, value: &str, scope: Scope) -> io::Result<()>;
}

impl<T: EnvironmentStore + ?Sized> EnvironmentStore for &T {
    fn get(&self, variable: &str, scope: Scope) -> io::Result<Option<String>> {
        (**self).get(variable, scope)
    }

    fn set(&self, variable: &str, value: &str, scope: Scope) -> io::Result<()> {
        (**self).set(variable, value, scope)
    }
}

impl<T: EnvironmentStore + ?Sized> EnvironmentStore for Box<T> {
    fn get(&self, variable: &str, scope: Scope) -> io::Result<Option<String>> {
        (**self).get(variable, scope)
    }

    fn set(&self, variable: &str, value: &str, scope: Scope) -> io::Result<()> {
        (**self).set(variable, value, scope)
    }
}

/// The host's persistent store for this platform
#[cfg(windows)]
pub fn system_store(_settings: &Settings) -> Box<dyn EnvironmentStore> {
    Box::new(RegistryStore)
}

/// The host's persistent store for this platform
#[cfg(unix)]
pub fn system_store(settings: &Settings) -> Box<dyn EnvironmentStore> {
    Box::new(EnvFileStore::new(settings.machine_env_file.clone()))
}
