//! Registry fixtures

use crate::runtimes::{VersionEntry, VersionRegistry};

/// Label/root pairs used across the test suites
pub const SAMPLE_VERSIONS: &[(&str, &str)] = &[
    ("Java8", "/opt/jdk8"),
    ("Java11", "/opt/jdk11"),
    ("Java17", "/opt/jdk17"),
];

/// Shaped like a real Windows layout, including a 32-bit JDK and a bare JRE
pub const WINDOWS_VERSIONS: &[(&str, &str)] = &[
    ("Java7", r"D:\java\jre-7u5--i586"),
    ("Java8_32", r"D:\java\jdk8_32"),
    ("Java8", r"D:\java\jdk-8u361"),
    ("Java11", r"D:\java\jdk-11.0.23"),
    ("Java17", r"D:\java\jdk-17.0.12"),
    ("Java25", r"D:\java\jdk-25.0.1"),
];

/// Build a registry from label/root pairs
#[allow(clippy::expect_used)] // Fixture data is known-valid
pub fn registry_of(pairs: &[(&str, &str)]) -> VersionRegistry {
    VersionRegistry::new(
        pairs
            .iter()
            .map(|(label, root)| VersionEntry::new(*label, *root))
            .collect(),
    )
    .expect("fixture registry is valid")
}

/// Java8 / Java11 / Java17 under /opt
pub fn sample_registry() -> VersionRegistry {
    registry_of(SAMPLE_VERSIONS)
}
