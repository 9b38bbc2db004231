//! Shared helpers for jswitch integration tests

#![allow(dead_code)] // Not every test file uses every helper

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

// ═══════════════════════════════════════════════════════════════════════════════
// SANDBOX
// ═══════════════════════════════════════════════════════════════════════════════

/// A config file plus a machine environment file, both in a temp dir
pub struct Sandbox {
    pub dir: TempDir,
    pub config: PathBuf,
    pub env_file: PathBuf,
}

impl Sandbox {
    /// Sandbox with the three sample versions registered
    pub fn new() -> Self {
        Self::with_versions(&[
            ("Java8", "/opt/jdk8"),
            ("Java11", "/opt/jdk11"),
            ("Java17", "/opt/jdk17"),
        ])
    }

    pub fn with_versions(versions: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let config = dir.path().join("config.toml");
        let env_file = dir.path().join("environment");

        let mut toml = format!(
            "scope = \"machine\"\nauto_elevate = false\npath_separator = \":\"\nmachine_env_file = '{}'\n\n[versions]\n",
            env_file.display()
        );
        for (label, root) in versions {
            toml.push_str(&format!("{label} = '{root}'\n"));
        }
        fs::write(&config, toml).expect("write config");
        fs::write(&env_file, "").expect("write env file");

        Self {
            dir,
            config,
            env_file,
        }
    }

    /// Swap the PATH separator written by `with_versions`
    pub fn set_separator(&self, separator: char) {
        let config = fs::read_to_string(&self.config).expect("read config");
        let config = config.replace(
            "path_separator = \":\"",
            &format!("path_separator = \"{separator}\""),
        );
        fs::write(&self.config, config).expect("write config");
    }

    pub fn write_env(&self, contents: &str) {
        fs::write(&self.env_file, contents).expect("write env file");
    }

    pub fn read_env(&self) -> String {
        fs::read_to_string(&self.env_file).expect("read env file")
    }

    /// `jswitch --config <sandbox config>` with colors off
    pub fn cmd(&self) -> Command {
        let mut cmd = jswitch_cmd();
        cmd.arg("--config").arg(&self.config);
        cmd
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// The jswitch binary with colors and unicode turned off
pub fn jswitch_cmd() -> Command {
    let mut cmd = Command::cargo_bin("jswitch").expect("jswitch binary");
    cmd.env("NO_COLOR", "1")
        .env("JSWITCH_UNICODE", "0")
        .env_remove("JSWITCH_LOG")
        .env_remove("JSWITCH_CONFIG");
    cmd
}

/// Look up a variable in `KEY=VALUE` file contents
pub fn env_value<'a>(contents: &'a str, key: &str) -> Option<&'a str> {
    contents.lines().rev().find_map(|line| {
        let (k, v) = line.split_once('=')?;
        (k.trim() == key).then(|| v.trim().trim_matches('"'))
    })
}
