//! Consistent styling utilities for jswitch CLI output
//!
//! - **`NO_COLOR` support**: Respects the [NO_COLOR standard](https://no-color.org/)
//! - **TTY detection**: Auto-detects terminal capabilities

use std::env;

use owo_colors::OwoColorize;
use supports_color::Stream;

/// Detect if colors should be enabled
#[must_use]
pub fn colors_enabled() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if let Ok(val) = env::var("JSWITCH_COLORS") {
        if val == "never" || val == "0" || val == "false" {
            return false;
        }
        if val == "always" || val == "1" || val == "true" {
            return true;
        }
    }

    supports_color::on(Stream::Stdout).is_some_and(|level| level.has_basic)
}

/// Check if a human is at the terminal (interactive prompts are possible)
#[must_use]
pub fn is_tty() -> bool {
    console::user_attended()
}

/// Check if unicode icons should be used
#[must_use]
pub fn use_unicode() -> bool {
    if let Ok(val) = env::var("JSWITCH_UNICODE") {
        return val != "0" && val != "false";
    }
    colors_enabled()
}

/// Apply color only if colors are enabled
#[inline]
#[must_use]
pub fn maybe_color(text: &str, f: impl Fn(&str) -> String) -> String {
    if colors_enabled() {
        f(text)
    } else {
        text.to_string()
    }
}

/// Get an icon (unicode or ASCII fallback)
#[inline]
#[must_use]
pub fn icon(unicode: &str, ascii: &str) -> String {
    if use_unicode() {
        unicode.to_string()
    } else {
        ascii.to_string()
    }
}

/// Error message with X
#[must_use]
pub fn error(msg: &str) -> String {
    format!("{} {}", maybe_color(&icon("✗", "X"), |i| i.red().bold().to_string()), msg)
}

/// Dimmed/muted text
#[must_use]
pub fn dim(msg: &str) -> String {
    maybe_color(msg, |m| m.dimmed().to_string())
}

/// Inline code/command formatting
#[must_use]
pub fn command(cmd: &str) -> String {
    maybe_color(cmd, |c| format!("`{}`", c.cyan()))
}

/// File path formatting
#[must_use]
pub fn path(p: &str) -> String {
    maybe_color(p, |p| p.blue().to_string())
}

/// Version label formatting
#[must_use]
pub fn version(label: &str) -> String {
    maybe_color(label, |v| v.green().bold().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_no_color_disables_styling() {
        temp_env::with_var("NO_COLOR", Some("1"), || {
            assert!(!colors_enabled());
            assert_eq!(version("Java17"), "Java17");
            assert_eq!(command("jswitch list"), "jswitch list");
        });
    }

    #[test]
    #[serial]
    fn test_ascii_icons_without_unicode() {
        temp_env::with_vars(
            [("NO_COLOR", Some("1")), ("JSWITCH_UNICODE", Some("0"))],
            || {
                assert_eq!(icon("✓", "OK"), "OK");
                assert_eq!(error("boom"), "X boom");
            },
        );
    }

    #[test]
    #[serial]
    fn test_forced_colors() {
        temp_env::with_vars(
            [("NO_COLOR", None), ("JSWITCH_COLORS", Some("always"))],
            || {
                assert!(colors_enabled());
                assert_ne!(version("Java17"), "Java17");
            },
        );
    }
}
