//! Charm-inspired UI primitives for the jswitch CLI
//!
//! Provides headers, status lines, tips and the version table.
//! Implements a small "Lip Gloss" style builder on top of owo-colors.

use std::fmt::Display;

use owo_colors::OwoColorize;

use crate::cli::style;
use crate::runtimes::VersionEntry;

/// Color palette matching standard TUI needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Cyan,
    Yellow,
    Black,
    Gray,
}

/// A builder-pattern style struct mimicking Lip Gloss
#[derive(Debug, Clone, Default)]
pub struct Style {
    fg: Option<Color>,
    bg: Option<Color>,
    is_bold: bool,
    is_italic: bool,
    padding: usize,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn foreground(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub fn background(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    #[must_use]
    pub fn bold(mut self, yes: bool) -> Self {
        self.is_bold = yes;
        self
    }

    #[must_use]
    pub fn italic(mut self, yes: bool) -> Self {
        self.is_italic = yes;
        self
    }

    #[must_use]
    pub fn padding(mut self, n: usize) -> Self {
        self.padding = n;
        self
    }

    pub fn render<S: Display>(&self, text: S) -> String {
        let s = text.to_string();
        let pad = " ".repeat(self.padding);

        if !style::colors_enabled() {
            return format!("{pad}{s}{pad}");
        }

        let mut styled = match self.fg {
            Some(Color::Red) => s.red().to_string(),
            Some(Color::Green) => s.green().to_string(),
            Some(Color::Cyan) => s.cyan().to_string(),
            Some(Color::Yellow) => s.yellow().to_string(),
            Some(Color::Black) => s.black().to_string(),
            Some(Color::Gray) => s.white().dimmed().to_string(),
            None => s,
        };

        if let Some(bg) = self.bg {
            styled = match bg {
                Color::Red => styled.on_red().to_string(),
                Color::Green => styled.on_green().to_string(),
                Color::Cyan => styled.on_cyan().to_string(),
                Color::Yellow => styled.on_yellow().to_string(),
                Color::Black | Color::Gray => styled.on_black().to_string(),
            };
        }

        if self.is_bold {
            styled = styled.bold().to_string();
        }
        if self.is_italic {
            styled = styled.italic().to_string();
        }

        format!("{pad}{styled}{pad}")
    }
}

/// A professional instructional tip to guide the user.
pub fn print_tip(msg: &str) {
    let style = Style::new().foreground(Color::Gray).italic(true);
    let label_style = Style::new().foreground(Color::Gray).italic(true).bold(true);
    println!("\n  {} {}", label_style.render("Tip:"), style.render(msg));
}

/// A high-contrast contextual header.
pub fn print_header(context: &str, title: &str) {
    let ctx_style = Style::new()
        .background(Color::Cyan)
        .foreground(Color::Black)
        .bold(true)
        .padding(1);

    println!(
        "\n{} {}\n",
        ctx_style.render(context),
        Style::new().bold(true).render(title)
    );
}

pub fn print_success(msg: impl Display) {
    let icon_style = Style::new().foreground(Color::Green).bold(true);
    println!("  {} {}", icon_style.render(style::icon("✓", "OK")), msg);
}

pub fn print_warning(msg: impl Display) {
    let icon_style = Style::new().foreground(Color::Yellow).bold(true);
    println!("  {} {}", icon_style.render(style::icon("⚠", "!")), msg);
}

/// Dry-run footer: confirms no mutations occurred.
pub fn print_dry_run_footer() {
    println!(
        "\n  {} No changes made (dry run)",
        style::dim(&style::icon("ℹ", "i"))
    );
}

/// Print a key-value pair with consistent formatting.
pub fn print_kv(key: &str, value: &str) {
    let key_style = Style::new().foreground(Color::Gray);
    println!("  {:>14}: {}", key_style.render(key), value);
}

/// Get a themed `ColorfulTheme` for dialoguer prompts.
pub fn prompt_theme() -> dialoguer::theme::ColorfulTheme {
    use dialoguer::theme::ColorfulTheme;
    ColorfulTheme {
        defaults_style: console::Style::new().dim(),
        prompt_style: console::Style::new().bold(),
        prompt_prefix: console::style("  ?".to_string()).cyan().bold(),
        success_prefix: console::style("  ✓".to_string()).green().bold(),
        active_item_style: console::Style::new().cyan().bold(),
        active_item_prefix: console::style("  ❯".to_string()).cyan().bold(),
        inactive_item_prefix: console::style("   ".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Table of configured versions with the active one marked
pub fn versions_table(entries: &[VersionEntry], active: Option<&str>) -> comfy_table::Table {
    use comfy_table::modifiers::UTF8_ROUND_CORNERS;
    use comfy_table::presets::{ASCII_FULL, UTF8_FULL};
    use comfy_table::{ContentArrangement, Table};

    let mut table = Table::new();
    table
        .load_preset(if style::use_unicode() { UTF8_FULL } else { ASCII_FULL })
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["", "Label", "Install root"]);
    if style::use_unicode() {
        table.apply_modifier(UTF8_ROUND_CORNERS);
    }

    for entry in entries {
        let is_active = active == Some(entry.label.as_str());
        let marker = if is_active {
            Style::new()
                .foreground(Color::Green)
                .bold(true)
                .render(style::icon("●", "*"))
        } else {
            String::new()
        };
        let label = if is_active {
            style::version(&entry.label)
        } else {
            entry.label.clone()
        };
        table.add_row(vec![marker, label, entry.root_str()]);
    }

    table
}
