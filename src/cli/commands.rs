//! Command handlers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::CommandFactory;

use crate::cli::json_output::{ListResult, print_json};
use crate::cli::{Cli, style, ui};
use crate::config::{CONFIG_TEMPLATE, Settings};
use crate::core::{ActiveVersion, Scope, elevate, is_elevated, relaunch_args};
use crate::environment::{EnvironmentStore, system_store};
use crate::runtimes::{
    ChangeNotifier, EnvironmentSwitcher, NotifyOutcome, StatusReport, SwitchResult,
    VersionRegistry, platform_notifier,
};

/// Loaded configuration plus the host-backed store and notifier
pub struct CliContext {
    pub config_path: PathBuf,
    pub settings: Settings,
    pub registry: VersionRegistry,
    store: Box<dyn EnvironmentStore>,
    notifier: Box<dyn ChangeNotifier>,
}

type HostSwitcher<'a> =
    EnvironmentSwitcher<'a, &'a dyn EnvironmentStore, &'a dyn ChangeNotifier>;

impl CliContext {
    /// Load settings and registry, applying CLI overrides
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = Settings::config_path(cli.config.as_deref());
        let mut settings = Settings::load_from(&config_path)?;
        if let Some(scope) = cli.scope {
            settings.scope = scope;
        }
        tracing::debug!(
            "Loaded {} version(s) from {}",
            settings.versions.len(),
            config_path.display()
        );

        let registry = VersionRegistry::from_settings(&settings)?;
        let store = system_store(&settings);
        let notifier = platform_notifier(settings.notify_timeout());

        Ok(Self {
            config_path,
            settings,
            registry,
            store,
            notifier,
        })
    }

    fn switcher(&self) -> HostSwitcher<'_> {
        EnvironmentSwitcher::new(&self.registry, &*self.store, &*self.notifier)
            .with_scope(self.settings.scope)
            .with_separator(self.settings.separator())
    }

    /// Re-launch elevated if this write needs it and we're allowed to
    fn ensure_privileges(&self, no_elevate: bool) -> Result<()> {
        if self.settings.scope != Scope::Machine || is_elevated() {
            return Ok(());
        }
        if no_elevate || !self.settings.auto_elevate {
            tracing::warn!("Not elevated; machine-scope writes will probably be rejected");
            return Ok(());
        }

        let args = relaunch_args(
            std::env::args_os().skip(1),
            &self.config_path,
            self.settings.scope,
        );
        tracing::info!("Re-launching with elevated privileges: {args:?}");
        elevate(&args).context("Failed to elevate privileges")
    }

    fn print_empty_registry_tip(&self) {
        ui::print_warning("No Java versions configured");
        ui::print_tip(&format!(
            "Add entries under [versions] in {} (create it with {})",
            style::path(&self.config_path.display().to_string()),
            style::command("jswitch config init")
        ));
    }
}

/// Show the active version
pub fn status(ctx: &CliContext, json: bool) -> Result<()> {
    let report = ctx.switcher().status_report()?;

    if json {
        print_json(&report);
        return Ok(());
    }

    print_status(&report);
    if ctx.registry.is_empty() {
        ctx.print_empty_registry_tip();
    }
    Ok(())
}

fn print_status(report: &StatusReport) {
    ui::print_header("jswitch", "Active Java");
    match &report.active {
        ActiveVersion::Known(label) => ui::print_success(style::version(label)),
        active if active.is_unset() => ui::print_warning("No Java configured"),
        _ => ui::print_warning("Unmanaged installation (not in the config file)"),
    }

    let home = if report.java_home.is_empty() {
        style::dim("(unset)")
    } else {
        style::path(&report.java_home)
    };
    ui::print_kv("JAVA_HOME", &home);
    ui::print_kv("scope", &report.scope.to_string());

    if report.java_path_entries.is_empty() {
        ui::print_kv("PATH (java)", &style::dim("(none)"));
    } else {
        for (i, entry) in report.java_path_entries.iter().enumerate() {
            let key = if i == 0 { "PATH (java)" } else { "" };
            ui::print_kv(key, &style::path(entry));
        }
    }
}

/// List configured versions
pub fn list(ctx: &CliContext, json: bool) -> Result<()> {
    let active = ctx.switcher().current_status()?;

    if json {
        print_json(&ListResult::new(&ctx.registry, active));
        return Ok(());
    }

    if ctx.registry.is_empty() {
        ctx.print_empty_registry_tip();
        return Ok(());
    }

    println!(
        "{}",
        ui::versions_table(ctx.registry.entries(), active.label())
    );
    Ok(())
}

/// Switch to `label`, or to a picked version when `label` is `None`
pub fn use_version(
    ctx: &CliContext,
    label: Option<&str>,
    dry_run: bool,
    no_elevate: bool,
    json: bool,
) -> Result<()> {
    if !dry_run {
        ctx.ensure_privileges(no_elevate)?;
    }

    let label = match label {
        Some(label) => label.to_string(),
        None => pick_label(ctx)?,
    };
    let switcher = ctx.switcher();

    if dry_run {
        let plan = switcher.plan(&label)?;
        if json {
            print_json(&plan);
            return Ok(());
        }
        ui::print_header("jswitch", &format!("Plan: switch to {}", plan.label));
        ui::print_kv("JAVA_HOME", &format!("{} -> {}", plan.previous_home, plan.java_home));
        ui::print_kv("PATH", &plan.path);
        if plan.is_noop() {
            ui::print_success("Already active, nothing would change");
        }
        ui::print_dry_run_footer();
        return Ok(());
    }

    let result = switcher
        .switch_to(&label)
        .with_context(|| format!("Failed to switch to {label}"))?;

    if json {
        print_json(&result);
    } else {
        print_switch_result(&result, ctx.settings.separator());
    }
    Ok(())
}

fn print_switch_result(result: &SwitchResult, separator: char) {
    ui::print_header("jswitch", &format!("Switched to {}", result.label));
    ui::print_success(format!("Now using {}", style::version(&result.label)));
    ui::print_kv("JAVA_HOME", &style::path(&result.java_home));
    if let Some(first) = result.path.split(separator).next() {
        ui::print_kv("PATH[0]", &style::path(first));
    }

    match &result.notification {
        NotifyOutcome::Acknowledged => ui::print_success("Running programs were notified"),
        NotifyOutcome::NotApplicable => {
            ui::print_tip("Log out and back in (or open a new login shell) to pick up the change");
        }
        outcome => {
            ui::print_warning(format!(
                "Could not notify running programs ({outcome}); restart them to pick up the change"
            ));
        }
    }
}

/// Interactive picker, then switch
pub fn pick(ctx: &CliContext, no_elevate: bool) -> Result<()> {
    use_version(ctx, None, false, no_elevate, false)
}

fn pick_label(ctx: &CliContext) -> Result<String> {
    if ctx.registry.is_empty() {
        ctx.print_empty_registry_tip();
        anyhow::bail!("No Java versions to choose from");
    }
    if !style::is_tty() {
        anyhow::bail!("No version label given and stdin is not a terminal");
    }

    let active = ctx.switcher().current_status()?;
    let items: Vec<String> = ctx
        .registry
        .entries()
        .iter()
        .map(|e| {
            if active.label() == Some(e.label.as_str()) {
                format!("{}  {} (current)", e.label, style::dim(&e.root_str()))
            } else {
                format!("{}  {}", e.label, style::dim(&e.root_str()))
            }
        })
        .collect();
    let default = active
        .label()
        .and_then(|l| ctx.registry.labels().iter().position(|x| *x == l))
        .unwrap_or(0);

    let selection = dialoguer::Select::with_theme(&ui::prompt_theme())
        .with_prompt("Switch Java to")
        .items(&items)
        .default(default)
        .interact()
        .context("Version selection cancelled")?;

    Ok(ctx.registry.entries()[selection].label.clone())
}

/// Print the config file location
pub fn config_path(path: &Path) {
    println!("{}", path.display());
}

/// Print the effective configuration as TOML
pub fn config_show(path: &Path, scope: Option<Scope>) -> Result<()> {
    let mut settings = Settings::load_from(path)?;
    if let Some(scope) = scope {
        settings.scope = scope;
    }
    print!("{}", settings.to_toml()?);
    Ok(())
}

/// Write the starter config.
///
/// Doesn't parse an existing file, so `--force` can replace a broken one.
pub fn config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    ui::print_success(format!(
        "Wrote {}",
        style::path(&path.display().to_string())
    ));
    ui::print_tip("Uncomment or add entries under [versions], then run: jswitch list");
    Ok(())
}

/// Print shell completions to stdout
pub fn completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "jswitch", &mut std::io::stdout());
}
