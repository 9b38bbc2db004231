//! jswitch CLI Binary
//!
//! Switches the active Java installation.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jswitch_lib::cli::{Cli, CliContext, Commands, ConfigCommands, commands, style};
use jswitch_lib::config::Settings;
use jswitch_lib::core::{JswitchError, format_error_with_suggestion, suggest_for_anyhow};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_env("JSWITCH_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // These must work without a valid config file
    match &cli.command {
        Some(Commands::Completions { shell }) => {
            commands::completions(*shell);
            return Ok(());
        }
        Some(Commands::Config { command }) => {
            let path = Settings::config_path(cli.config.as_deref());
            return match command {
                ConfigCommands::Path => {
                    commands::config_path(&path);
                    Ok(())
                }
                ConfigCommands::Show => commands::config_show(&path, cli.scope),
                ConfigCommands::Init { force } => commands::config_init(&path, *force),
            };
        }
        _ => {}
    }

    let ctx = CliContext::load(&cli)?;

    match cli.command {
        None => commands::status(&ctx, false),
        Some(Commands::Status { json }) => commands::status(&ctx, json),
        Some(Commands::Use {
            label,
            dry_run,
            no_elevate,
            json,
        }) => commands::use_version(&ctx, label.as_deref(), dry_run, no_elevate, json),
        Some(Commands::Pick { no_elevate }) => commands::pick(&ctx, no_elevate),
        Some(Commands::List { json }) => commands::list(&ctx, json),
        Some(Commands::Config { .. } | Commands::Completions { .. }) => Ok(()),
    }
}

fn report(err: &anyhow::Error) {
    if err.chain().count() == 1
        && let Some(root) = err.downcast_ref::<JswitchError>()
    {
        eprintln!("{}", format_error_with_suggestion(root));
        return;
    }

    eprintln!("{}", style::error(&format!("{err:#}")));
    if let Some(suggestion) = suggest_for_anyhow(err) {
        eprintln!("\n💡 {suggestion}");
    }
}
