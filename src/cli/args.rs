//! Command-line argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::Scope;

/// jswitch - switch the machine-wide Java installation
///
/// Rewrites JAVA_HOME and PATH to one of the Java versions listed in the
/// config file, then tells running programs the environment changed.
#[derive(Parser, Debug)]
#[command(name = "jswitch")]
#[command(version)]
#[command(about = "Switch the machine-wide Java installation", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the configured variable scope
    #[arg(long, global = true, value_enum)]
    pub scope: Option<Scope>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show which Java version is active (default)
    #[command(visible_alias = "st")]
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Switch to a configured Java version (e.g., jswitch use Java17)
    #[command(disable_version_flag = true)]
    Use {
        /// Version label from the config file. If omitted, opens a picker.
        label: Option<String>,
        /// Show what would be written without changing anything
        #[arg(short = 'n', long)]
        dry_run: bool,
        /// Don't re-launch with sudo / UAC when not elevated
        #[arg(long)]
        no_elevate: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pick a version interactively
    Pick {
        /// Don't re-launch with sudo / UAC when not elevated
        #[arg(long)]
        no_elevate: bool,
    },

    /// List configured Java versions
    #[command(visible_alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,
    /// Print the effective configuration
    Show,
    /// Write a commented starter config
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_use_with_flags() {
        let cli = Cli::try_parse_from(["jswitch", "use", "Java17", "--dry-run", "--no-elevate"])
            .unwrap();
        match cli.command {
            Some(Commands::Use {
                label,
                dry_run,
                no_elevate,
                json,
            }) => {
                assert_eq!(label.as_deref(), Some("Java17"));
                assert!(dry_run);
                assert!(no_elevate);
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["jswitch", "list", "--scope", "user", "-vv"]).unwrap();
        assert_eq!(cli.scope, Some(Scope::User));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["jswitch"]).unwrap();
        assert!(cli.command.is_none());
    }
}
