//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// toJot - notes, and keeping toJot itself up to date
#[derive(Parser, Debug)]
#[command(name = "tojot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding updater.yaml (default: ~/.tojot)
    #[arg(long, global = true, env = "TOJOT_CONFIG_DIR")]
    pub config_dir: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version(VersionArgs),

    /// Check for, download and install updates
    #[command(subcommand)]
    Update(UpdateCommands),

    /// Start up and run the deferred update check
    Run,
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Update commands
#[derive(Subcommand, Debug)]
pub enum UpdateCommands {
    /// Check whether a newer release is available
    Check(UpdateCheckArgs),

    /// Download the release artifact for this platform
    Download,

    /// Download and install the latest release
    Install(UpdateInstallArgs),
}

#[derive(Args, Debug)]
pub struct UpdateCheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct UpdateInstallArgs {
    /// Skip confirmation prompts
    #[arg(short, long)]
    pub yes: bool,
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
    fn test_parse_update_install_yes() {
        let cli = Cli::try_parse_from(["tojot", "-q", "update", "install", "--yes"]).unwrap();
        assert!(cli.quiet);
        match cli.command {
            Commands::Update(UpdateCommands::Install(args)) => assert!(args.yes),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_config_dir() {
        let cli =
            Cli::try_parse_from(["tojot", "update", "check", "--config-dir", "/tmp/tojot"]).unwrap();
        assert_eq!(cli.config_dir.as_deref().map(|p| p.as_str()), Some("/tmp/tojot"));
    }
}
