//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod asset;
pub mod completions;
pub mod context;
pub mod init;
pub mod scan;
pub mod status;

pub use args::OutputFormat;
pub use context::CommandContext;

/// breachlock-ci - Register assets and trigger live scans on the BreachLock Platform
#[derive(Parser, Debug)]
#[command(name = "breachlock-ci")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "BREACHLOCK_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "BREACHLOCK_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the BreachLock API host
    #[arg(long, global = true, env = "BREACHLOCK_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// BreachLock integration API key
    #[arg(
        long,
        global = true,
        env = "BREACHLOCK_API_KEY",
        hide_env_values = true
    )]
    pub api_key: Option<String>,

    /// Account email registered on the platform
    #[arg(long, global = true, env = "BREACHLOCK_EMAIL", hide_env = true)]
    pub email: Option<String>,

    /// Host id of the asset to register or scan
    #[arg(long, global = true, env = "BREACHLOCK_ASSET", hide_env = true)]
    pub asset: Option<String>,

    /// Authorization header value for the CI integration
    #[arg(
        long,
        global = true,
        env = "BREACHLOCK_CLIENT_KEY",
        hide_env_values = true
    )]
    pub client_key: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "BREACHLOCK_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactively configure credentials and register an asset
    Init,

    /// Show configuration status
    Status {
        /// Also check that the API host is reachable
        #[arg(long)]
        check: bool,
    },

    /// Display version information
    Version,

    /// List and register assets
    #[command(subcommand)]
    Asset(AssetCommands),

    /// Start a live scan for the configured asset
    #[command(after_help = "EXAMPLES:\n  \
            breachlock-ci scan                      # Asset from config file\n  \
            breachlock-ci scan --asset 1042         # Explicit asset\n  \
            BREACHLOCK_API_KEY=... breachlock-ci scan --asset 1042 --format json\n\n\
            The command exits successfully even when the scan could not be started,\n\
            so a CI job is never failed by the scan trigger.")]
    Scan,

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Asset subcommands
#[derive(Subcommand, Debug)]
pub enum AssetCommands {
    /// List the assets available to the configured account
    #[command(visible_alias = "ls")]
    List,

    /// Register the CI integration for an asset
    Register,
}
