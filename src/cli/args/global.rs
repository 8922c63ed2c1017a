//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};
use crate::client::Secret;
use crate::config::Config;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; [`GlobalOptions::apply_to`] layers it over a
/// loaded [`Config`].
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format (table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.breachlock/config.yaml)
    pub config: Option<String>,

    /// Custom API host for development/testing
    pub api_host: Option<String>,

    /// API key override
    pub api_key: Option<Secret>,

    /// Account email override
    pub email: Option<String>,

    /// Asset host id override
    pub asset: Option<String>,

    /// Client key override
    pub client_key: Option<Secret>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_host: cli.api_host.clone(),
            api_key: cli.api_key.clone().map(Secret::from),
            email: cli.email.clone(),
            asset: cli.asset.clone(),
            client_key: cli.client_key.clone().map(Secret::from),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Overlay the CLI/env values onto a loaded config
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(host) = &self.api_host {
            config.api_host = Some(host.clone());
        }
        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(email) = &self.email {
            config.email = Some(email.clone());
        }
        if let Some(asset) = &self.asset {
            config.asset = Some(asset.clone());
        }
        if let Some(key) = &self.client_key {
            config.client_key = Some(key.clone());
        }
    }
}
