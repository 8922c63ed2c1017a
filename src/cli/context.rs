//! Command execution context
//!
//! Loads configuration, layers the CLI/env overrides on top and builds the
//! orchestrator, so command handlers only deal with their own operation.

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{BreachLockClient, Secret};
use crate::config::Config;
use crate::error::Result;
use crate::scan::ScanOrchestrator;
use crate::validation;

/// Context for command execution containing config, orchestrator, and runtime options.
pub struct CommandContext {
    /// Resolved configuration (file + overrides)
    pub config: Config,
    /// Orchestrator over the real API client
    pub orchestrator: ScanOrchestrator<BreachLockClient>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// A missing config file is not an error: CI jobs usually pass everything
    /// through environment variables.
    ///
    /// # Errors
    /// Returns error if the config file cannot be parsed or no client key is
    /// available.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_or_default(opts.config_ref())?;
        opts.apply_to(&mut config);

        Self::from_config(config, opts.format)
    }

    /// Create a context from an already resolved config
    pub fn from_config(config: Config, format: OutputFormat) -> Result<Self> {
        let client = BreachLockClient::new(config.client_settings()?)?;
        log::debug!("Using BreachLock API at {}", client.base_url());

        Ok(Self {
            config,
            orchestrator: ScanOrchestrator::new(client),
            format,
        })
    }

    /// The API key, validated
    pub fn require_api_key(&self) -> Result<&Secret> {
        Ok(validation::validate_api_key(self.config.api_key.as_ref())?)
    }

    /// The account email, validated
    pub fn require_email(&self) -> Result<&str> {
        Ok(validation::validate_email(self.config.email.as_deref())?)
    }

    /// The selected asset host id, validated
    pub fn require_asset(&self) -> Result<&str> {
        Ok(validation::validate_asset(self.config.asset.as_deref())?)
    }
}
