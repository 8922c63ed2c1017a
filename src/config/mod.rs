//! Configuration management for breachlock-ci

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::api_client::{API_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::client::{ClientSettings, Secret};
use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// BreachLock integration API key (sent as `token`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<Secret>,

    /// Account email registered on the platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Host id of the asset to scan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,

    /// `Authorization` header value identifying the CI integration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_key: Option<Secret>,

    /// Custom API host for development/testing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Custom `User-Agent` header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".breachlock").join("config.yaml"))
    }

    /// Resolve an explicit path or fall back to the default location
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an explicit path or the default location
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(&Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load configuration, or start empty if the file does not exist yet.
    ///
    /// Parse errors are still reported.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match Self::load_at(path) {
            Err(crate::error::Error::Config(ConfigError::NotFound)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Save configuration to an explicit path or the default location
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(&Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // The file holds credentials: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Base URL requests go to
    pub fn api_host(&self) -> &str {
        self.api_host.as_deref().unwrap_or(API_BASE_URL)
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Build client settings, requiring a client key
    pub fn client_settings(&self) -> Result<ClientSettings> {
        let client_key = self
            .client_key
            .clone()
            .filter(|k| !k.is_blank())
            .ok_or(ConfigError::MissingClientKey)?;

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid("timeout_secs must be greater than 0".to_string()).into());
        }

        Ok(ClientSettings::new(client_key)
            .with_base_url(self.api_host())
            .with_user_agent(
                self.user_agent
                    .clone()
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            )
            .with_timeout(self.timeout()))
    }
}
