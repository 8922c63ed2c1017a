//! Error types for the BreachLock CI companion

use thiserror::Error;

/// Result type alias for breachlock-ci operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Errors raised by the HTTP integration layer.
///
/// The remote platform never reports failure through a structured error, so
/// these only cover what happens on our side of the wire. A well-formed
/// response that means "no" is an outcome, not an `ApiError`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    #[error("POST request has no form body")]
    MissingFormBody,

    #[error("Invalid API host: {0}")]
    InvalidBaseUrl(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Transport("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Transport("Failed to connect to API".to_string())
        } else if err.is_decode() || err.is_body() {
            ApiError::Transport(format!("Failed to read response body: {}", err))
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Input errors caught before any request is made
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Email address is required. Pass --email or set BREACHLOCK_EMAIL.")]
    MissingEmail,

    #[error("Email address is not valid: {0}")]
    InvalidEmail(String),

    #[error("No asset selected. Pass --asset or run `breachlock-ci asset list` to find one.")]
    MissingAsset,

    #[error("API key is required. Pass --api-key or run `breachlock-ci init`.")]
    MissingApiKey,

    #[error("API key is too short (expected at least {min} characters)")]
    ApiKeyTooShort { min: usize },
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `breachlock-ci init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Client key not configured. Pass --client-key or set BREACHLOCK_CLIENT_KEY.")]
    MissingClientKey,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
