//! Input checks run before any request reaches the platform

use std::sync::LazyLock;

use regex::Regex;

use crate::client::Secret;
use crate::error::ValidationError;

/// Shortest API key the platform issues
pub const MIN_API_KEY_LEN: usize = 32;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .expect("email pattern is valid")
});

/// Check the account email, returning it trimmed
pub fn validate_email(email: Option<&str>) -> Result<&str, ValidationError> {
    let email = email.map(str::trim).unwrap_or_default();
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    Ok(email)
}

/// Check that an asset was picked, returning its trimmed host id
pub fn validate_asset(asset: Option<&str>) -> Result<&str, ValidationError> {
    match asset.map(str::trim) {
        Some(host_id) if !host_id.is_empty() => Ok(host_id),
        _ => Err(ValidationError::MissingAsset),
    }
}

/// Check that the API key is present and plausibly long
pub fn validate_api_key(api_key: Option<&Secret>) -> Result<&Secret, ValidationError> {
    let api_key = match api_key {
        Some(key) if !key.is_blank() => key,
        _ => return Err(ValidationError::MissingApiKey),
    };
    if api_key.len() < MIN_API_KEY_LEN {
        return Err(ValidationError::ApiKeyTooShort {
            min: MIN_API_KEY_LEN,
        });
    }
    Ok(api_key)
}
