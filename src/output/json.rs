//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// Envelope for JSON output
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    /// The actual data
    pub data: T,

    /// Where and when the data came from
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// Timestamp of the response
    pub timestamp: String,

    /// CLI version
    pub version: String,

    /// API host the data was fetched from
    pub api_host: String,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T, api_host: &str) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                api_host: api_host.to_string(),
            },
        }
    }
}

/// Format data as pretty-printed JSON inside the output envelope
pub fn format_json<T: Serialize + ?Sized>(
    data: &T,
    api_host: &str,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data, api_host))
}
