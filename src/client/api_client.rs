//! Low-level HTTP client for the BreachLock API
//!
//! [`ApiClient`] is stateful: the caller points it at an endpoint,
//! optionally attaches a form body, then fires the request. It hands back the
//! raw response text and leaves interpretation to the layer above.

use std::time::Duration;

use reqwest::Client as HttpClient;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;

use super::secret::Secret;
use crate::error::ApiError;

/// BreachLock API base URL
pub const API_BASE_URL: &str = "https://acc.breachlock.com";

/// User agent the platform expects from CI integrations
pub const DEFAULT_USER_AGENT: &str = "JenkinsPlugin/1.0";

/// Default overall request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings shared by every request
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Origin the relative endpoints are appended to
    pub base_url: String,

    /// Value of the `Authorization` header
    pub client_key: Secret,

    /// Value of the `User-Agent` header
    pub user_agent: String,

    /// Overall request timeout
    pub timeout: Duration,
}

impl ClientSettings {
    pub fn new(client_key: Secret) -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            client_key,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the base URL (custom host for development/testing).
    ///
    /// A trailing slash is dropped so `"/x"` endpoints join cleanly.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the underlying HTTP client with these timeouts
    pub fn build_http(&self) -> Result<HttpClient, ApiError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ApiError::InvalidBaseUrl(self.base_url.clone()));
        }

        HttpClient::builder()
            .connect_timeout(CONNECT_TIMEOUT.min(self.timeout))
            .timeout(self.timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))
    }
}

/// One-request-at-a-time API client.
///
/// Not meant to be shared between concurrent callers; build one per operation.
#[derive(Debug)]
pub struct ApiClient {
    http: HttpClient,
    settings: ClientSettings,
    endpoint: String,
    form_body: Option<Vec<(String, String)>>,
}

impl ApiClient {
    /// Create a client pointed at the base URL root
    pub fn new(http: HttpClient, settings: ClientSettings) -> Self {
        let endpoint = format!("{}/", settings.base_url);
        Self {
            http,
            settings,
            endpoint,
            form_body: None,
        }
    }

    /// Base URL all endpoints are resolved against
    pub fn base_path(&self) -> &str {
        &self.settings.base_url
    }

    /// Absolute URL the next request goes to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Point the client at `base_path + relative_path`.
    ///
    /// The path is appended verbatim; callers pass it with a leading `/`.
    pub fn set_endpoint(&mut self, relative_path: &str) {
        self.endpoint = format!("{}{}", self.base_path(), relative_path);
    }

    /// Set the form fields sent by the next POST, in order
    pub fn set_form_body<K, V, I>(&mut self, pairs: I)
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.form_body = Some(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
    }

    /// Issue a GET against the current endpoint and return the body text
    pub async fn get_request(&self) -> Result<String, ApiError> {
        log::debug!("GET {}", self.endpoint());

        let request = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, self.settings.client_key.expose())
            .header(USER_AGENT, &self.settings.user_agent);

        Self::read_body(request).await
    }

    /// Issue a form-encoded POST against the current endpoint.
    ///
    /// Fails with [`ApiError::MissingFormBody`] before touching the network if
    /// no body was set.
    pub async fn post_request(&self) -> Result<String, ApiError> {
        let form = self.form_body.as_ref().ok_or(ApiError::MissingFormBody)?;

        log::debug!(
            "POST {} (fields: {})",
            self.endpoint(),
            form.iter()
                .map(|(k, _)| k.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let request = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, self.settings.client_key.expose())
            .header(USER_AGENT, &self.settings.user_agent)
            .form(form);

        Self::read_body(request).await
    }

    /// Decode `text` as a JSON array.
    ///
    /// Either the whole array decodes or the call fails; there is no partial
    /// recovery of the elements that did parse.
    pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, ApiError> {
        serde_json::from_str::<Vec<T>>(text)
            .map_err(|e| ApiError::MalformedResponse(format!("Failed to parse response: {}", e)))
    }

    // Status codes are not interpreted; the body is returned as-is.
    async fn read_body(request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();
        let body = response.text().await.map_err(ApiError::from)?;

        log::debug!("Response status {} ({} bytes)", status, body.len());
        if !status.is_success() {
            log::warn!("BreachLock API answered with HTTP {}", status);
        }

        Ok(body)
    }
}

/// Collapse a parse result to its elements, treating any failure as empty
pub fn array_or_empty<T>(result: Result<Vec<T>, ApiError>) -> Vec<T> {
    result.unwrap_or_else(|err| {
        log::warn!("{}", err);
        Vec::new()
    })
}
