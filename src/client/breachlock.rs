//! BreachLock API client implementation

use async_trait::async_trait;
use reqwest::Client as HttpClient;

use super::api_client::{ApiClient, ClientSettings};
use super::models::{AssetList, AssetRecord};
use super::secret::Secret;
use super::{ASSETS_ENDPOINT, LIVE_SCAN_ENDPOINT, PlatformApi, REGISTER_ENDPOINT};
use crate::error::ApiError;

/// BreachLock API client.
///
/// Holds the connection settings and a pooled HTTP client; each operation
/// gets its own [`ApiClient`] so endpoint and body never leak between calls.
#[derive(Debug)]
pub struct BreachLockClient {
    http: HttpClient,
    settings: ClientSettings,
}

impl BreachLockClient {
    /// Create a new BreachLock API client
    pub fn new(settings: ClientSettings) -> crate::error::Result<Self> {
        let http = settings.build_http()?;
        Ok(Self { http, settings })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.settings.base_url
    }

    fn api_client(&self, endpoint: &str) -> ApiClient {
        let mut client = ApiClient::new(self.http.clone(), self.settings.clone());
        client.set_endpoint(endpoint);
        client
    }
}

#[async_trait]
impl PlatformApi for BreachLockClient {
    async fn list_assets(&self, token: &Secret, email: &str) -> Result<AssetList, ApiError> {
        let mut client = self.api_client(ASSETS_ENDPOINT);
        client.set_form_body([("token", token.expose()), ("emailid", email)]);

        let body = client.post_request().await?;
        let assets: Vec<AssetRecord> = ApiClient::parse_json(&body)?;
        log::debug!("Fetched {} assets", assets.len());

        Ok(assets.into())
    }

    async fn register_asset(
        &self,
        token: &Secret,
        email: &str,
        host_id: &str,
    ) -> Result<String, ApiError> {
        let mut client = self.api_client(REGISTER_ENDPOINT);
        client.set_form_body([
            ("token", token.expose()),
            ("emailid", email),
            ("hostid", host_id),
        ]);

        client.post_request().await
    }

    async fn start_live_scan(&self, token: &Secret, host_id: &str) -> Result<String, ApiError> {
        let mut client = self.api_client(LIVE_SCAN_ENDPOINT);
        client.set_form_body([("token", token.expose()), ("hostid", host_id)]);

        client.post_request().await
    }

    async fn ping(&self) -> Result<String, ApiError> {
        self.api_client("/").get_request().await
    }
}
