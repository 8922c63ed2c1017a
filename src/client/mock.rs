//! Mock BreachLock API client for testing
//!
//! Provides a mock implementation of [`PlatformApi`] for unit testing
//! without making real API calls.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::PlatformApi;
use super::models::{AssetList, AssetRecord};
use super::secret::Secret;
use crate::error::ApiError;

/// Canned outcome for one mocked operation
#[derive(Debug, Clone)]
pub enum MockReply<T> {
    Ok(T),
    Transport(String),
    Malformed(String),
}

impl<T: Clone> MockReply<T> {
    fn to_result(&self) -> Result<T, ApiError> {
        match self {
            MockReply::Ok(v) => Ok(v.clone()),
            MockReply::Transport(msg) => Err(ApiError::Transport(msg.clone())),
            MockReply::Malformed(msg) => Err(ApiError::MalformedResponse(msg.clone())),
        }
    }
}

/// A request the mock received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRequest {
    pub operation: &'static str,
    pub token: String,
    pub email: Option<String>,
    pub host_id: Option<String>,
}

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockBreachLockClient::new().with_scan_body("1");
/// let body = mock.start_live_scan(&token, "h1").await?;
/// assert_eq!(body, "1");
/// ```
pub struct MockBreachLockClient {
    assets: Arc<Mutex<MockReply<Vec<AssetRecord>>>>,
    register_body: Arc<Mutex<MockReply<String>>>,
    scan_body: Arc<Mutex<MockReply<String>>>,
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl Default for MockBreachLockClient {
    fn default() -> Self {
        Self {
            assets: Arc::new(Mutex::new(MockReply::Ok(Vec::new()))),
            register_body: Arc::new(Mutex::new(MockReply::Ok(String::new()))),
            scan_body: Arc::new(Mutex::new(MockReply::Ok(String::new()))),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockBreachLockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assets(self, assets: Vec<AssetRecord>) -> Self {
        self.with_assets_reply(MockReply::Ok(assets))
    }

    pub fn with_assets_reply(mut self, reply: MockReply<Vec<AssetRecord>>) -> Self {
        self.assets = Arc::new(Mutex::new(reply));
        self
    }

    pub fn with_register_body(self, body: &str) -> Self {
        self.with_register_reply(MockReply::Ok(body.to_string()))
    }

    pub fn with_register_reply(mut self, reply: MockReply<String>) -> Self {
        self.register_body = Arc::new(Mutex::new(reply));
        self
    }

    pub fn with_scan_body(self, body: &str) -> Self {
        self.with_scan_reply(MockReply::Ok(body.to_string()))
    }

    pub fn with_scan_reply(mut self, reply: MockReply<String>) -> Self {
        self.scan_body = Arc::new(Mutex::new(reply));
        self
    }

    /// Requests received so far, in order
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    async fn capture(
        &self,
        operation: &'static str,
        token: &Secret,
        email: Option<&str>,
        host_id: Option<&str>,
    ) {
        self.captured_requests.lock().await.push(CapturedRequest {
            operation,
            token: token.expose().to_string(),
            email: email.map(str::to_string),
            host_id: host_id.map(str::to_string),
        });
    }
}

#[async_trait]
impl PlatformApi for MockBreachLockClient {
    async fn list_assets(&self, token: &Secret, email: &str) -> Result<AssetList, ApiError> {
        self.capture("list_assets", token, Some(email), None).await;
        self.assets.lock().await.to_result().map(AssetList::from)
    }

    async fn register_asset(
        &self,
        token: &Secret,
        email: &str,
        host_id: &str,
    ) -> Result<String, ApiError> {
        self.capture("register_asset", token, Some(email), Some(host_id))
            .await;
        self.register_body.lock().await.to_result()
    }

    async fn start_live_scan(&self, token: &Secret, host_id: &str) -> Result<String, ApiError> {
        self.capture("start_live_scan", token, None, Some(host_id))
            .await;
        self.scan_body.lock().await.to_result()
    }

    async fn ping(&self) -> Result<String, ApiError> {
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_configured_assets() {
        let mock =
            MockBreachLockClient::new().with_assets(vec![AssetRecord::new("web1", "h1", "o1")]);

        let assets = mock
            .list_assets(&Secret::new("t"), "a@b.co")
            .await
            .unwrap();
        assert_eq!(assets.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_captures_requests() {
        let mock = MockBreachLockClient::new().with_scan_body("1");

        mock.start_live_scan(&Secret::new("tok"), "h7").await.unwrap();

        let captured = mock.captured_requests().await;
        assert_eq!(
            captured,
            vec![CapturedRequest {
                operation: "start_live_scan",
                token: "tok".to_string(),
                email: None,
                host_id: Some("h7".to_string()),
            }]
        );
    }

    #[tokio::test]
    async fn test_mock_transport_reply() {
        let mock = MockBreachLockClient::new()
            .with_register_reply(MockReply::Transport("connection reset".to_string()));

        let result = mock.register_asset(&Secret::new("t"), "a@b.co", "h1").await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }
}
