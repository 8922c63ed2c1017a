//! Asset registration and live scan orchestration
//!
//! The platform answers mutating calls with a bare body: `"1"` means the
//! operation went through, anything else (empty, `"0"`, an error page) means
//! it did not. The reason is never disclosed, so every failure collapses to
//! one generic message.

use serde::Serialize;

use crate::client::api_client::array_or_empty;
use crate::client::{AssetList, PlatformApi, Secret, SelectOption};
use crate::error::ApiError;

/// Body the platform sends when a mutating call succeeds
pub const SUCCESS_BODY: &str = "1";

pub const REGISTER_SUCCESS_MESSAGE: &str = "Success!";
pub const REGISTER_FAILURE_MESSAGE: &str = "Plugin could not be registered, or is already registered. Contact support if the problem persists.";
pub const SCAN_STARTED_MESSAGE: &str = "Scan started!";
pub const SCAN_NOT_STARTED_MESSAGE: &str = "Scan could not be started!";

/// Whether a raw response body signals success. Exact match, no trimming.
pub fn is_success(body: &str) -> bool {
    body == SUCCESS_BODY
}

/// Result of an asset registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationOutcome {
    Registered,
    Failed,
}

impl RegistrationOutcome {
    fn from_body(body: &str) -> Self {
        if is_success(body) {
            RegistrationOutcome::Registered
        } else {
            RegistrationOutcome::Failed
        }
    }

    /// Fold a request result into an outcome; a failed exchange counts as
    /// a failed registration.
    pub fn settle(host_id: &str, result: Result<Self, ApiError>) -> Self {
        result.unwrap_or_else(|err| {
            log::warn!("Registration request for asset {} failed: {}", host_id, err);
            RegistrationOutcome::Failed
        })
    }

    pub fn is_success(self) -> bool {
        self == RegistrationOutcome::Registered
    }

    pub fn message(self) -> &'static str {
        match self {
            RegistrationOutcome::Registered => REGISTER_SUCCESS_MESSAGE,
            RegistrationOutcome::Failed => REGISTER_FAILURE_MESSAGE,
        }
    }
}

/// Result of a live scan trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOutcome {
    Started,
    NotStarted,
}

impl ScanOutcome {
    fn from_body(body: &str) -> Self {
        if is_success(body) {
            ScanOutcome::Started
        } else {
            ScanOutcome::NotStarted
        }
    }

    /// Fold a request result into an outcome; a failed exchange counts as
    /// a scan that did not start.
    pub fn settle(host_id: &str, result: Result<Self, ApiError>) -> Self {
        result.unwrap_or_else(|err| {
            log::warn!("Live scan request for asset {} failed: {}", host_id, err);
            ScanOutcome::NotStarted
        })
    }

    pub fn is_success(self) -> bool {
        self == ScanOutcome::Started
    }

    /// One-line status for the build log
    pub fn status_line(self) -> &'static str {
        match self {
            ScanOutcome::Started => SCAN_STARTED_MESSAGE,
            ScanOutcome::NotStarted => SCAN_NOT_STARTED_MESSAGE,
        }
    }
}

/// Drives the three platform operations and interprets their responses.
///
/// The plain methods never fail: transport and parse errors are logged and
/// folded into the same outcome an unsuccessful response would produce. The
/// `try_` variants keep the [`ApiError`] for callers that need to tell them
/// apart.
pub struct ScanOrchestrator<A: PlatformApi> {
    api: A,
}

impl<A: PlatformApi> ScanOrchestrator<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the asset list without collapsing errors
    pub async fn try_list_assets(
        &self,
        token: &Secret,
        email: &str,
    ) -> Result<AssetList, ApiError> {
        self.api.list_assets(token, email).await
    }

    /// Selectable assets for `email`, placeholder entry first.
    ///
    /// Any failure yields the placeholder alone.
    pub async fn list_assets(&self, token: &Secret, email: &str) -> Vec<SelectOption> {
        let assets = self
            .try_list_assets(token, email)
            .await
            .map(AssetList::into_inner);
        AssetList::from(array_or_empty(assets)).to_select_options()
    }

    /// Register an asset, keeping transport errors distinct
    pub async fn try_register_asset(
        &self,
        token: &Secret,
        email: &str,
        host_id: &str,
    ) -> Result<RegistrationOutcome, ApiError> {
        let body = self.api.register_asset(token, email, host_id).await?;
        let outcome = RegistrationOutcome::from_body(&body);
        if !outcome.is_success() {
            log::warn!("Platform did not confirm registration of asset {}", host_id);
        }
        Ok(outcome)
    }

    /// Register the CI integration for `host_id`
    pub async fn register_asset(
        &self,
        token: &Secret,
        email: &str,
        host_id: &str,
    ) -> RegistrationOutcome {
        let outcome = RegistrationOutcome::settle(
            host_id,
            self.try_register_asset(token, email, host_id).await,
        );
        log::info!("Registration of asset {}: {:?}", host_id, outcome);
        outcome
    }

    /// Start a live scan, keeping transport errors distinct
    pub async fn try_start_scan(
        &self,
        token: &Secret,
        host_id: &str,
    ) -> Result<ScanOutcome, ApiError> {
        let body = self.api.start_live_scan(token, host_id).await?;
        let outcome = ScanOutcome::from_body(&body);
        if !outcome.is_success() {
            log::warn!("Platform did not start a live scan for asset {}", host_id);
        }
        Ok(outcome)
    }

    /// Trigger a live scan for `host_id`
    pub async fn start_scan(&self, token: &Secret, host_id: &str) -> ScanOutcome {
        let outcome = ScanOutcome::settle(host_id, self.try_start_scan(token, host_id).await);
        log::info!("Live scan for asset {}: {:?}", host_id, outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::AssetRecord;
    use crate::client::mock::{MockBreachLockClient, MockReply};

    const TOKEN: &str = "0123456789abcdef0123456789abcdef";

    fn token() -> Secret {
        Secret::new(TOKEN)
    }

    #[test]
    fn test_is_success_exact_match_only() {
        assert!(is_success("1"));
        for body in ["", "0", "true", " 1", "1\n", "11", "\"1\"", "ok"] {
            assert!(!is_success(body), "{:?} must not count as success", body);
        }
    }

    #[tokio::test]
    async fn test_start_scan_success() {
        let orchestrator = ScanOrchestrator::new(MockBreachLockClient::new().with_scan_body("1"));

        let outcome = orchestrator.start_scan(&token(), "h1").await;

        assert!(outcome.is_success());
        assert_eq!(outcome.status_line(), "Scan started!");
    }

    #[tokio::test]
    async fn test_start_scan_empty_body_is_failure() {
        let orchestrator = ScanOrchestrator::new(MockBreachLockClient::new().with_scan_body(""));

        let outcome = orchestrator.start_scan(&token(), "h1").await;

        assert!(!outcome.is_success());
        assert_eq!(outcome.status_line(), "Scan could not be started!");
    }

    #[tokio::test]
    async fn test_start_scan_transport_error_reports_not_started() {
        let orchestrator = ScanOrchestrator::new(
            MockBreachLockClient::new()
                .with_scan_reply(MockReply::Transport("Request timed out".to_string())),
        );

        assert_eq!(
            orchestrator.start_scan(&token(), "h1").await,
            ScanOutcome::NotStarted
        );
        assert!(matches!(
            orchestrator.try_start_scan(&token(), "h1").await,
            Err(ApiError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_try_start_scan_distinguishes_empty_success_body() {
        let orchestrator = ScanOrchestrator::new(MockBreachLockClient::new().with_scan_body(""));

        // The exchange worked, the platform just said no
        let outcome = orchestrator.try_start_scan(&token(), "h1").await.unwrap();
        assert_eq!(outcome, ScanOutcome::NotStarted);
    }

    #[tokio::test]
    async fn test_start_scan_sends_token_and_host_only() {
        let mock = MockBreachLockClient::new().with_scan_body("1");
        let orchestrator = ScanOrchestrator::new(mock);

        orchestrator.start_scan(&token(), "h42").await;

        let captured = orchestrator.api().captured_requests().await;
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].operation, "start_live_scan");
        assert_eq!(captured[0].token, TOKEN);
        assert_eq!(captured[0].email, None);
        assert_eq!(captured[0].host_id.as_deref(), Some("h42"));
    }

    #[tokio::test]
    async fn test_list_assets_maps_and_prepends_placeholder() {
        let orchestrator = ScanOrchestrator::new(
            MockBreachLockClient::new().with_assets(vec![AssetRecord::new("web1", "h1", "o1")]),
        );

        let options = orchestrator.list_assets(&token(), "sec@example.com").await;

        assert_eq!(
            options,
            vec![
                SelectOption::new("Please select an asset", ""),
                SelectOption::new("web1", "h1"),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_assets_n_entries_plus_placeholder_in_order() {
        let assets: Vec<AssetRecord> = (0..5)
            .map(|i| AssetRecord::new(format!("host-{}", i), format!("h{}", i), "o1"))
            .collect();
        let orchestrator =
            ScanOrchestrator::new(MockBreachLockClient::new().with_assets(assets.clone()));

        let options = orchestrator.list_assets(&token(), "sec@example.com").await;

        assert_eq!(options.len(), assets.len() + 1);
        assert!(options[0].is_placeholder());
        for (option, asset) in options[1..].iter().zip(&assets) {
            assert_eq!(option.label, asset.display_name);
            assert_eq!(option.value, asset.host_id);
        }
    }

    #[tokio::test]
    async fn test_list_assets_malformed_yields_placeholder_only() {
        let orchestrator = ScanOrchestrator::new(
            MockBreachLockClient::new()
                .with_assets_reply(MockReply::Malformed("expected value".to_string())),
        );

        let options = orchestrator.list_assets(&token(), "sec@example.com").await;
        assert_eq!(options, vec![SelectOption::placeholder()]);

        assert!(matches!(
            orchestrator
                .try_list_assets(&token(), "sec@example.com")
                .await,
            Err(ApiError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_list_assets_empty_yields_placeholder_only() {
        let orchestrator = ScanOrchestrator::new(MockBreachLockClient::new());

        let options = orchestrator.list_assets(&token(), "sec@example.com").await;
        assert_eq!(options, vec![SelectOption::placeholder()]);
    }

    #[tokio::test]
    async fn test_register_asset_success_message() {
        let orchestrator =
            ScanOrchestrator::new(MockBreachLockClient::new().with_register_body("1"));

        let outcome = orchestrator
            .register_asset(&token(), "sec@example.com", "h1")
            .await;

        assert!(outcome.is_success());
        assert_eq!(outcome.message(), "Success!");
    }

    #[tokio::test]
    async fn test_register_asset_rejection_is_generic_failure() {
        let orchestrator =
            ScanOrchestrator::new(MockBreachLockClient::new().with_register_body("0"));

        let outcome = orchestrator
            .register_asset(&token(), "sec@example.com", "h1")
            .await;

        assert_eq!(outcome, RegistrationOutcome::Failed);
        assert_eq!(outcome.message(), REGISTER_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_try_register_asset_success() {
        let orchestrator =
            ScanOrchestrator::new(MockBreachLockClient::new().with_register_body("1"));

        let outcome = orchestrator
            .try_register_asset(&token(), "sec@example.com", "h1")
            .await
            .unwrap();
        assert_eq!(outcome, RegistrationOutcome::Registered);
    }

    #[tokio::test]
    async fn test_try_register_asset_empty_body_is_failed_outcome() {
        let orchestrator =
            ScanOrchestrator::new(MockBreachLockClient::new().with_register_body(""));

        let outcome = orchestrator
            .try_register_asset(&token(), "sec@example.com", "h1")
            .await
            .unwrap();
        assert_eq!(outcome, RegistrationOutcome::Failed);
    }

    #[tokio::test]
    async fn test_try_register_asset_transport_error() {
        let orchestrator = ScanOrchestrator::new(
            MockBreachLockClient::new()
                .with_register_reply(MockReply::Transport("connection reset".to_string())),
        );

        let result = orchestrator
            .try_register_asset(&token(), "sec@example.com", "h1")
            .await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }

    #[test]
    fn test_settle_collapses_errors_to_failure() {
        let err = || ApiError::Transport("down".to_string());

        assert_eq!(
            RegistrationOutcome::settle("h1", Err(err())),
            RegistrationOutcome::Failed
        );
        assert_eq!(
            RegistrationOutcome::settle("h1", Ok(RegistrationOutcome::Registered)),
            RegistrationOutcome::Registered
        );
        assert_eq!(ScanOutcome::settle("h1", Err(err())), ScanOutcome::NotStarted);
    }

    #[tokio::test]
    async fn test_register_asset_transport_error_same_message() {
        let orchestrator = ScanOrchestrator::new(
            MockBreachLockClient::new()
                .with_register_reply(MockReply::Transport("connection reset".to_string())),
        );

        let outcome = orchestrator
            .register_asset(&token(), "sec@example.com", "h1")
            .await;

        assert_eq!(outcome.message(), REGISTER_FAILURE_MESSAGE);
    }
}
