//! BreachLock API client

use async_trait::async_trait;

use crate::error::ApiError;

pub mod api_client;
pub mod breachlock;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod secret;

pub use api_client::{ApiClient, ClientSettings};
pub use breachlock::BreachLockClient;
#[cfg(test)]
pub use mock::MockBreachLockClient;
pub use models::{AssetList, AssetRecord, SelectOption};
pub use secret::Secret;

/// Listing endpoint: `token`, `emailid` → JSON array of assets
pub const ASSETS_ENDPOINT: &str = "/servers/getAssetsForJenkins";

/// Registration endpoint: `token`, `emailid`, `hostid` → `"1"` on success
pub const REGISTER_ENDPOINT: &str = "/servers/registerAssetForJenkins";

/// Scan trigger endpoint: `token`, `hostid` → `"1"` on success
pub const LIVE_SCAN_ENDPOINT: &str = "/servers/runlivescanForJenkins";

/// BreachLock platform operations.
///
/// Every method returns the raw outcome of one HTTP exchange. Interpreting
/// the body (the `"1"` convention, the placeholder entry) belongs to
/// [`crate::scan::ScanOrchestrator`].
#[async_trait]
pub trait PlatformApi: Send + Sync {
    /// Fetch the assets visible to `email`
    async fn list_assets(&self, token: &Secret, email: &str) -> Result<AssetList, ApiError>;

    /// Register the CI integration for an asset, returning the raw body
    async fn register_asset(
        &self,
        token: &Secret,
        email: &str,
        host_id: &str,
    ) -> Result<String, ApiError>;

    /// Trigger a live scan for an asset, returning the raw body
    async fn start_live_scan(&self, token: &Secret, host_id: &str) -> Result<String, ApiError>;

    /// Plain GET against the API root, used as a reachability check
    async fn ping(&self) -> Result<String, ApiError>;
}
