// trydan-core: coordination layer between trydan-api and consumers.

pub mod config;
pub mod coordinator;
pub mod error;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{
    ChargerConfig, DEFAULT_POLL_INTERVAL_SECS, MAX_POLL_INTERVAL_SECS, MIN_POLL_INTERVAL_SECS,
};
pub use coordinator::{Coordinator, RefreshPhase, RefreshState};
pub use error::CoreError;

// Re-export the API types consumers handle directly.
pub use trydan_api::{
    ApiVariant, ChargeState, ChargerClient, ChargerStatus, DeviceIdentity, RetryPolicy,
};

/// Validate an API token + device id pair by fetching the device identity.
///
/// Used once during setup and again on reauthentication. Errors carry the
/// specific setup-failure reason (cannot connect, invalid auth, timeout,
/// device not found).
pub async fn validate_credentials(config: &ChargerConfig) -> Result<DeviceIdentity, CoreError> {
    let client = ChargerClient::new(&config.client_config())?;
    Ok(client.fetch_identity().await?)
}
