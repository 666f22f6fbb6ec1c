// ── Runtime charger configuration ──
//
// Describes *how* to reach one charger. Carries credential data and
// connection tuning, but never touches disk -- the CLI (or whatever
// embeds this crate) constructs a `ChargerConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use trydan_api::{ApiVariant, ClientConfig, RetryPolicy, TransportConfig};

/// Lower bound on the polling interval. The vendor rate-limits
/// aggressively below this.
pub const MIN_POLL_INTERVAL_SECS: u64 = 30;
/// Upper bound on the polling interval; beyond this the data is too
/// stale to drive automations.
pub const MAX_POLL_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Configuration for a single charger instance.
#[derive(Debug, Clone)]
pub struct ChargerConfig {
    /// Which vendor API generation to talk to.
    pub variant: ApiVariant,
    /// Base URL override (self-hosted gateways, testing). Defaults to the
    /// variant's vendor endpoint.
    pub base_url: Option<String>,
    /// API token issued by the V2C Cloud portal.
    pub token: SecretString,
    /// Vendor identifier of the paired charger.
    pub device_id: String,
    /// Seconds between polls. Clamped to 30-300 at use.
    pub poll_interval_secs: u64,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Attempt budget for the retry policy.
    pub max_retries: u32,
}

impl ChargerConfig {
    pub fn new(variant: ApiVariant, token: SecretString, device_id: impl Into<String>) -> Self {
        Self {
            variant,
            base_url: None,
            token,
            device_id: device_id.into(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// The polling interval, clamped into the supported range.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(
            self.poll_interval_secs
                .clamp(MIN_POLL_INTERVAL_SECS, MAX_POLL_INTERVAL_SECS),
        )
    }

    /// Translate into the API crate's client configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            variant: self.variant,
            base_url: self.base_url.clone(),
            token: self.token.clone(),
            device_id: self.device_id.clone(),
            transport: TransportConfig {
                timeout: self.timeout,
            },
            retry: RetryPolicy::with_max_attempts(self.max_retries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ChargerConfig {
        ChargerConfig::new(
            ApiVariant::Gateway,
            SecretString::from("tok".to_owned()),
            "dev",
        )
    }

    #[test]
    fn poll_interval_is_clamped_into_range() {
        let mut cfg = config();

        cfg.poll_interval_secs = 5;
        assert_eq!(cfg.poll_interval(), Duration::from_secs(30));

        cfg.poll_interval_secs = 60;
        assert_eq!(cfg.poll_interval(), Duration::from_secs(60));

        cfg.poll_interval_secs = 100_000;
        assert_eq!(cfg.poll_interval(), Duration::from_secs(300));
    }

    #[test]
    fn client_config_carries_the_tuning() {
        let mut cfg = config();
        cfg.max_retries = 5;
        cfg.timeout = Duration::from_secs(3);

        let client_cfg = cfg.client_config();
        assert_eq!(client_cfg.retry.max_attempts, 5);
        assert_eq!(client_cfg.transport.timeout, Duration::from_secs(3));
    }
}
