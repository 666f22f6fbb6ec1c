// Unified device client
//
// One method per vendor operation, dispatched to the configured API
// variant and wrapped in the retry policy. Read operations funnel their
// raw bodies through the normalizer; a failed fetch is always a typed
// error, never a zeroed-out status. Operations the configured variant
// cannot express fail with `UnsupportedOperation` before any request is
// issued, so callers can hide the capability instead of surfacing a
// vendor error.

use secrecy::SecretString;

use crate::error::Error;
use crate::gateway::GatewayClient;
use crate::rest::RestClient;
use crate::retry::RetryPolicy;
use crate::status::{self, ChargerStatus, DeviceIdentity};
use crate::transport::{RawBody, TransportConfig};
use crate::variant::ApiVariant;

/// Everything needed to construct a [`ChargerClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub variant: ApiVariant,
    /// Base URL override; defaults to the variant's vendor endpoint.
    pub base_url: Option<String>,
    pub token: SecretString,
    pub device_id: String,
    pub transport: TransportConfig,
    pub retry: RetryPolicy,
}

impl ClientConfig {
    pub fn new(variant: ApiVariant, token: SecretString, device_id: impl Into<String>) -> Self {
        Self {
            variant,
            base_url: None,
            token,
            device_id: device_id.into(),
            transport: TransportConfig::default(),
            retry: RetryPolicy::default(),
        }
    }
}

enum Variant {
    Gateway(GatewayClient),
    Rest(RestClient),
}

/// Async client for a single paired charger.
///
/// Safe for concurrent use: the underlying `reqwest::Client` pools
/// connections, and no per-call state is mutated.
pub struct ChargerClient {
    inner: Variant,
    retry: RetryPolicy,
    device_id: String,
}

impl ChargerClient {
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let base_url = config
            .base_url
            .as_deref()
            .unwrap_or_else(|| config.variant.default_base_url());

        let inner = match config.variant {
            ApiVariant::Gateway => Variant::Gateway(GatewayClient::new(
                base_url,
                &config.token,
                &config.device_id,
                &config.transport,
            )?),
            ApiVariant::Rest => Variant::Rest(RestClient::new(
                base_url,
                &config.token,
                &config.device_id,
                &config.transport,
            )?),
        };

        Ok(Self {
            inner,
            retry: config.retry.clone(),
            device_id: config.device_id.clone(),
        })
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn variant(&self) -> ApiVariant {
        match self.inner {
            Variant::Gateway(_) => ApiVariant::Gateway,
            Variant::Rest(_) => ApiVariant::Rest,
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Fetch and normalize the current charger status.
    ///
    /// The HTTP round trip is retried per policy; a normalization
    /// failure is terminal for this fetch (retrying won't change the
    /// body the vendor sends).
    pub async fn fetch_status(&self) -> Result<ChargerStatus, Error> {
        let raw = self.fetch_status_raw().await?;
        status::normalize_status(&raw.text, raw.content_type.as_deref())
    }

    async fn fetch_status_raw(&self) -> Result<RawBody, Error> {
        match &self.inner {
            Variant::Gateway(client) => self.retry.run(|| client.reported()).await,
            Variant::Rest(client) => self.retry.run(|| client.status()).await,
        }
    }

    /// Fetch the identity of the configured device.
    ///
    /// Used once at setup/validation time and on reauthentication, not
    /// polled.
    pub async fn fetch_identity(&self) -> Result<DeviceIdentity, Error> {
        let raw = match &self.inner {
            Variant::Gateway(client) => self.retry.run(|| client.pairings()).await?,
            Variant::Rest(client) => self.retry.run(|| client.device()).await?,
        };
        status::identity_from_body(&raw.text, raw.content_type.as_deref(), &self.device_id)
    }

    // ── Writes ───────────────────────────────────────────────────────
    // Success means the vendor accepted the request (2xx), not that the
    // state changed -- callers re-fetch status to observe the effect.

    /// Set the charging current in amperes.
    pub async fn set_current(&self, amps: u8) -> Result<(), Error> {
        match &self.inner {
            Variant::Gateway(client) => self.retry.run(|| client.set_intensity(amps)).await,
            Variant::Rest(client) => self.retry.run(|| client.set_current(amps)).await,
        }
    }

    /// Set the maximum charging current in amperes.
    pub async fn set_max_current(&self, amps: u8) -> Result<(), Error> {
        match &self.inner {
            Variant::Gateway(_) => Err(Error::UnsupportedOperation("set max current")),
            Variant::Rest(client) => self.retry.run(|| client.set_max_current(amps)).await,
        }
    }

    /// Set the minimum charging current in amperes.
    pub async fn set_min_current(&self, amps: u8) -> Result<(), Error> {
        match &self.inner {
            Variant::Gateway(_) => Err(Error::UnsupportedOperation("set min current")),
            Variant::Rest(client) => self.retry.run(|| client.set_min_current(amps)).await,
        }
    }

    /// Enable or disable dynamic power adjustment.
    pub async fn set_dynamic_power(&self, enabled: bool) -> Result<(), Error> {
        match &self.inner {
            Variant::Gateway(client) => self.retry.run(|| client.set_dynamic(enabled)).await,
            Variant::Rest(client) => self.retry.run(|| client.set_dynamic(enabled)).await,
        }
    }

    /// Pause or resume charging.
    ///
    /// On the gateway `pausecharge` toggles rather than setting a target
    /// state -- callers should check current status first.
    pub async fn set_paused(&self, paused: bool) -> Result<(), Error> {
        match &self.inner {
            Variant::Gateway(client) => self.retry.run(|| client.pause_charge()).await,
            Variant::Rest(client) => self.retry.run(|| client.set_pause(paused)).await,
        }
    }

    /// Lock or unlock the charger.
    pub async fn set_locked(&self, locked: bool) -> Result<(), Error> {
        match &self.inner {
            Variant::Gateway(client) => self.retry.run(|| client.set_locked(locked)).await,
            Variant::Rest(client) => self.retry.run(|| client.set_lock(locked)).await,
        }
    }

    /// Set the kilometres of range to add before charging stops.
    pub async fn set_km_to_charge(&self, km: u32) -> Result<(), Error> {
        match &self.inner {
            Variant::Gateway(_) => Err(Error::UnsupportedOperation("km to charge")),
            Variant::Rest(client) => self.retry.run(|| client.set_km(km)).await,
        }
    }

    /// Start charging.
    pub async fn start_charging(&self) -> Result<(), Error> {
        match &self.inner {
            Variant::Gateway(client) => self.retry.run(|| client.start_charge()).await,
            Variant::Rest(client) => self.retry.run(|| client.start_charge()).await,
        }
    }

    /// Stop charging. On the gateway this issues `pausecharge` -- the
    /// vendor exposes no harder stop.
    pub async fn stop_charging(&self) -> Result<(), Error> {
        match &self.inner {
            Variant::Gateway(client) => self.retry.run(|| client.pause_charge()).await,
            Variant::Rest(client) => self.retry.run(|| client.stop_charge()).await,
        }
    }

    /// Reboot the charger.
    pub async fn restart_device(&self) -> Result<(), Error> {
        match &self.inner {
            Variant::Gateway(client) => self.retry.run(|| client.reboot()).await,
            Variant::Rest(_) => Err(Error::UnsupportedOperation("device restart")),
        }
    }

    /// Reset the current session counters. Neither vendor variant has an
    /// endpoint for this; it reports unsupported so callers can hide the
    /// capability instead of silently doing nothing.
    pub async fn reset_session(&self) -> Result<(), Error> {
        Err(Error::UnsupportedOperation("session reset"))
    }
}
