// Kong gateway device endpoints
//
// Reads via `/device/reported` and `/pairings/me`; commands via
// `POST /device/{command}?deviceId=...&value=...`. The gateway has no
// endpoints for min/max intensity, km-to-charge, or session reset --
// those surface as `UnsupportedOperation` at the facade.

use tracing::debug;

use crate::error::Error;
use crate::gateway::client::GatewayClient;
use crate::transport::RawBody;

impl GatewayClient {
    /// Fetch the raw reported-status payload.
    ///
    /// `GET /device/reported?deviceId={id}`
    pub async fn reported(&self) -> Result<RawBody, Error> {
        self.get("device/reported", &[("deviceId", self.device_id())])
            .await
    }

    /// Fetch the pairing listing for the account.
    ///
    /// `GET /pairings/me` -- returns a JSON array of pairing records to
    /// scan for the configured device.
    pub async fn pairings(&self) -> Result<RawBody, Error> {
        self.get("pairings/me", &[]).await
    }

    /// Issue a device command: `POST /device/{command}?deviceId=...`.
    ///
    /// Success is the vendor accepting the request (2xx); the response
    /// body is a free-text acknowledgement and is discarded.
    async fn command(&self, command: &str, value: Option<&str>) -> Result<(), Error> {
        debug!(command, ?value, "gateway device command");
        let mut params = vec![("deviceId", self.device_id())];
        if let Some(v) = value {
            params.push(("value", v));
        }
        let _ = self.post(&format!("device/{command}"), &params).await?;
        Ok(())
    }

    /// Set the charging intensity in amperes.
    pub async fn set_intensity(&self, amps: u8) -> Result<(), Error> {
        self.command("intensity", Some(&amps.to_string())).await
    }

    /// Start charging.
    pub async fn start_charge(&self) -> Result<(), Error> {
        self.command("startcharge", None).await
    }

    /// Pause charging. The gateway has no dedicated stop endpoint;
    /// `pausecharge` toggles the charging state.
    pub async fn pause_charge(&self) -> Result<(), Error> {
        self.command("pausecharge", None).await
    }

    /// Enable or disable dynamic power adjustment.
    pub async fn set_dynamic(&self, enabled: bool) -> Result<(), Error> {
        self.command("dynamic", Some(flag(enabled))).await
    }

    /// Lock or unlock the charger.
    pub async fn set_locked(&self, locked: bool) -> Result<(), Error> {
        self.command("locked", Some(flag(locked))).await
    }

    /// Reboot the charger.
    pub async fn reboot(&self) -> Result<(), Error> {
        self.command("reboot", None).await
    }
}

fn flag(on: bool) -> &'static str {
    if on { "1" } else { "0" }
}
