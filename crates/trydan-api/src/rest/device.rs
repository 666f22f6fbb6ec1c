// REST deployment device endpoints
//
// Reads via `GET /devices/{id}/status` and `GET /devices/{id}`; writes
// via `POST /devices/{id}/{operation}` with small JSON bodies. The REST
// deployment has no restart or session-reset endpoint -- those surface
// as `UnsupportedOperation` at the facade.

use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::rest::client::RestClient;
use crate::transport::RawBody;

impl RestClient {
    /// Fetch the raw status payload.
    ///
    /// `GET /devices/{id}/status`
    pub async fn status(&self) -> Result<RawBody, Error> {
        self.get(&self.device_path("status")).await
    }

    /// Fetch the raw device record (identity metadata).
    ///
    /// `GET /devices/{id}`
    pub async fn device(&self) -> Result<RawBody, Error> {
        self.get(&self.device_path("")).await
    }

    /// Issue a write operation. Success is the vendor accepting the
    /// request (2xx); the acknowledgement body is discarded.
    async fn write(&self, operation: &str, body: &serde_json::Value) -> Result<(), Error> {
        debug!(operation, "rest device command");
        let _ = self.post(&self.device_path(operation), body).await?;
        Ok(())
    }

    /// Set the charging current in amperes.
    pub async fn set_current(&self, amps: u8) -> Result<(), Error> {
        self.write("set_current", &json!({ "current": amps })).await
    }

    /// Set the maximum charging current in amperes.
    pub async fn set_max_current(&self, amps: u8) -> Result<(), Error> {
        self.write("set_max_current", &json!({ "max_current": amps }))
            .await
    }

    /// Set the minimum charging current in amperes.
    pub async fn set_min_current(&self, amps: u8) -> Result<(), Error> {
        self.write("set_min_current", &json!({ "min_current": amps }))
            .await
    }

    /// Enable or disable dynamic power adjustment.
    pub async fn set_dynamic(&self, enabled: bool) -> Result<(), Error> {
        self.write("set_dynamic", &json!({ "dynamic_enabled": enabled }))
            .await
    }

    /// Pause or resume charging.
    pub async fn set_pause(&self, paused: bool) -> Result<(), Error> {
        self.write("set_pause", &json!({ "paused": paused })).await
    }

    /// Lock or unlock the charger.
    pub async fn set_lock(&self, locked: bool) -> Result<(), Error> {
        self.write("set_lock", &json!({ "locked": locked })).await
    }

    /// Set the kilometres of range to add before charging stops.
    pub async fn set_km(&self, km: u32) -> Result<(), Error> {
        self.write("set_km", &json!({ "km_to_charge": km })).await
    }

    /// Start charging.
    pub async fn start_charge(&self) -> Result<(), Error> {
        self.write("start_charge", &json!({})).await
    }

    /// Stop charging.
    pub async fn stop_charge(&self) -> Result<(), Error> {
        self.write("stop_charge", &json!({})).await
    }
}
