// Kong gateway HTTP client
//
// Wraps `reqwest::Client` with gateway-specific URL construction and the
// `apikey` auth header. Endpoint methods live in `device.rs`; this module
// is transport mechanics only. Response bodies are free-form -- JSON one
// day, comma-joined key:value text the next -- so everything is returned
// raw for the normalizer to sort out.

use reqwest::header::HeaderMap;
use secrecy::SecretString;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::{self, RawBody, TransportConfig};
use crate::variant::ApiVariant;

pub struct GatewayClient {
    http: reqwest::Client,
    base_url: Url,
    device_id: String,
    timeout_secs: u64,
}

impl GatewayClient {
    /// Build from an API token and transport config.
    ///
    /// Injects `apikey` as a default header on every request, marked
    /// sensitive so it never shows up in debug output.
    pub fn new(
        base_url: &str,
        token: &SecretString,
        device_id: impl Into<String>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let (name, value) = ApiVariant::Gateway.auth_scheme().header(token)?;
        headers.insert(name, value);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = normalize_base_url(base_url)?;

        Ok(Self {
            http,
            base_url,
            device_id: device_id.into(),
            timeout_secs: transport.timeout.as_secs(),
        })
    }

    pub(crate) fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Join a relative path (e.g. `"device/reported"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/`, so joining relative paths works.
        self.base_url
            .join(path)
            .expect("path should be a valid relative URL")
    }

    pub(crate) async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<RawBody, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        transport::read_body(resp).await
    }

    pub(crate) async fn post(&self, path: &str, params: &[(&str, &str)]) -> Result<RawBody, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        transport::read_body(resp).await
    }

    fn send_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }
}

/// Ensure the base URL ends with `/` so relative joins append instead of
/// replacing the last path segment (the Kong prefix).
fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    let path = url.path().trim_end_matches('/').to_owned();
    url.set_path(&format!("{path}/"));
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_keeps_kong_prefix_when_joining() {
        let url = normalize_base_url("https://v2c.cloud/kong/v2c_service").unwrap();
        assert_eq!(
            url.join("device/reported").unwrap().as_str(),
            "https://v2c.cloud/kong/v2c_service/device/reported"
        );
    }

    #[test]
    fn trailing_slash_is_not_doubled() {
        let url = normalize_base_url("https://v2c.cloud/kong/v2c_service/").unwrap();
        assert_eq!(url.as_str(), "https://v2c.cloud/kong/v2c_service/");
    }
}
