// REST deployment HTTP client
//
// Wraps `reqwest::Client` with bearer-token auth and device-scoped URL
// construction. Endpoint methods live in `device.rs`.

use reqwest::header::HeaderMap;
use secrecy::SecretString;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::{self, RawBody, TransportConfig};
use crate::variant::ApiVariant;

pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
    device_id: String,
    timeout_secs: u64,
}

impl RestClient {
    /// Build from an API token and transport config.
    ///
    /// Injects `Authorization: Bearer <token>` as a default header on
    /// every request, marked sensitive.
    pub fn new(
        base_url: &str,
        token: &SecretString,
        device_id: impl Into<String>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let (name, value) = ApiVariant::Rest.auth_scheme().header(token)?;
        headers.insert(name, value);

        let http = transport.build_client_with_headers(headers)?;
        let mut base_url = Url::parse(base_url)?;
        let path = base_url.path().trim_end_matches('/').to_owned();
        base_url.set_path(&format!("{path}/"));

        Ok(Self {
            http,
            base_url,
            device_id: device_id.into(),
            timeout_secs: transport.timeout.as_secs(),
        })
    }

    /// Join a device-scoped path: `devices/{id}/{suffix}`.
    pub(crate) fn device_path(&self, suffix: &str) -> String {
        if suffix.is_empty() {
            format!("devices/{}", self.device_id)
        } else {
            format!("devices/{}/{suffix}", self.device_id)
        }
    }

    fn url(&self, path: &str) -> Url {
        self.base_url
            .join(path)
            .expect("path should be a valid relative URL")
    }

    pub(crate) async fn get(&self, path: &str) -> Result<RawBody, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        transport::read_body(resp).await
    }

    pub(crate) async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<RawBody, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .json(body)
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
