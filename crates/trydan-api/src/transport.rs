// Shared transport configuration and HTTP status classification.
//
// Both variant clients build their `reqwest::Client` here and funnel every
// response through `read_body`, so the status-code decision table lives in
// one place and the retry policy never has to inspect HTTP itself.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;

use crate::error::Error;

const USER_AGENT: &str = concat!("trydan/", env!("CARGO_PKG_VERSION"));

/// Sentinel for a 429 without a `Retry-After` header: no vendor hint,
/// the retry policy's own backoff curve applies.
const NO_RETRY_AFTER_HINT: u64 = 0;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout (connect + response).
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::Transport)
    }

    /// Build a `reqwest::Client` with additional default headers.
    ///
    /// Used by both variant clients to inject their auth header
    /// (`apikey` or `Authorization: Bearer`) on every request.
    pub fn build_client_with_headers(&self, headers: HeaderMap) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }
}

/// Raw bytes + declared content type of a successful vendor response.
///
/// The transport layer does not interpret body semantics -- shape
/// detection happens in [`crate::status`].
#[derive(Debug)]
pub struct RawBody {
    pub text: String,
    pub content_type: Option<String>,
}

/// Read the body of a successful response, or classify the failure.
///
/// 2xx yields the raw body; 401 is [`Error::InvalidToken`], 404 is
/// [`Error::NotFound`], 429 is [`Error::RateLimited`], 5xx is
/// [`Error::Server`], any other 4xx is [`Error::Api`].
pub(crate) async fn read_body(resp: reqwest::Response) -> Result<RawBody, Error> {
    let status = resp.status();
    if status.is_success() {
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let text = resp.text().await.map_err(Error::Transport)?;
        return Ok(RawBody { text, content_type });
    }

    Err(classify_failure(status, resp).await)
}

async fn classify_failure(status: StatusCode, resp: reqwest::Response) -> Error {
    match status {
        StatusCode::UNAUTHORIZED => Error::InvalidToken,
        StatusCode::NOT_FOUND => Error::NotFound,
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after_secs = resp
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(NO_RETRY_AFTER_HINT);
            Error::RateLimited { retry_after_secs }
        }
        s if s.is_server_error() => Error::Server {
            status: s.as_u16(),
            message: body_preview(resp).await,
        },
        s => Error::Api {
            status: s.as_u16(),
            message: body_preview(resp).await,
        },
    }
}

/// First 200 bytes of an error body, for diagnostics.
async fn body_preview(resp: reqwest::Response) -> String {
    let body = resp.text().await.unwrap_or_default();
    let mut preview: String = body.chars().take(200).collect();
    if preview.len() < body.len() {
        preview.push_str("...");
    }
    preview
}
