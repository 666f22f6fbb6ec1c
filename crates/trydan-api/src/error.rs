use std::time::Duration;

use thiserror::Error;

/// Top-level error type for the `trydan-api` crate.
///
/// Covers every failure mode across both API variants: authentication,
/// transport, vendor-side responses, and body parsing. `trydan-core` maps
/// these into user-facing diagnostics. The classification helpers below
/// keep the retry decision table (`RetryPolicy`) independent of HTTP
/// status handling.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Token rejected by the vendor (HTTP 401). Terminal -- surfaces as
    /// "reauthentication required" upstream.
    #[error("Invalid API token (HTTP 401)")]
    InvalidToken,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Vendor responses ────────────────────────────────────────────
    /// Rate limited (HTTP 429). `retry_after_secs` comes from the
    /// `Retry-After` header when the vendor sends one.
    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Target device unknown to the vendor (HTTP 404).
    #[error("Device not found")]
    NotFound,

    /// Vendor-side failure (HTTP 5xx). Transient.
    #[error("Vendor server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    /// Any other client-side rejection (4xx not covered above).
    #[error("Vendor API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// The body matched none of the known response shapes. The raw text
    /// is retained for diagnostics; this fails the fetch, never the
    /// process.
    #[error("Unrecognized response shape: {message}")]
    Parse { message: String, body: String },

    // ── Capability ──────────────────────────────────────────────────
    /// The configured API variant has no endpoint for this operation.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    // ── Configuration ───────────────────────────────────────────────
    /// Client could not be constructed from the given configuration.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } | Self::RateLimited { .. } | Self::Server { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if this error means the token was rejected and
    /// reauthentication might resolve it.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::InvalidToken)
    }

    /// Returns `true` if this is a "device not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Minimum wait hinted by the vendor before retrying, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after_secs } if *retry_after_secs > 0 => {
                Some(Duration::from_secs(*retry_after_secs))
            }
            _ => None,
        }
    }
}
