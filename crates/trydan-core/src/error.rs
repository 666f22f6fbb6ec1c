// ── Core error types ──
//
// User-facing errors from trydan-core. Consumers never see raw HTTP
// status codes or parse failures directly -- the `From<trydan_api::Error>`
// impl translates transport-layer errors into domain-appropriate
// variants, including the specific setup-failure reasons (cannot
// connect, invalid auth, timeout, device not found).

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Setup / connection errors ────────────────────────────────────
    #[error("Cannot reach the V2C Cloud API: {reason}")]
    CannotConnect { reason: String },

    #[error("Authentication failed -- the API token was rejected")]
    InvalidAuth,

    #[error("Device not found on this account -- check the device id")]
    DeviceNotFound,

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Steady-state errors ──────────────────────────────────────────
    #[error("Status refresh failed: {message}")]
    RefreshFailed { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Operation not supported by this API variant: {operation}")]
    Unsupported { operation: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` if reauthentication might resolve this error.
    pub fn needs_reauth(&self) -> bool {
        matches!(self, Self::InvalidAuth)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<trydan_api::Error> for CoreError {
    fn from(err: trydan_api::Error) -> Self {
        use trydan_api::Error as Api;

        match err {
            Api::InvalidToken => Self::InvalidAuth,
            Api::NotFound => Self::DeviceNotFound,
            Api::Timeout { timeout_secs } => Self::Timeout { timeout_secs },
            Api::UnsupportedOperation(op) => Self::Unsupported {
                operation: op.to_owned(),
            },
            Api::InvalidUrl(e) => Self::Config {
                message: format!("invalid base URL: {e}"),
            },
            Api::Config { message } => Self::Config { message },
            Api::Transport(ref e) if e.is_connect() => Self::CannotConnect {
                reason: e.to_string(),
            },
            Api::Parse { message, .. } => Self::RefreshFailed {
                message: format!("unrecognized vendor response: {message}"),
            },
            other => Self::RefreshFailed {
                message: other.to_string(),
            },
        }
    }
}
