//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use trydan_core::CoreError;

/// Exit codes, stable for scripting.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UNSUPPORTED: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the V2C Cloud API")]
    #[diagnostic(
        code(trydan::connection_failed),
        help("Check your network connection and the --base-url override, if any.\nCause: {reason}")
    )]
    ConnectionFailed { reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(trydan::timeout),
        help("Increase --timeout or check the vendor service status.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(trydan::auth_failed),
        help(
            "The API token was rejected. Tokens are issued in the V2C Cloud\n\
             portal; generate a fresh one and update your config."
        )
    )]
    AuthFailed,

    #[error("No API token configured")]
    #[diagnostic(
        code(trydan::no_credentials),
        help(
            "Set TRYDAN_TOKEN, pass --token, or run: trydan config init\n\
             Config file: {path}"
        )
    )]
    NoCredentials { path: String },

    #[error("No device id configured")]
    #[diagnostic(
        code(trydan::no_device_id),
        help(
            "Pass --device-id or set device_id in the config file.\n\
             The id is shown in the V2C app under charger settings."
        )
    )]
    NoDeviceId,

    // ── Resources ────────────────────────────────────────────────────
    #[error("Device not found on this account")]
    #[diagnostic(
        code(trydan::not_found),
        help("Run: trydan identity to inspect the pairing, and verify the device id.")
    )]
    DeviceNotFound,

    // ── Unsupported ──────────────────────────────────────────────────
    #[error("Operation not supported: {operation}")]
    #[diagnostic(
        code(trydan::unsupported),
        help(
            "The configured API variant has no endpoint for this operation.\n\
             If your deployment supports the other variant, select it with --api."
        )
    )]
    Unsupported { operation: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(trydan::validation))]
    Validation { field: String, reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(trydan::api_error))]
    Api { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    #[diagnostic(code(trydan::config))]
    Config { message: String },

    #[error("Config file already exists at {path}")]
    #[diagnostic(
        code(trydan::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(trydan::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::DeviceNotFound => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Unsupported { .. } => exit_code::UNSUPPORTED,
            Self::Validation { .. } | Self::NoDeviceId => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CannotConnect { reason } => Self::ConnectionFailed { reason },
            CoreError::InvalidAuth => Self::AuthFailed,
            CoreError::DeviceNotFound => Self::DeviceNotFound,
            CoreError::Timeout { timeout_secs } => Self::Timeout {
                seconds: timeout_secs,
            },
            CoreError::Unsupported { operation } => Self::Unsupported { operation },
            CoreError::RefreshFailed { message } => Self::Api { message },
            CoreError::Config { message } => Self::Config { message },
        }
    }
}
