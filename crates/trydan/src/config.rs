//! CLI-owned configuration: TOML file + env + flag resolution into a
//! `ChargerConfig`.
//!
//! Core never sees these types -- it receives a pre-built config. Flags
//! win over environment variables, which win over the file.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use trydan_core::{ApiVariant, ChargerConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config struct ───────────────────────────────────────────────

/// On-disk configuration. Every field is optional; flags and env vars
/// fill the gaps.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FileConfig {
    pub token: Option<String>,
    pub device_id: Option<String>,
    /// API variant: "gateway" or "rest".
    pub api: Option<String>,
    pub base_url: Option<String>,
    /// Seconds between polls for `trydan watch` (30-300).
    pub poll_interval: Option<u64>,
    /// Request timeout in seconds.
    pub timeout: Option<u64>,
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "lagea", "trydan")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("trydan");
            p.push("config.toml");
            p
        })
}

// ── Config loading ───────────────────────────────────────────────────

pub fn load_file_config() -> Result<FileConfig, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(FileConfig::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("TRYDAN_"));

    Ok(figment.extract()?)
}

fn load_file_config_or_default() -> FileConfig {
    load_file_config().unwrap_or_default()
}

// ── Resolution ───────────────────────────────────────────────────────

/// Merge CLI flags over the file/env config into a `ChargerConfig`.
///
/// This is the single boundary where CLI config types cross into core.
pub fn resolve(global: &GlobalOpts) -> Result<ChargerConfig, CliError> {
    let file = load_file_config_or_default();

    let token = global
        .token
        .clone()
        .or(file.token)
        .ok_or_else(|| CliError::NoCredentials {
            path: config_path().display().to_string(),
        })?;

    let device_id = global
        .device_id
        .clone()
        .or(file.device_id)
        .ok_or(CliError::NoDeviceId)?;

    let variant = match (global.api, file.api.as_deref()) {
        (Some(arg), _) => arg.into(),
        (None, Some(name)) => name.parse().map_err(|reason| CliError::Validation {
            field: "api".into(),
            reason,
        })?,
        // The gateway is the vendor-documented deployment.
        (None, None) => ApiVariant::Gateway,
    };

    let mut config = ChargerConfig::new(variant, SecretString::from(token), device_id);
    config.base_url = global.base_url.clone().or(file.base_url);
    if let Some(secs) = file.poll_interval {
        config.poll_interval_secs = secs;
    }
    if let Some(secs) = global.timeout.or(file.timeout) {
        config.timeout = Duration::from_secs(secs);
    }

    Ok(config)
}

// ── Template ─────────────────────────────────────────────────────────

/// Commented template written by `trydan config init`.
pub const CONFIG_TEMPLATE: &str = r#"# trydan configuration
#
# Every value here can be overridden by a TRYDAN_* environment variable
# or a command-line flag.

# API token from the V2C Cloud portal.
# token = "your-api-token"

# Charger id, shown in the V2C app under charger settings.
# device_id = "ABC123"

# Vendor deployment to talk to: "gateway" (default) or "rest".
# api = "gateway"

# Seconds between polls for `trydan watch` (30-300).
# poll_interval = 30

# Request timeout in seconds.
# timeout = 10
"#;
