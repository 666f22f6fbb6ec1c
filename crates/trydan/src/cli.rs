//! Clap derive structures for the `trydan` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

use trydan_core::ApiVariant;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// trydan -- command-line bridge to the V2C Cloud charger API
#[derive(Debug, Parser)]
#[command(
    name = "trydan",
    version,
    about = "Control and monitor a V2C Trydan charger from the command line",
    long_about = "A CLI for the V2C Cloud EV charger API.\n\n\
        Supports both vendor deployments: the Kong gateway (apikey auth,\n\
        the common case) and the REST deployment (bearer auth). Select\n\
        with --api or the config file.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// API token (overrides the config file)
    #[arg(long, env = "TRYDAN_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Charger device id
    #[arg(long, short = 'd', env = "TRYDAN_DEVICE_ID", global = true)]
    pub device_id: Option<String>,

    /// API variant to talk to
    #[arg(long, env = "TRYDAN_API", global = true, value_enum)]
    pub api: Option<ApiArg>,

    /// Base URL override (self-hosted gateways, testing)
    #[arg(long, env = "TRYDAN_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, short = 'o', default_value = "plain", global = true, value_enum)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Plain,
    /// One JSON document per record
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ApiArg {
    /// Kong gateway (apikey header) -- the documented deployment
    Gateway,
    /// REST deployment (bearer token)
    Rest,
}

impl From<ApiArg> for ApiVariant {
    fn from(arg: ApiArg) -> Self {
        match arg {
            ApiArg::Gateway => Self::Gateway,
            ApiArg::Rest => Self::Rest,
        }
    }
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch and display the current charger status
    Status,

    /// Poll continuously and print every update (Ctrl-C to stop)
    Watch {
        /// Poll interval in seconds (clamped to 30-300)
        #[arg(long, short = 'i', default_value_t = 30)]
        interval: u64,
    },

    /// Validate credentials and show the paired device identity
    Identity,

    /// Start or stop charging
    Charge {
        #[command(subcommand)]
        action: ChargeAction,
    },

    /// Write a charging parameter
    Set {
        #[command(subcommand)]
        param: SetParam,
    },

    /// Toggle an operating mode
    Mode {
        #[command(subcommand)]
        mode: ModeToggle,
    },

    /// Reboot the charger
    Reboot,

    /// Reset the current charge session counters
    ResetSession,

    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ChargeAction {
    /// Start charging
    Start,
    /// Stop charging
    Stop,
}

#[derive(Debug, Subcommand)]
pub enum SetParam {
    /// Charging current in amperes (0-63)
    Current { amps: u8 },
    /// Upper current limit in amperes (0-63)
    MaxCurrent { amps: u8 },
    /// Lower current limit in amperes (0-63)
    MinCurrent { amps: u8 },
    /// Kilometres of range to add before charging stops
    Km { km: u32 },
}

#[derive(Debug, Subcommand)]
pub enum ModeToggle {
    /// Dynamic power adjustment
    Dynamic {
        #[arg(value_enum)]
        state: OnOff,
    },
    /// Pause charging without disconnecting
    Pause {
        #[arg(value_enum)]
        state: OnOff,
    },
    /// Lock the charger against local use
    Lock {
        #[arg(value_enum)]
        state: OnOff,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OnOff {
    On,
    Off,
}

impl OnOff {
    pub fn as_bool(self) -> bool {
        matches!(self, Self::On)
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the config file path
    Path,
    /// Write a commented config template
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
