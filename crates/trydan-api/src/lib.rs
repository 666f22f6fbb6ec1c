// trydan-api: Async Rust client for the V2C Cloud charger API (Gateway + REST)

pub mod client;
pub mod error;
pub mod gateway;
pub mod rest;
pub mod retry;
pub mod status;
pub mod transport;
pub mod variant;

pub use client::{ChargerClient, ClientConfig};
pub use error::Error;
pub use retry::RetryPolicy;
pub use status::{ChargeState, ChargerStatus, DeviceIdentity};
pub use transport::TransportConfig;
pub use variant::{ApiVariant, AuthScheme};
