// Kong gateway client modules
//
// Hand-written client for the V2C Kong gateway endpoints (the variant
// documented in the vendor Swagger). Query-parameter addressed, `apikey`
// header auth, free-form response bodies.

pub mod client;
pub mod device;

pub use client::GatewayClient;
