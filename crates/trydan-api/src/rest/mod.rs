// REST client modules
//
// Hand-written client for the path-addressed V2C REST deployment
// (`api.v2c.cloud`). Bearer-token auth, JSON request and response bodies,
// with a `{"data": ...}` envelope stripped by the normalizer.

pub mod client;
pub mod device;

pub use client::RestClient;
