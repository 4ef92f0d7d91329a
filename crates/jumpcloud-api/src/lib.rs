// jumpcloud-api: Async Rust client for the JumpCloud v2 REST API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{ClientConfig, DEFAULT_BASE_URL, JumpCloudClient};
pub use error::Error;
pub use transport::TransportConfig;
