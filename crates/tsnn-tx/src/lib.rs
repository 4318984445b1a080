//! Signed payload construction and relay network discovery.
//!
//! - Hash the execution tuple in contract order
//! - Sign the personal-message digest
//! - Look up an active relay node

pub mod builder;
pub mod discovery_client;

pub use builder::{execution_digest, PayloadBuilder, PayloadDigests};
pub use discovery_client::DiscoveryClient;
