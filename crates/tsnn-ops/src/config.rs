//! SDK configuration.

use serde::{Deserialize, Serialize};
use tsnn_types::{Result, TsnnError, TSN_URI};

/// Endpoints and timeouts for the default collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    /// JSON-RPC endpoint used to read wallet counters.
    pub rpc_url: String,
    pub discovery_uri: String,
    pub request_timeout_ms: u64,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            discovery_uri: TSN_URI.to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl SdkConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TsnnError::Serialization(e.to_string()))
    }
}
