//! HTTP client for the TSNN discovery service.
//!
//! Endpoint:
//! - GET <discovery_uri> → `{ "tsn": "<active relay node>" }`

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tsnn_types::{Result, TsnnError, TSN_URI};

/// Discovery response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryResponse {
    pub tsn: String,
}

/// Looks up an active relay node.
pub struct DiscoveryClient {
    uri: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl DiscoveryClient {
    pub fn new(uri: &str, timeout_ms: Option<u64>) -> Self {
        let timeout_ms = timeout_ms.unwrap_or(30_000);
        Self {
            uri: uri.to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_millis(timeout_ms))
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Fetch the currently advertised relay node.
    pub async fn get_tsn(&self) -> Result<String> {
        let resp = self.client
            .get(&self.uri)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| TsnnError::Discovery(format!("discovery request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(TsnnError::Discovery(format!(
                "discovery service returned status {}",
                resp.status()
            )));
        }

        let body: DiscoveryResponse = resp
            .json()
            .await
            .map_err(|e| TsnnError::Discovery(format!("failed to parse discovery response: {}", e)))?;

        let tsn = parse_tsn(body)?;
        tracing::info!(tsn = %tsn, "discovered relay node");
        Ok(tsn)
    }
}

impl Default for DiscoveryClient {
    fn default() -> Self {
        Self::new(TSN_URI, None)
    }
}

fn parse_tsn(body: DiscoveryResponse) -> Result<String> {
    let tsn = body.tsn.trim();
    if tsn.is_empty() {
        return Err(TsnnError::Discovery("discovery response has empty tsn".into()));
    }
    Ok(tsn.to_string())
}
