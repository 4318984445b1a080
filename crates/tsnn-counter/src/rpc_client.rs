//! JSON-RPC counter oracle.
//!
//! Reads `nonces(sender)` from the wallet contract:
//! - POST <rpc_url> `eth_call` with `{to: account, data: nonces(sender)}` at `latest`

use async_trait::async_trait;
use alloy_sol_types::SolCall;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tsnn_abi::functions::noncesCall;
use tsnn_types::{address_to_hex, bytes_to_hex, hex_to_bytes, Address, Hex, Result, TsnnError, U256};

use crate::CounterOracle;

/// `eth_call` transaction object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRequest {
    pub to: Hex,
    pub data: Hex,
}

/// JSON-RPC backed counter oracle.
pub struct RpcCounterOracle {
    rpc_url: String,
    client: reqwest::Client,
    timeout: Duration,
    next_id: AtomicU64,
}

impl RpcCounterOracle {
    pub fn new(rpc_url: &str, timeout_ms: Option<u64>) -> Self {
        let timeout_ms = timeout_ms.unwrap_or(30_000);
        Self {
            rpc_url: rpc_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_millis(timeout_ms))
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_millis(timeout_ms),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Execute a read-only call against `to` and return the raw result bytes.
    pub async fn eth_call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>> {
        let call = CallRequest {
            to: address_to_hex(&to),
            data: bytes_to_hex(data),
        };
        let payload = json!({
            "jsonrpc": "2.0",
            "id": self.next_id.fetch_add(1, Ordering::Relaxed),
            "method": "eth_call",
            "params": [call, "latest"],
        });

        let resp = self.client
            .post(&self.rpc_url)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| TsnnError::CounterUnavailable(format!("rpc request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(TsnnError::CounterUnavailable(format!(
                "rpc returned status {}: {}",
                status, body
            )));
        }

        let body: Value = resp.json().await.map_err(|e| {
            TsnnError::CounterUnavailable(format!("failed to parse rpc response: {}", e))
        })?;

        rpc_result_bytes(&body)
    }
}

/// Extract the `result` bytes of a JSON-RPC response, surfacing `error` objects.
fn rpc_result_bytes(body: &Value) -> Result<Vec<u8>> {
    if let Some(error) = body.get("error") {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or(-32_000);
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(TsnnError::CounterUnavailable(format!(
            "rpc error {}: {}",
            code, message
        )));
    }

    let result = body
        .get("result")
        .and_then(Value::as_str)
        .ok_or_else(|| TsnnError::CounterUnavailable("rpc response has no result".into()))?;

    hex_to_bytes(result).map_err(|e| TsnnError::CounterUnavailable(e.to_string()))
}

/// Decode the `uint256` returned by `nonces`.
fn decode_counter(bytes: &[u8]) -> Result<U256> {
    noncesCall::abi_decode_returns(bytes, true)
        .map(|ret| ret._0)
        .map_err(|e| TsnnError::CounterUnavailable(format!("bad nonces return data: {}", e)))
}

#[async_trait]
impl CounterOracle for RpcCounterOracle {
    async fn fetch_counter(&self, account: Address, sender: Address) -> Result<U256> {
        let data = noncesCall { owner: sender }.abi_encode();

        let counter = match self.eth_call(account, &data).await {
            Ok(bytes) => decode_counter(&bytes)?,
            Err(e) => {
                tracing::warn!(account = %address_to_hex(&account), error = %e, "counter query failed");
                return Err(e);
            }
        };

        tracing::debug!(
            account = %address_to_hex(&account),
            sender = %address_to_hex(&sender),
            counter = %counter,
            "fetched counter"
        );
        Ok(counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_decoding() {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": "0x0000000000000000000000000000000000000000000000000000000000000005",
        });
        let bytes = rpc_result_bytes(&body).unwrap();
        assert_eq!(decode_counter(&bytes).unwrap(), U256::from(5u64));
    }

    #[test]
    fn test_error_object_is_unavailable() {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32000, "message": "execution reverted" },
        });
        let err = rpc_result_bytes(&body).unwrap_err();
        assert!(matches!(err, TsnnError::CounterUnavailable(_)));
        assert!(err.to_string().contains("execution reverted"));
    }

    #[test]
    fn test_empty_result_is_unavailable() {
        // Calling an address without code returns "0x".
        let body = json!({ "jsonrpc": "2.0", "id": 1, "result": "0x" });
        let bytes = rpc_result_bytes(&body).unwrap();
        assert!(matches!(
            decode_counter(&bytes),
            Err(TsnnError::CounterUnavailable(_))
        ));
    }

    #[test]
    fn test_call_request_shape() {
        let call = CallRequest {
            to: address_to_hex(&Address::repeat_byte(0xaa)),
            data: "0x7ecebe00".into(),
        };
        let v = serde_json::to_value(&call).unwrap();
        assert_eq!(v["to"], "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        assert_eq!(v["data"], "0x7ecebe00");
    }

    #[test]
    fn test_nonces_call_data() {
        let data = noncesCall { owner: Address::repeat_byte(0xbb) }.abi_encode();
        assert_eq!(
            bytes_to_hex(&data),
            "0x7ecebe00000000000000000000000000bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"
        );
    }

    #[test]
    fn test_trims_trailing_slash() {
        let oracle = RpcCounterOracle::new("http://localhost:8545/", None);
        assert_eq!(oracle.rpc_url(), "http://localhost:8545");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_unavailable() {
        let oracle = RpcCounterOracle::new("http://127.0.0.1:1", Some(2_000));
        let err = oracle
            .fetch_counter(Address::repeat_byte(0xaa), Address::repeat_byte(0xbb))
            .await
            .unwrap_err();
        assert!(matches!(err, TsnnError::CounterUnavailable(_)));
    }
}
