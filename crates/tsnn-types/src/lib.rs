//! Shared types for the TSNN client SDK.
//!
//! - Error taxonomy and `Result` alias
//! - Hex / address / amount parsing helpers
//! - `ExecutionIntent` and the wire-level `SignedPayload`

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use alloy_primitives::{Address, U256};

pub mod payload;
pub mod serde_hex;

pub use payload::SignedPayload;

/// 0x-prefixed hex string (e.g. "0x1234...").
pub type Hex = String;

/// One-byte call data sentinel meaning "no data" (serialized as `0x00`).
pub const NO_DATA: [u8; 1] = [0x00];

/// Reward asset sentinel meaning "pay the relayer in the native asset".
pub const REWARD_TYPE_ETHER: Address = Address::ZERO;

/// Default well-known discovery endpoint.
pub const TSN_URI: &str = "http://tsnn.tenzorum.xyz:1888/tsnn";

/// TSNN SDK error types.
#[derive(Debug, Error)]
pub enum TsnnError {
    #[error("session not initialized")]
    UninitializedSession,

    #[error("session already initialized")]
    AlreadyInitialized,

    #[error("counter unavailable: {0}")]
    CounterUnavailable(String),

    #[error("call data encoding failed: {0}")]
    EncodingFailure(String),

    #[error("malformed identity: {0}")]
    MalformedIdentity(String),

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("discovery lookup failed: {0}")]
    Discovery(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("{0}")]
    Other(String),
}

impl TsnnError {
    /// Whether the caller may reasonably retry the same call.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TsnnError::CounterUnavailable(_) | TsnnError::Discovery(_))
    }
}

pub type Result<T> = std::result::Result<T, TsnnError>;

/// The concrete tuple a relayed execution is hashed over.
///
/// `reward_type` is the reward asset: either a token contract address or
/// [`REWARD_TYPE_ETHER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionIntent {
    pub to: Address,
    pub value: U256,
    pub data: Vec<u8>,
    pub reward_type: Address,
    pub reward_amount: U256,
}

impl ExecutionIntent {
    /// Plain value transfer with a native-asset reward.
    pub fn value_transfer(to: Address, value: U256, reward_amount: U256) -> Self {
        Self {
            to,
            value,
            data: NO_DATA.to_vec(),
            reward_type: REWARD_TYPE_ETHER,
            reward_amount,
        }
    }
}

/// Parse a hex string (with or without 0x prefix) into bytes.
pub fn hex_to_bytes(hex_str: &str) -> Result<Vec<u8>> {
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    hex::decode(hex_str).map_err(|e| TsnnError::InvalidHex(e.to_string()))
}

/// Convert bytes to a 0x-prefixed hex string.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse a 20-byte account address. Checksums are not enforced.
pub fn parse_address(address: &str) -> Result<Address> {
    let bytes = hex_to_bytes(address.trim())
        .map_err(|_| TsnnError::InvalidAddress(address.to_string()))?;
    if bytes.len() != 20 {
        return Err(TsnnError::InvalidAddress(format!(
            "{}: expected 20 bytes, got {}",
            address,
            bytes.len()
        )));
    }
    Ok(Address::from_slice(&bytes))
}

/// Lowercase 0x-prefixed rendering of an address.
pub fn address_to_hex(address: &Address) -> Hex {
    bytes_to_hex(address.as_slice())
}

/// Parse an unsigned 256-bit amount from a decimal or 0x-prefixed hex string.
pub fn parse_u256(value: &str) -> Result<U256> {
    let value = value.trim();
    let parsed = match value.strip_prefix("0x") {
        Some(hex_digits) => U256::from_str_radix(hex_digits, 16),
        None => U256::from_str_radix(value, 10),
    };
    parsed.map_err(|e| TsnnError::InvalidAmount(format!("{}: {}", value, e)))
}
