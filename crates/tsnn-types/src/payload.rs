//! Signed execution payload, the artifact handed to a relayer.
//!
//! Wire shape (JSON, field order fixed):
//! `{ v, r, s, from, to, value, data, rewardType, rewardAmount }`

use serde::{Deserialize, Serialize};

use crate::{serde_hex, Address, ExecutionIntent, Result, TsnnError, U256};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SignedPayload {
    #[serde(with = "serde_hex::byte")]
    pub v: u8,
    #[serde(with = "serde_hex::bytes32")]
    pub r: [u8; 32],
    #[serde(with = "serde_hex::bytes32")]
    pub s: [u8; 32],
    #[serde(with = "serde_hex::address")]
    pub from: Address,
    #[serde(with = "serde_hex::address")]
    pub to: Address,
    #[serde(with = "serde_hex::decimal")]
    pub value: U256,
    #[serde(with = "serde_hex::bytes")]
    pub data: Vec<u8>,
    #[serde(with = "serde_hex::address")]
    pub reward_type: Address,
    #[serde(with = "serde_hex::decimal")]
    pub reward_amount: U256,
}

impl SignedPayload {
    /// The execution tuple this payload authorizes.
    pub fn intent(&self) -> ExecutionIntent {
        ExecutionIntent {
            to: self.to,
            value: self.value,
            data: self.data.clone(),
            reward_type: self.reward_type,
            reward_amount: self.reward_amount,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| TsnnError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TsnnError::Serialization(e.to_string()))
    }
}
