//! `#[serde(with = ...)]` helpers for the payload wire format.
//!
//! Addresses, byte strings and signature parts travel as 0x-prefixed hex;
//! 256-bit amounts travel as decimal strings so JSON consumers never lose
//! precision.

use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

use crate::{address_to_hex, bytes_to_hex, hex_to_bytes, parse_address, Address, U256};

fn hex_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let s = String::deserialize(deserializer)?;
    if !s.starts_with("0x") {
        return Err(D::Error::custom(format!("expected 0x-prefixed hex, got {}", s)));
    }
    Ok(s)
}

pub mod address {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Address, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&address_to_hex(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
        let s = hex_string(deserializer)?;
        parse_address(&s).map_err(D::Error::custom)
    }
}

pub mod bytes {
    use super::*;

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&bytes_to_hex(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = hex_string(deserializer)?;
        hex_to_bytes(&s).map_err(D::Error::custom)
    }
}

pub mod bytes32 {
    use super::*;

    pub fn serialize<S: Serializer>(value: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&bytes_to_hex(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
        let s = hex_string(deserializer)?;
        let bytes = hex_to_bytes(&s).map_err(D::Error::custom)?;
        bytes
            .try_into()
            .map_err(|b: Vec<u8>| D::Error::custom(format!("expected 32 bytes, got {}", b.len())))
    }
}

/// Single byte rendered as `0x1b`.
pub mod byte {
    use super::*;

    pub fn serialize<S: Serializer>(value: &u8, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{:02x}", value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
        let s = hex_string(deserializer)?;
        u8::from_str_radix(&s[2..], 16).map_err(D::Error::custom)
    }
}

pub mod decimal {
    use super::*;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(D::Error::custom(format!("expected decimal digits, got {}", s)));
        }
        U256::from_str_radix(&s, 10).map_err(D::Error::custom)
    }
}
