//! secp256k1 signing identity.
//!
//! Flow: hex private key → scalar → uncompressed public key → keccak256 → last 20 bytes

use k256::ecdsa::{SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::PublicKey;
use tsnn_types::{hex_to_bytes, Address, Result, TsnnError};

use crate::hash::keccak256;

/// A private key together with the account address it controls.
#[derive(Clone)]
pub struct Identity {
    signing_key: SigningKey,
    public_address: Address,
}

impl Identity {
    /// Parse a hex-encoded private key (with or without 0x prefix).
    pub fn from_hex(private_key: &str) -> Result<Self> {
        let bytes = hex_to_bytes(private_key.trim())
            .map_err(|e| TsnnError::MalformedIdentity(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Build an identity from a 32-byte big-endian secret scalar.
    ///
    /// Zero and values at or above the curve order are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(TsnnError::MalformedIdentity(format!(
                "private key must be 32 bytes, got {}",
                bytes.len()
            )));
        }
        let signing_key = SigningKey::from_slice(bytes)
            .map_err(|_| TsnnError::MalformedIdentity("not a valid secp256k1 scalar".into()))?;
        let public_address = public_key_to_address(signing_key.verifying_key());
        Ok(Self { signing_key, public_address })
    }

    pub fn public_address(&self) -> Address {
        self.public_address
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("public_address", &self.public_address)
            .finish_non_exhaustive()
    }
}

/// Account address of a public key: the last 20 bytes of keccak256(x || y).
pub fn public_key_to_address(key: &VerifyingKey) -> Address {
    let point = PublicKey::from(key).to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// Derive the account address for a hex private key.
pub fn private_key_to_address(private_key: &str) -> Result<Address> {
    Ok(Identity::from_hex(private_key)?.public_address())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsnn_types::address_to_hex;

    #[test]
    fn test_address_derivation_vectors_from_json() {
        let data = include_str!("../../../tests/vectors/key_derivation.json");
        let vectors: Vec<serde_json::Value> = serde_json::from_str(data).unwrap();

        for v in &vectors {
            let private_key = v["private_key"].as_str().unwrap();
            let expected = v["expected_address"].as_str().unwrap();

            let address = address_to_hex(&private_key_to_address(private_key).unwrap());

            assert_eq!(
                address, expected,
                "address mismatch for '{}': got {} expected {}",
                v["name"].as_str().unwrap(), address, expected
            );
        }
    }

    #[test]
    fn test_rejects_zero_scalar() {
        let zero = "0".repeat(64);
        assert!(matches!(
            Identity::from_hex(&zero),
            Err(TsnnError::MalformedIdentity(_))
        ));
    }

    #[test]
    fn test_rejects_scalar_above_order() {
        let above = "f".repeat(64);
        assert!(matches!(
            Identity::from_hex(&above),
            Err(TsnnError::MalformedIdentity(_))
        ));
    }

    #[test]
    fn test_rejects_short_and_non_hex_keys() {
        assert!(matches!(
            Identity::from_hex("0x0102"),
            Err(TsnnError::MalformedIdentity(_))
        ));
        assert!(matches!(
            Identity::from_hex("not-a-key"),
            Err(TsnnError::MalformedIdentity(_))
        ));
    }

    #[test]
    fn test_debug_hides_secret() {
        let id = Identity::from_hex(
            "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318",
        )
        .unwrap();
        let rendered = format!("{:?}", id);
        assert!(!rendered.contains("4c0883a6"));
        assert!(rendered.contains("public_address"));
    }
}
