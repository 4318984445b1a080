//! Keccak-256 and the personal-message digest.

use sha3::{Digest, Keccak256};

const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Personal-message digest of a 32-byte hash.
///
/// keccak256("\x19Ethereum Signed Message:\n32" || hash)
pub fn personal_message_hash(hash: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(PERSONAL_MESSAGE_PREFIX);
    hasher.update(hash);
    hasher.finalize().into()
}
