//! Cryptographic primitives for relayed execution payloads.
//!
//! - `hash`: keccak-256, personal-message digest
//! - `keys`: secp256k1 identity and address derivation
//! - `signature`: deterministic recoverable ECDSA signatures

pub mod hash;
pub mod keys;
pub mod signature;

pub use hash::{keccak256, personal_message_hash};
pub use keys::Identity;
pub use signature::RecoverableSignature;
