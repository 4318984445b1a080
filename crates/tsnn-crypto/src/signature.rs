//! Recoverable ECDSA signatures over 32-byte prehashes.
//!
//! Nonces are derived per RFC 6979, so signing is deterministic. `s` is
//! normalized to the lower half of the curve order and `v` carries the
//! recovery id offset by 27.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use tsnn_types::{Address, Result, TsnnError};

use crate::keys::{public_key_to_address, Identity};

const V_OFFSET: u8 = 27;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature {
    pub v: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

/// Sign a 32-byte prehash with the identity's private key.
pub fn sign_prehash(identity: &Identity, prehash: &[u8; 32]) -> Result<RecoverableSignature> {
    let (signature, recovery_id) = identity
        .signing_key()
        .sign_prehash_recoverable(prehash)
        .map_err(|e| TsnnError::Signing(e.to_string()))?;

    let bytes = signature.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);

    Ok(RecoverableSignature {
        v: V_OFFSET + recovery_id.to_byte(),
        r,
        s,
    })
}

/// Recover the signer address from a prehash and signature.
pub fn recover_address(prehash: &[u8; 32], signature: &RecoverableSignature) -> Result<Address> {
    let recovery_id = signature
        .v
        .checked_sub(V_OFFSET)
        .and_then(RecoveryId::from_byte)
        .ok_or_else(|| TsnnError::Signing(format!("invalid v: {}", signature.v)))?;

    let mut rs = [0u8; 64];
    rs[..32].copy_from_slice(&signature.r);
    rs[32..].copy_from_slice(&signature.s);
    let sig = Signature::from_slice(&rs).map_err(|e| TsnnError::Signing(e.to_string()))?;

    let key = VerifyingKey::recover_from_prehash(prehash, &sig, recovery_id)
        .map_err(|e| TsnnError::Signing(e.to_string()))?;
    Ok(public_key_to_address(&key))
}
