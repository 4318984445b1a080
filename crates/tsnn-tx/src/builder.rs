//! Payload builder.
//!
//! digest          = keccak256(wallet ‖ from ‖ to ‖ value ‖ data ‖ rewardType ‖ rewardAmount ‖ counter)
//! personal_digest = keccak256("\x19Ethereum Signed Message:\n32" ‖ digest)
//! (v, r, s)       = sign(personal_digest)
//!
//! The field order mirrors what the wallet contract recomputes on-chain;
//! changing it invalidates every payload.

use alloy_primitives::Bytes;
use alloy_sol_types::SolValue;
use tsnn_crypto::{keccak256, personal_message_hash, signature, Identity};
use tsnn_types::{address_to_hex, Address, ExecutionIntent, Result, SignedPayload, U256};

/// Both hashes of an execution, before signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadDigests {
    pub digest: [u8; 32],
    pub personal_digest: [u8; 32],
}

impl PayloadDigests {
    pub fn compute(wallet: Address, from: Address, intent: &ExecutionIntent, counter: U256) -> Self {
        let digest = execution_digest(wallet, from, intent, counter);
        Self {
            digest,
            personal_digest: personal_message_hash(&digest),
        }
    }
}

/// `abi.encodePacked` of the execution tuple.
fn packed_execution(
    wallet: Address,
    from: Address,
    intent: &ExecutionIntent,
    counter: U256,
) -> Vec<u8> {
    (
        wallet,
        from,
        intent.to,
        intent.value,
        Bytes::copy_from_slice(&intent.data),
        intent.reward_type,
        intent.reward_amount,
        counter,
    )
        .abi_encode_packed()
}

/// Hash of the packed execution tuple.
pub fn execution_digest(
    wallet: Address,
    from: Address,
    intent: &ExecutionIntent,
    counter: U256,
) -> [u8; 32] {
    keccak256(&packed_execution(wallet, from, intent, counter))
}

/// Signs execution intents with a fixed identity.
pub struct PayloadBuilder<'a> {
    identity: &'a Identity,
}

impl<'a> PayloadBuilder<'a> {
    pub fn new(identity: &'a Identity) -> Self {
        Self { identity }
    }

    /// Hash, sign and assemble a payload.
    ///
    /// Deterministic: equal inputs yield a byte-identical payload.
    pub fn build(
        &self,
        wallet: Address,
        from: Address,
        intent: &ExecutionIntent,
        counter: U256,
    ) -> Result<SignedPayload> {
        if from != self.identity.public_address() {
            tracing::warn!(
                from = %address_to_hex(&from),
                signer = %address_to_hex(&self.identity.public_address()),
                "payload sender differs from signing identity"
            );
        }

        let digests = PayloadDigests::compute(wallet, from, intent, counter);
        let sig = signature::sign_prehash(self.identity, &digests.personal_digest)?;

        tracing::debug!(
            wallet = %address_to_hex(&wallet),
            to = %address_to_hex(&intent.to),
            counter = %counter,
            "signed execution payload"
        );

        Ok(SignedPayload {
            v: sig.v,
            r: sig.r,
            s: sig.s,
            from,
            to: intent.to,
            value: intent.value,
            data: intent.data.clone(),
            reward_type: intent.reward_type,
            reward_amount: intent.reward_amount,
        })
    }
}
