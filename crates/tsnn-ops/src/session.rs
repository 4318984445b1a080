//! Signing session: the identity and the personal wallet it signs for.

use tsnn_crypto::Identity;
use tsnn_tx::PayloadBuilder;
use tsnn_types::{address_to_hex, parse_address, Address, Result};

/// Immutable once constructed; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Session {
    identity: Identity,
    wallet: Address,
}

impl Session {
    /// Parse a hex private key and a wallet address.
    pub fn initialize(private_key: &str, wallet: &str) -> Result<Self> {
        let identity = Identity::from_hex(private_key)?;
        let wallet = parse_address(wallet)?;
        Ok(Self::new(identity, wallet))
    }

    pub fn new(identity: Identity, wallet: Address) -> Self {
        tracing::info!(
            signer = %address_to_hex(&identity.public_address()),
            wallet = %address_to_hex(&wallet),
            "session initialized"
        );
        Self { identity, wallet }
    }

    pub fn public_address(&self) -> Address {
        self.identity.public_address()
    }

    pub fn wallet(&self) -> Address {
        self.wallet
    }

    pub fn payload_builder(&self) -> PayloadBuilder<'_> {
        PayloadBuilder::new(&self.identity)
    }
}
