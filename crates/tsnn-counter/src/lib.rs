//! Replay-protection counter lookup for personal wallets.
//!
//! Defines the `CounterOracle` trait every account-state backend implements.
//! Provides an `RpcCounterOracle` over JSON-RPC and a `MemoryCounterOracle`
//! for testing.

use async_trait::async_trait;
use tsnn_types::{Address, Result, U256};

pub mod memory;
pub mod rpc_client;

pub use memory::MemoryCounterOracle;
pub use rpc_client::RpcCounterOracle;

/// Read-only view of a wallet's per-sender counter.
///
/// Implementations must query fresh state on every call; the payload
/// builder relies on this and never caches a counter itself.
#[async_trait]
pub trait CounterOracle: Send + Sync {
    /// Next counter value `account` will accept from `sender`.
    ///
    /// Failures surface as `TsnnError::CounterUnavailable`.
    async fn fetch_counter(&self, account: Address, sender: Address) -> Result<U256>;
}
