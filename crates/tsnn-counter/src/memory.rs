//! In-memory counter oracle for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::CounterOracle;
use tsnn_types::{Address, Result, TsnnError, U256};

/// Scripted counters keyed by (account, sender).
///
/// With `advance_on_read`, every fetch bumps the stored value so each call
/// observes a different counter.
pub struct MemoryCounterOracle {
    counters: Mutex<HashMap<(Address, Address), U256>>,
    calls: AtomicUsize,
    advance_on_read: bool,
    unavailable: AtomicBool,
}

impl MemoryCounterOracle {
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            advance_on_read: false,
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn advancing() -> Self {
        Self { advance_on_read: true, ..Self::new() }
    }

    pub fn set_counter(&self, account: Address, sender: Address, value: U256) {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters.insert((account, sender), value);
    }

    /// Make subsequent fetches fail as if the backend were unreachable.
    pub fn set_unavailable(&self, flag: bool) {
        self.unavailable.store(flag, Ordering::SeqCst);
    }

    /// Number of fetches served so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MemoryCounterOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CounterOracle for MemoryCounterOracle {
    async fn fetch_counter(&self, account: Address, sender: Address) -> Result<U256> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(TsnnError::CounterUnavailable("memory oracle offline".into()));
        }

        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        let slot = counters.entry((account, sender)).or_insert(U256::ZERO);
        let current = *slot;
        if self.advance_on_read {
            *slot = current.saturating_add(U256::from(1u64));
        }
        Ok(current)
    }
}
