//! End-to-end payload preparation: session, counter lookup, encoding, signing.
//!
//! Every signing operation runs the same pipeline:
//! action → execution intent → fresh counter → signed payload.
//!
//! Counters are never cached. Two concurrent calls for the same sender may
//! observe the same counter and produce payloads of which only one can be
//! executed; callers that need one payload in flight per sender must
//! serialize their calls.

use std::sync::{Arc, OnceLock};
use tsnn_abi::{AbiEncoder, StandardAbiEncoder};
use tsnn_actions::{Action, ActionEncoder, Reward};
use tsnn_counter::{CounterOracle, RpcCounterOracle};
use tsnn_tx::DiscoveryClient;
use tsnn_types::{Address, ExecutionIntent, Result, SignedPayload, TsnnError, U256};

pub mod config;
pub mod session;

pub use config::SdkConfig;
pub use session::Session;

/// Client SDK entry point.
pub struct TsnnSdk {
    session: OnceLock<Arc<Session>>,
    counter: Arc<dyn CounterOracle>,
    actions: ActionEncoder,
    discovery: DiscoveryClient,
}

impl TsnnSdk {
    pub fn new(counter: Arc<dyn CounterOracle>, abi: Arc<dyn AbiEncoder>) -> Self {
        Self {
            session: OnceLock::new(),
            counter,
            actions: ActionEncoder::new(abi),
            discovery: DiscoveryClient::default(),
        }
    }

    /// Wire the JSON-RPC counter oracle and the standard ABI encoder.
    pub fn from_config(config: &SdkConfig) -> Self {
        let counter = RpcCounterOracle::new(&config.rpc_url, Some(config.request_timeout_ms));
        Self::new(Arc::new(counter), Arc::new(StandardAbiEncoder)).with_discovery(
            DiscoveryClient::new(&config.discovery_uri, Some(config.request_timeout_ms)),
        )
    }

    pub fn with_discovery(mut self, discovery: DiscoveryClient) -> Self {
        self.discovery = discovery;
        self
    }

    /// Establish the signing session. Can only succeed once.
    pub fn initialize(&self, private_key: &str, wallet: &str) -> Result<Arc<Session>> {
        let session = Arc::new(Session::initialize(private_key, wallet)?);
        self.session
            .set(session.clone())
            .map_err(|_| TsnnError::AlreadyInitialized)?;
        Ok(session)
    }

    pub fn session(&self) -> Result<Arc<Session>> {
        match self.session.get() {
            Some(session) => Ok(session.clone()),
            None => {
                tracing::warn!("rejected call on uninitialized session");
                Err(TsnnError::UninitializedSession)
            }
        }
    }

    /// Look up an active relay node.
    pub async fn get_tsn(&self) -> Result<String> {
        self.discovery.get_tsn().await
    }

    /// Fetch the sender's current counter and sign `intent` against it.
    pub async fn prepare_payload(
        &self,
        wallet: Address,
        from: Address,
        intent: &ExecutionIntent,
    ) -> Result<SignedPayload> {
        let session = self.session()?;
        let counter = self.counter.fetch_counter(wallet, from).await?;
        session.payload_builder().build(wallet, from, intent, counter)
    }

    /// Encode `action` for the session wallet and sign it as the session identity.
    pub async fn prepare_action(&self, action: &Action, reward: Reward) -> Result<SignedPayload> {
        let session = self.session()?;
        let intent = self.actions.encode(session.wallet(), action, reward)?;
        self.prepare_payload(session.wallet(), session.public_address(), &intent)
            .await
    }

    pub async fn transfer_ether_no_reward(&self, amount: U256, to: Address) -> Result<SignedPayload> {
        self.prepare_action(&Action::TransferEther { to, amount }, Reward::none())
            .await
    }

    pub async fn transfer_ether_with_ether_reward(
        &self,
        amount: U256,
        to: Address,
        reward_amount: U256,
    ) -> Result<SignedPayload> {
        self.prepare_action(&Action::TransferEther { to, amount }, Reward::ether(reward_amount))
            .await
    }

    pub async fn transfer_tokens_no_reward(
        &self,
        token: Address,
        amount: U256,
        to: Address,
    ) -> Result<SignedPayload> {
        self.prepare_action(&Action::TransferTokens { token, to, amount }, Reward::none())
            .await
    }

    /// Token transfer paying the relayer in the same token.
    pub async fn transfer_tokens_with_token_reward(
        &self,
        token: Address,
        amount: U256,
        to: Address,
        reward_amount: U256,
    ) -> Result<SignedPayload> {
        self.prepare_action(
            &Action::TransferTokens { token, to, amount },
            Reward::token(token, reward_amount),
        )
        .await
    }

    pub async fn add_master_no_reward(&self, account: Address) -> Result<SignedPayload> {
        self.prepare_action(&Action::AddMasterAccount { account }, Reward::none())
            .await
    }

    pub async fn add_action_no_reward(&self, account: Address) -> Result<SignedPayload> {
        self.prepare_action(&Action::AddActionAccount { account }, Reward::none())
            .await
    }
}
