//! Maps high-level wallet actions onto the execution tuple that gets signed.
//!
//! - Ether transfer: `to = destination`, `value = amount`, `data = 0x00`
//! - Token transfer: `to = token`, `value = 0`, `data = transfer(destination, amount)`
//! - Role grants: `to = wallet`, `value = 0`, `data = addMasterAccount/addActionAccount(account)`

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tsnn_abi::{functions, AbiEncoder, AbiValue, FunctionSpec};
use tsnn_types::{Address, ExecutionIntent, Result, TsnnError, U256, NO_DATA, REWARD_TYPE_ETHER};

/// Relayer reward attached to an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub asset: Address,
    pub amount: U256,
}

impl Reward {
    pub fn none() -> Self {
        Self { asset: REWARD_TYPE_ETHER, amount: U256::ZERO }
    }

    pub fn ether(amount: U256) -> Self {
        Self { asset: REWARD_TYPE_ETHER, amount }
    }

    pub fn token(token: Address, amount: U256) -> Self {
        Self { asset: token, amount }
    }
}

impl Default for Reward {
    fn default() -> Self {
        Self::none()
    }
}

/// A wallet action the user wants relayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    TransferEther { to: Address, amount: U256 },
    TransferTokens { token: Address, to: Address, amount: U256 },
    AddMasterAccount { account: Address },
    AddActionAccount { account: Address },
}

/// Turns actions into execution intents using an injected ABI encoder.
#[derive(Clone)]
pub struct ActionEncoder {
    abi: Arc<dyn AbiEncoder>,
}

impl ActionEncoder {
    pub fn new(abi: Arc<dyn AbiEncoder>) -> Self {
        Self { abi }
    }

    /// Call data for `transfer(to, amount)` on a token contract.
    pub fn token_transfer_data(&self, to: Address, amount: U256) -> Result<Vec<u8>> {
        self.encode_call(
            &functions::erc20_transfer(),
            &[AbiValue::Address(to), AbiValue::Uint(amount)],
        )
    }

    pub fn add_master_data(&self, account: Address) -> Result<Vec<u8>> {
        self.encode_call(&functions::add_master_account(), &[AbiValue::Address(account)])
    }

    pub fn add_action_data(&self, account: Address) -> Result<Vec<u8>> {
        self.encode_call(&functions::add_action_account(), &[AbiValue::Address(account)])
    }

    /// Build the execution intent for `action` against `wallet`.
    pub fn encode(&self, wallet: Address, action: &Action, reward: Reward) -> Result<ExecutionIntent> {
        let (to, value, data) = match action {
            Action::TransferEther { to, amount } => (*to, *amount, NO_DATA.to_vec()),
            Action::TransferTokens { token, to, amount } => {
                (*token, U256::ZERO, self.token_transfer_data(*to, *amount)?)
            }
            Action::AddMasterAccount { account } => {
                (wallet, U256::ZERO, self.add_master_data(*account)?)
            }
            Action::AddActionAccount { account } => {
                (wallet, U256::ZERO, self.add_action_data(*account)?)
            }
        };

        Ok(ExecutionIntent {
            to,
            value,
            data,
            reward_type: reward.asset,
            reward_amount: reward.amount,
        })
    }

    /// Encode and reject results that cannot be a function call.
    fn encode_call(&self, function: &FunctionSpec, args: &[AbiValue]) -> Result<Vec<u8>> {
        let data = self.abi.encode_function_call(function, args)?;
        if data.len() < 4 {
            return Err(TsnnError::EncodingFailure(format!(
                "encoder returned {} bytes for {}",
                data.len(),
                function.signature()
            )));
        }
        if data[..4] != function.selector() {
            return Err(TsnnError::EncodingFailure(format!(
                "encoder returned wrong selector for {}",
                function.signature()
            )));
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsnn_abi::StandardAbiEncoder;

    struct EmptyEncoder;

    impl AbiEncoder for EmptyEncoder {
        fn encode_function_call(&self, _: &FunctionSpec, _: &[AbiValue]) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    struct WrongSelectorEncoder;

    impl AbiEncoder for WrongSelectorEncoder {
        fn encode_function_call(&self, _: &FunctionSpec, _: &[AbiValue]) -> Result<Vec<u8>> {
            Ok(vec![0xde, 0xad, 0xbe, 0xef])
        }
    }

    fn encoder() -> ActionEncoder {
        ActionEncoder::new(Arc::new(StandardAbiEncoder))
    }

    const WALLET: Address = Address::repeat_byte(0xaa);

    #[test]
    fn test_ether_transfer() {
        let intent = encoder()
            .encode(
                WALLET,
                &Action::TransferEther {
                    to: Address::repeat_byte(0xbb),
                    amount: U256::from(1_000_000_000_000_000_000u128),
                },
                Reward::none(),
            )
            .unwrap();

        assert_eq!(intent.to, Address::repeat_byte(0xbb));
        assert_eq!(intent.value, U256::from(1_000_000_000_000_000_000u128));
        assert_eq!(intent.data, NO_DATA.to_vec());
        assert_eq!(intent.reward_type, REWARD_TYPE_ETHER);
        assert_eq!(intent.reward_amount, U256::ZERO);
    }

    #[test]
    fn test_token_transfer_targets_token_contract() {
        let token = Address::repeat_byte(0xcc);
        let intent = encoder()
            .encode(
                WALLET,
                &Action::TransferTokens {
                    token,
                    to: Address::repeat_byte(0xbb),
                    amount: U256::from(250u64),
                },
                Reward::token(token, U256::from(3u64)),
            )
            .unwrap();

        assert_eq!(intent.to, token);
        assert_eq!(intent.value, U256::ZERO);
        assert_eq!(
            hex::encode(&intent.data),
            concat!(
                "a9059cbb",
                "000000000000000000000000bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
                "00000000000000000000000000000000000000000000000000000000000000fa",
            )
        );
        assert_eq!(intent.reward_type, token);
        assert_eq!(intent.reward_amount, U256::from(3u64));
    }

    #[test]
    fn test_role_grants_target_wallet() {
        let enc = encoder();
        let account = Address::repeat_byte(0xdd);

        let master = enc
            .encode(WALLET, &Action::AddMasterAccount { account }, Reward::none())
            .unwrap();
        assert_eq!(master.to, WALLET);
        assert_eq!(
            hex::encode(&master.data),
            "947aca55000000000000000000000000dddddddddddddddddddddddddddddddddddddddd"
        );

        let action = enc
            .encode(WALLET, &Action::AddActionAccount { account }, Reward::none())
            .unwrap();
        assert_eq!(action.to, WALLET);
        assert_eq!(hex::encode(&action.data[..4]), "d7ba42fc");
    }

    #[test]
    fn test_empty_encoder_output_is_rejected() {
        let enc = ActionEncoder::new(Arc::new(EmptyEncoder));
        let err = enc.add_master_data(Address::repeat_byte(0xdd)).unwrap_err();
        assert!(matches!(err, TsnnError::EncodingFailure(_)));
    }

    #[test]
    fn test_wrong_selector_is_rejected() {
        let enc = ActionEncoder::new(Arc::new(WrongSelectorEncoder));
        let err = enc
            .token_transfer_data(Address::repeat_byte(0xbb), U256::from(1u64))
            .unwrap_err();
        assert!(matches!(err, TsnnError::EncodingFailure(_)));
    }

    #[test]
    fn test_ether_transfer_never_calls_encoder() {
        let enc = ActionEncoder::new(Arc::new(EmptyEncoder));
        assert!(enc
            .encode(
                WALLET,
                &Action::TransferEther { to: Address::repeat_byte(0xbb), amount: U256::from(1u64) },
                Reward::ether(U256::from(2u64)),
            )
            .is_ok());
    }
}
