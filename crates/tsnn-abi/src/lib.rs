//! Contract call data encoding.
//!
//! - `AbiEncoder`: injectable capability, function description + arguments → call data
//! - `StandardAbiEncoder`: typed `sol!` calls for the wallet functions, word-by-word
//!   `SolValue` encoding for any other all-static function
//! - `functions`: the function descriptions the wallet flows use

use alloy_primitives::B256;
use alloy_sol_types::{SolCall, SolValue};
use serde::{Deserialize, Serialize};
use tsnn_crypto::keccak256;
use tsnn_types::{Address, Result, TsnnError, U256};

use functions::{addActionAccountCall, addMasterAccountCall, noncesCall, transferCall};

pub mod functions;

/// Supported (static) Solidity parameter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Address,
    Uint256,
    Bool,
    Bytes32,
}

impl ParamType {
    /// Canonical type name as it appears in a function signature.
    pub fn canonical(&self) -> &'static str {
        match self {
            ParamType::Address => "address",
            ParamType::Uint256 => "uint256",
            ParamType::Bool => "bool",
            ParamType::Bytes32 => "bytes32",
        }
    }
}

/// A named, typed function input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParamType,
}

impl Param {
    pub fn new(name: &str, kind: ParamType) -> Self {
        Self { name: name.to_string(), kind }
    }
}

/// Function description: name plus ordered inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    pub inputs: Vec<Param>,
}

impl FunctionSpec {
    pub fn new(name: &str, inputs: Vec<Param>) -> Self {
        Self { name: name.to_string(), inputs }
    }

    /// e.g. `transfer(address,uint256)`
    pub fn signature(&self) -> String {
        let types: Vec<&str> = self.inputs.iter().map(|p| p.kind.canonical()).collect();
        format!("{}({})", self.name, types.join(","))
    }

    pub fn selector(&self) -> [u8; 4] {
        function_selector(&self.signature())
    }
}

/// Argument value for a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Address(Address),
    Uint(U256),
    Bool(bool),
    Bytes32([u8; 32]),
}

impl AbiValue {
    fn kind(&self) -> ParamType {
        match self {
            AbiValue::Address(_) => ParamType::Address,
            AbiValue::Uint(_) => ParamType::Uint256,
            AbiValue::Bool(_) => ParamType::Bool,
            AbiValue::Bytes32(_) => ParamType::Bytes32,
        }
    }

    /// One head word in standard ABI encoding.
    fn encode_word(&self) -> Vec<u8> {
        match self {
            AbiValue::Address(a) => a.abi_encode(),
            AbiValue::Uint(v) => v.abi_encode(),
            AbiValue::Bool(b) => b.abi_encode(),
            AbiValue::Bytes32(b) => B256::from(*b).abi_encode(),
        }
    }
}

/// First four bytes of keccak256 over the canonical signature.
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Encodes a function call into contract call data.
pub trait AbiEncoder: Send + Sync {
    fn encode_function_call(&self, function: &FunctionSpec, args: &[AbiValue]) -> Result<Vec<u8>>;
}

/// Encoder for functions whose inputs are all static types.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAbiEncoder;

impl StandardAbiEncoder {
    /// Typed encoding for the functions declared in `functions`.
    fn encode_declared(signature: &str, args: &[AbiValue]) -> Option<Vec<u8>> {
        let data = match args {
            [AbiValue::Address(to), AbiValue::Uint(amount)] if signature == transferCall::SIGNATURE => {
                transferCall { to: *to, amount: *amount }.abi_encode()
            }
            [AbiValue::Address(account)] if signature == addMasterAccountCall::SIGNATURE => {
                addMasterAccountCall { account: *account }.abi_encode()
            }
            [AbiValue::Address(account)] if signature == addActionAccountCall::SIGNATURE => {
                addActionAccountCall { account: *account }.abi_encode()
            }
            [AbiValue::Address(owner)] if signature == noncesCall::SIGNATURE => {
                noncesCall { owner: *owner }.abi_encode()
            }
            _ => return None,
        };
        Some(data)
    }
}

impl AbiEncoder for StandardAbiEncoder {
    fn encode_function_call(&self, function: &FunctionSpec, args: &[AbiValue]) -> Result<Vec<u8>> {
        if function.name.is_empty() {
            return Err(TsnnError::EncodingFailure("function name is empty".into()));
        }
        let signature = function.signature();
        if function.inputs.len() != args.len() {
            return Err(TsnnError::EncodingFailure(format!(
                "{} expects {} arguments, got {}",
                signature,
                function.inputs.len(),
                args.len()
            )));
        }
        for (param, arg) in function.inputs.iter().zip(args) {
            if param.kind != arg.kind() {
                return Err(TsnnError::EncodingFailure(format!(
                    "argument '{}' of {} must be {}, got {}",
                    param.name,
                    signature,
                    param.kind.canonical(),
                    arg.kind().canonical()
                )));
            }
        }

        if let Some(data) = Self::encode_declared(&signature, args) {
            return Ok(data);
        }

        // All inputs are static, so the encoding is the selector followed by the heads.
        let mut data = Vec::with_capacity(4 + 32 * args.len());
        data.extend_from_slice(&function.selector());
        for arg in args {
            data.extend_from_slice(&arg.encode_word());
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_vectors_from_json() {
        let data = include_str!("../../../tests/vectors/abi.json");
        let vectors: Vec<serde_json::Value> = serde_json::from_str(data).unwrap();

        for v in &vectors {
            let signature = v["signature"].as_str().unwrap();
            let expected = v["expected_selector"].as_str().unwrap();
            let got = format!("0x{}", hex::encode(function_selector(signature)));
            assert_eq!(
                got, expected,
                "selector mismatch for '{}': got {} expected {}",
                v["name"].as_str().unwrap(), got, expected
            );
        }
    }

    #[test]
    fn test_encode_transfer() {
        let spec = functions::erc20_transfer();
        let data = StandardAbiEncoder
            .encode_function_call(
                &spec,
                &[
                    AbiValue::Address(Address::repeat_byte(0xbb)),
                    AbiValue::Uint(U256::from(250u64)),
                ],
            )
            .unwrap();

        assert_eq!(
            hex::encode(&data),
            concat!(
                "a9059cbb",
                "000000000000000000000000bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
                "00000000000000000000000000000000000000000000000000000000000000fa",
            )
        );
    }

    #[test]
    fn test_bool_and_bytes32_words() {
        let spec = FunctionSpec::new(
            "set",
            vec![Param::new("flag", ParamType::Bool), Param::new("key", ParamType::Bytes32)],
        );
        assert_eq!(spec.signature(), "set(bool,bytes32)");

        let data = StandardAbiEncoder
            .encode_function_call(&spec, &[AbiValue::Bool(true), AbiValue::Bytes32([0x42; 32])])
            .unwrap();
        assert_eq!(data.len(), 4 + 64);
        assert_eq!(data[4 + 31], 1);
        assert_eq!(&data[36..], &[0x42; 32]);
    }

    #[test]
    fn test_undeclared_function_uses_head_words() {
        let spec = FunctionSpec::new(
            "approve",
            vec![Param::new("spender", ParamType::Address), Param::new("value", ParamType::Uint256)],
        );
        let data = StandardAbiEncoder
            .encode_function_call(
                &spec,
                &[
                    AbiValue::Address(Address::repeat_byte(0xbb)),
                    AbiValue::Uint(U256::from(250u64)),
                ],
            )
            .unwrap();

        assert_eq!(
            hex::encode(&data),
            concat!(
                "095ea7b3",
                "000000000000000000000000bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
                "00000000000000000000000000000000000000000000000000000000000000fa",
            )
        );
    }

    #[test]
    fn test_declared_call_matches_sol_encoding() {
        let owner = Address::repeat_byte(0x11);
        let data = StandardAbiEncoder
            .encode_function_call(&functions::nonces(), &[AbiValue::Address(owner)])
            .unwrap();
        assert_eq!(data, noncesCall { owner }.abi_encode());
        assert_eq!(data.len(), 36);
    }

    #[test]
    fn test_argument_count_mismatch() {
        let err = StandardAbiEncoder
            .encode_function_call(&functions::add_master_account(), &[])
            .unwrap_err();
        assert!(matches!(err, TsnnError::EncodingFailure(_)));
    }

    #[test]
    fn test_argument_type_mismatch() {
        let err = StandardAbiEncoder
            .encode_function_call(
                &functions::erc20_transfer(),
                &[AbiValue::Uint(U256::from(1u64)), AbiValue::Uint(U256::from(1u64))],
            )
            .unwrap_err();
        assert!(err.to_string().contains("argument 'to'"));
    }

    #[test]
    fn test_function_spec_json_shape() {
        let json = serde_json::to_value(functions::erc20_transfer()).unwrap();
        assert_eq!(json["inputs"][0]["type"], "address");
        assert_eq!(json["inputs"][1]["name"], "amount");
    }
}
