//! Contract functions used by the wallet flows.
//!
//! The `sol!` declarations give typed call structs (`transferCall`, ...);
//! the `FunctionSpec` constructors describe the same functions to an
//! injected `AbiEncoder`.

use alloy_sol_types::sol;

use crate::{FunctionSpec, Param, ParamType};

sol! {
    function transfer(address to, uint256 amount) external returns (bool);

    function addMasterAccount(address account) external;

    function addActionAccount(address account) external;

    function nonces(address owner) external view returns (uint256);
}

/// `transfer(address to, uint256 amount)` on an ERC-20 token.
pub fn erc20_transfer() -> FunctionSpec {
    FunctionSpec::new(
        "transfer",
        vec![
            Param::new("to", ParamType::Address),
            Param::new("amount", ParamType::Uint256),
        ],
    )
}

/// `addMasterAccount(address account)` on the personal wallet.
pub fn add_master_account() -> FunctionSpec {
    FunctionSpec::new("addMasterAccount", vec![Param::new("account", ParamType::Address)])
}

/// `addActionAccount(address account)` on the personal wallet.
pub fn add_action_account() -> FunctionSpec {
    FunctionSpec::new("addActionAccount", vec![Param::new("account", ParamType::Address)])
}

/// `nonces(address owner)` view on the personal wallet.
pub fn nonces() -> FunctionSpec {
    FunctionSpec::new("nonces", vec![Param::new("owner", ParamType::Address)])
}
