//! Constants used in the deploy scripts

use alloy_primitives::{address, b256, Address, B256};

// ---------
// | Salts |
// ---------

/// The create2 salt used for the Permit2 deployment
pub const PERMIT2_SALT: B256 =
    b256!("0000000000000000000000000000000000000000000000000000000000000001");

/// The create2 salt used for the relay contracts deployment
pub const RELAY_CONTRACTS_SALT: B256 = B256::ZERO;

/// The create2 salt used for the swap router deployment
pub const SWAP_ROUTER_SALT: B256 = B256::ZERO;

// -------------------------
// | External Dependencies |
// -------------------------

/// The Permit2 contract the ERC20 router is wired to
pub const PERMIT2_ADDRESS: Address = address!("7d174F25ADcd4157EcB5B3448fEC909AeCB70033");

/// The solver address passed to the relay receiver
pub const SOLVER_ADDRESS: Address = address!("f70da97812CB96acDF810712Aa562db8dfA3dbEF");

/// The Uniswap V2 factory the swap router is wired to
pub const V2_FACTORY_ADDRESS: Address = address!("1B4427e212475B12e62f0f142b8AfEf3BC18B559");

/// The Uniswap V3 factory the swap router is wired to
pub const V3_FACTORY_ADDRESS: Address = address!("A1160e73B63F322ae88cC2d8E700833e71D0b2a1");

/// The nonfungible position manager the swap router is wired to
pub const POSITION_MANAGER_ADDRESS: Address =
    address!("5b15468dFD83cF9192082d4510034c9431bb05eB");

/// The WETH contract the swap router is wired to
pub const WETH_ADDRESS: Address = address!("Ac98B49576B1C892ba6BFae08fE1BB0d80Cf599c");

// ------------------
// | Contract Names |
// ------------------

/// The Permit2 contract
pub const PERMIT2_CONTRACT: &str = "Permit2";

/// The multicaller contract
pub const MULTICALLER_CONTRACT: &str = "Multicaller";

/// The ERC20 router contract
pub const ERC20_ROUTER_CONTRACT: &str = "ERC20Router";

/// The approval proxy contract
pub const APPROVAL_PROXY_CONTRACT: &str = "ApprovalProxy";

/// The relay receiver contract
pub const RELAY_RECEIVER_CONTRACT: &str = "RelayReceiver";

/// The swap router contract
pub const SWAP_ROUTER_CONTRACT: &str = "SwapRouter02";

// ------------
// | Deployer |
// ------------

/// The default name of the `forge` binary
pub const DEFAULT_FORGE_BIN: &str = "forge";

/// The `forge` subcommand used to deploy a contract
pub const FORGE_CREATE_COMMAND: &str = "create";

/// The environment variable `forge` reads the deployer's private key from
pub const PRIVATE_KEY_ENV_VAR: &str = "ETH_PRIVATE_KEY";

/// The verifier name passed to `forge` for zkSync explorers
pub const ZKSYNC_VERIFIER: &str = "zksync";

/// The default directory containing zkSync compilation artifacts, as written
/// by `forge build --zksync`
pub const DEFAULT_ARTIFACTS_DIR: &str = "zkout";

/// The extension of a compilation artifact
pub const ARTIFACT_EXTENSION: &str = "json";

/// The domain separator hashed into zkSync create2 addresses
pub const ZKSYNC_CREATE2_PREFIX: &[u8] = b"zksyncCreate2";

/// The version byte of a zkSync bytecode hash
pub const BYTECODE_HASH_VERSION: u8 = 1;

/// The number of bytes in an EraVM bytecode word
pub const BYTECODE_WORD_SIZE: usize = 32;

// ---------------
// | Deployments |
// ---------------

/// The deployments key in the `deployments.json` file
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The indentation used when writing the `deployments.json` file
pub const DEPLOYMENTS_INDENT: &[u8] = b"    ";
