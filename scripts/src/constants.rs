//! Constants used in the deploy scripts

use alloy::primitives::{address, Address};

// ------------
// | Networks |
// ------------

/// The RPC URL of the Ethereum mainnet endpoint
pub const ETHEREUM_RPC_URL: &str = "https://mainnet.infura.io/v3/149e969a221349be9b2857c1cb9090ef";

/// The chain ID of Ethereum mainnet
pub const ETHEREUM_CHAIN_ID: u64 = 1;

/// The environment variable holding the Ethereum mainnet deployer key
pub const ETHEREUM_KEY_ENV_VAR: &str = "ETHEREUM_MAINNET_KEY";

/// The RPC URL of the Metis Andromeda mainnet endpoint
pub const METIS_RPC_URL: &str = "https://andromeda.metis.io/?owner=1088";

/// The chain ID of Metis Andromeda mainnet
pub const METIS_CHAIN_ID: u64 = 1088;

/// The environment variable holding the Metis mainnet deployer key
pub const METIS_KEY_ENV_VAR: &str = "METIS_MAINNET_KEY";

/// The RPC URL of a local development node
pub const LOCAL_RPC_URL: &str = "http://127.0.0.1:8545";

/// The chain ID of a local development node
pub const LOCAL_CHAIN_ID: u64 = 31337;

/// The environment variable holding the local development deployer key
pub const LOCAL_KEY_ENV_VAR: &str = "LOCAL_KEY";

/// The first pre-funded account of a local development node
pub const DEFAULT_LOCAL_PKEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// The number of confirmations to wait for on every transaction
pub const NUM_CONFIRMATIONS: u64 = 1;

// ------------
// | Compiler |
// ------------

/// The solc version the contracts are compiled with
pub const SOLC_VERSION: &str = "0.8.9";

/// The number of optimizer runs the contracts are compiled with
pub const OPTIMIZER_RUNS: u32 = 200;

/// The default directory holding compilation artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The suffix of artifact debug files, which carry no ABI
pub const DEBUG_ARTIFACT_SUFFIX: &str = ".dbg.json";

/// The extension of artifact files
pub const JSON_EXTENSION: &str = "json";

/// The default directory ABIs are exported to
pub const DEFAULT_ABI_EXPORT_DIR: &str = "abis";

/// The maximum size of deployed bytecode, in bytes
///
/// Specified in EIP-170: https://eips.ethereum.org/EIPS/eip-170
pub const MAX_CONTRACT_SIZE: usize = 24_576;

/// The number of bytes in a kibibyte, used when reporting contract sizes
pub const BYTES_PER_KIB: f64 = 1024.;

// ---------------
// | Deployments |
// ---------------

/// The deployments key in the deployments file
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The address receiving commissions on the OTC contracts
pub const COMMISSION_ADDRESS: Address = address!("e34668Be1A8D6Db6143C0DcCC564558bC84DF3e3");

/// The address taking ownership of the OTC contracts
pub const DXP_OWNER_ADDRESS: Address = address!("Ed8c1D2f12751dB7Ee414DA7f046DFee7A3F2C65");

/// The trusted meta-transaction forwarder on Metis
pub const METIS_TRUSTED_FORWARDER: Address = address!("aD1628acd4a895efb1Ad94CC4471B3917CF90D91");

/// The token contract deployed on Ethereum
pub const ETHEREUM_TOKEN_CONTRACT: &str = "DexPoolsToken";

/// The token contract deployed on Metis
pub const METIS_TOKEN_CONTRACT: &str = "DexpoolsToken";

/// The OTC trade manager contract deployed on Ethereum
pub const TRADE_MANAGER_CONTRACT: &str = "TradeManager";

/// The OTC transaction manager contract deployed on Metis
pub const TRANSACTION_MANAGER_CONTRACT: &str = "TransactionManager";

/// The label attached to ownership transfers on Metis
pub const TRANSFER_OWNERSHIP_LABEL: &str = "transferOwnership";
