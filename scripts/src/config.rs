//! Network profiles and project settings consumed by the deploy scripts
//!
//! Everything here is fixed at compile time except the signer keys, which are read from the
//! environment (after loading `.env`) or passed on the command line.

use std::{
    env,
    fmt::{self, Display},
    path::PathBuf,
};

use clap::ValueEnum;
use serde::Serialize;

use crate::{
    constants::{
        DEFAULT_ABI_EXPORT_DIR, DEFAULT_LOCAL_PKEY, ETHEREUM_CHAIN_ID, ETHEREUM_KEY_ENV_VAR,
        ETHEREUM_RPC_URL, LOCAL_CHAIN_ID, LOCAL_KEY_ENV_VAR, LOCAL_RPC_URL, METIS_CHAIN_ID,
        METIS_KEY_ENV_VAR, METIS_RPC_URL, OPTIMIZER_RUNS, SOLC_VERSION,
    },
    errors::ScriptError,
};

/// The networks contracts can be deployed to
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Network {
    /// Ethereum mainnet
    #[value(name = "ethereum")]
    #[serde(rename = "ethereum")]
    Ethereum,
    /// Metis Andromeda mainnet
    #[value(name = "metis_main")]
    #[serde(rename = "metis_main")]
    MetisMain,
    /// A local development node
    #[value(name = "local")]
    #[serde(rename = "local")]
    Local,
}

impl Network {
    /// All networks, in the order they are reported
    pub const ALL: [Network; 3] = [Network::Ethereum, Network::MetisMain, Network::Local];

    /// The static profile of the network
    pub fn profile(self) -> NetworkProfile {
        match self {
            Network::Ethereum => NetworkProfile {
                network: self,
                rpc_url: ETHEREUM_RPC_URL.to_string(),
                chain_id: ETHEREUM_CHAIN_ID,
                key_env_var: ETHEREUM_KEY_ENV_VAR,
                default_key: None,
                allow_unlimited_contract_size: false,
            },
            Network::MetisMain => NetworkProfile {
                network: self,
                rpc_url: METIS_RPC_URL.to_string(),
                chain_id: METIS_CHAIN_ID,
                key_env_var: METIS_KEY_ENV_VAR,
                default_key: None,
                allow_unlimited_contract_size: false,
            },
            Network::Local => NetworkProfile {
                network: self,
                rpc_url: LOCAL_RPC_URL.to_string(),
                chain_id: LOCAL_CHAIN_ID,
                key_env_var: LOCAL_KEY_ENV_VAR,
                default_key: Some(DEFAULT_LOCAL_PKEY),
                allow_unlimited_contract_size: true,
            },
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Ethereum => write!(f, "ethereum"),
            Network::MetisMain => write!(f, "metis_main"),
            Network::Local => write!(f, "local"),
        }
    }
}

/// The connection parameters of a network
#[derive(Clone, Debug, Serialize)]
pub struct NetworkProfile {
    /// The network this profile describes
    pub network: Network,
    /// The RPC endpoint of the network
    pub rpc_url: String,
    /// The chain ID the endpoint is expected to report
    pub chain_id: u64,
    /// The environment variable holding the deployer's private key
    pub key_env_var: &'static str,
    /// The key to fall back to when the environment variable is unset
    #[serde(skip)]
    pub default_key: Option<&'static str>,
    /// Whether contracts above the EIP-170 size limit may be deployed
    pub allow_unlimited_contract_size: bool,
}

impl NetworkProfile {
    /// Resolve the deployer's private key, preferring an explicit override,
    /// then the environment, then the profile's default
    pub fn signer_key(&self, key_override: Option<&str>) -> Result<String, ScriptError> {
        let from_env = env::var(self.key_env_var).ok();
        self.resolve_key(key_override, from_env)
    }

    /// Whether a signer key is available without an override
    pub fn has_key(&self) -> bool {
        self.signer_key(None).is_ok()
    }

    /// Pick a key from the given sources
    fn resolve_key(
        &self,
        key_override: Option<&str>,
        from_env: Option<String>,
    ) -> Result<String, ScriptError> {
        key_override
            .filter(|key| !key.trim().is_empty())
            .map(str::to_string)
            .or(from_env.filter(|key| !key.trim().is_empty()))
            .or_else(|| self.default_key.map(str::to_string))
            .ok_or_else(|| {
                ScriptError::MissingCredential(format!(
                    "set {} to deploy to {}",
                    self.key_env_var, self.network
                ))
            })
    }
}

/// Solidity compiler settings the artifacts are expected to be built with
#[derive(Clone, Debug, Serialize)]
pub struct CompilerSettings {
    /// The solc version
    pub version: &'static str,
    /// Whether the optimizer is enabled
    pub optimizer_enabled: bool,
    /// The number of optimizer runs
    pub optimizer_runs: u32,
}

/// Settings for exporting contract ABIs
#[derive(Clone, Debug, Serialize)]
pub struct AbiExporterConfig {
    /// The directory ABIs are written to
    pub path: PathBuf,
    /// Whether the directory is emptied before exporting
    pub clear: bool,
    /// Whether all ABIs are written to the directory root
    pub flat: bool,
}

/// Settings for reporting contract sizes
#[derive(Clone, Debug, Serialize)]
pub struct ContractSizerConfig {
    /// Whether contracts are reported in alphabetical order
    pub alpha_sort: bool,
    /// Whether an oversized contract is an error
    pub strict: bool,
}

/// The full project configuration
#[derive(Clone, Debug, Serialize)]
pub struct ProjectConfig {
    /// The profiles of all known networks
    pub networks: Vec<NetworkProfile>,
    /// The directory holding compilation artifacts
    pub artifacts_dir: PathBuf,
    /// The compiler settings
    pub compiler: CompilerSettings,
    /// The ABI exporter settings
    pub abi_exporter: AbiExporterConfig,
    /// The contract sizer settings
    pub contract_sizer: ContractSizerConfig,
}

impl ProjectConfig {
    /// Build the project configuration, reading artifacts from the given directory
    pub fn load(artifacts_dir: PathBuf) -> Self {
        Self {
            networks: Network::ALL.into_iter().map(Network::profile).collect(),
            artifacts_dir,
            compiler: CompilerSettings {
                version: SOLC_VERSION,
                optimizer_enabled: true,
                optimizer_runs: OPTIMIZER_RUNS,
            },
            abi_exporter: AbiExporterConfig {
                path: PathBuf::from(DEFAULT_ABI_EXPORT_DIR),
                clear: true,
                flat: true,
            },
            contract_sizer: ContractSizerConfig {
                alpha_sort: true,
                strict: true,
            },
        }
    }

    /// Get the profile of a network, replacing its RPC URL if an override is given
    pub fn network_profile(&self, network: Network, rpc_override: Option<&str>) -> NetworkProfile {
        let mut profile = self
            .networks
            .iter()
            .find(|p| p.network == network)
            .cloned()
            .unwrap_or_else(|| network.profile());

        if let Some(url) = rpc_override {
            profile.rpc_url = url.to_string();
        }

        profile
    }
}
