//! Reporting of deployed contract sizes against the EIP-170 limit

use std::cmp::Reverse;

use itertools::Itertools;
use tracing::{info, warn};

use crate::{
    artifacts::ContractArtifact,
    config::ContractSizerConfig,
    constants::{BYTES_PER_KIB, MAX_CONTRACT_SIZE},
    errors::ScriptError,
};

/// The deployed size of a single contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractSize {
    /// The name of the contract
    pub name: String,
    /// The size of the runtime bytecode, in bytes
    pub size: usize,
}

impl ContractSize {
    /// The size in KiB
    pub fn kib(&self) -> f64 {
        self.size as f64 / BYTES_PER_KIB
    }

    /// Whether the contract is too large to deploy to a mainnet
    pub fn exceeds_limit(&self) -> bool {
        self.size > MAX_CONTRACT_SIZE
    }
}

/// Collect the sizes of all deployable contracts, sorted by name or by descending size
pub fn contract_sizes(
    artifacts: &[ContractArtifact],
    settings: &ContractSizerConfig,
) -> Vec<ContractSize> {
    let sizes = artifacts
        .iter()
        .filter(|a| !a.deployed_bytecode.is_empty())
        .map(|a| ContractSize {
            name: a.contract_name.clone(),
            size: a.deployed_size(),
        });

    if settings.alpha_sort {
        sizes.sorted_by(|a, b| a.name.cmp(&b.name)).collect()
    } else {
        sizes.sorted_by_key(|s| Reverse(s.size)).collect()
    }
}

/// Log the size report, failing in strict mode if any contract exceeds the limit
pub fn report_sizes(sizes: &[ContractSize], strict: bool) -> Result<(), ScriptError> {
    for size in sizes {
        if size.exceeds_limit() {
            warn!("{:<40} {:>8.3} KiB (over limit)", size.name, size.kib());
        } else {
            info!("{:<40} {:>8.3} KiB", size.name, size.kib());
        }
    }

    let oversized: Vec<&str> = sizes
        .iter()
        .filter(|s| s.exceeds_limit())
        .map(|s| s.name.as_str())
        .collect();
    if strict && !oversized.is_empty() {
        return Err(ScriptError::ContractSize(format!(
            "{} exceed {} bytes",
            oversized.join(", "),
            MAX_CONTRACT_SIZE
        )));
    }

    Ok(())
}
