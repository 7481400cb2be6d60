//! Utilities for the deploy scripts.

use std::{fs, path::PathBuf, str::FromStr};

use alloy::{
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use serde_json::{Map, Value};
use tracing::info;

use crate::{
    config::{Network, NetworkProfile},
    constants::DEPLOYMENTS_KEY,
    errors::ScriptError,
};

/// Sets up a signing client for the given network, checking that the node
/// serves the chain the profile expects
pub async fn setup_client(
    profile: &NetworkProfile,
    priv_key: &str,
) -> Result<DynProvider, ScriptError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let url = Url::parse(&profile.rpc_url)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    info!("Deployer: {:#x}", signer.address());
    let provider = ProviderBuilder::new().wallet(signer).connect_http(url);

    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    if chain_id != profile.chain_id {
        return Err(ScriptError::ChainIdMismatch {
            expected: profile.chain_id,
            actual: chain_id,
        });
    }

    Ok(DynProvider::new(provider))
}

/// A JSON file recording the addresses of deployed contracts, keyed by network
#[derive(Clone, Debug)]
pub struct DeploymentsFile {
    /// The path of the file
    path: PathBuf,
    /// The network deployments are recorded under
    network: Network,
}

impl DeploymentsFile {
    /// Constructor
    pub fn new(path: impl Into<PathBuf>, network: Network) -> Self {
        Self {
            path: path.into(),
            network,
        }
    }

    /// Record the address of a deployed contract, creating the file if it doesn't exist
    pub fn write_deployed_address(
        &self,
        contract_name: &str,
        address: Address,
    ) -> Result<(), ScriptError> {
        let mut parsed_json = if self.path.exists() {
            self.read()?
        } else {
            Value::Object(Map::new())
        };

        let root = parsed_json.as_object_mut().ok_or_else(|| {
            ScriptError::WriteFile(format!("{} is not a JSON object", self.path.display()))
        })?;
        let deployments = entry_object(root, DEPLOYMENTS_KEY)?;
        let network_deployments = entry_object(deployments, &self.network.to_string())?;
        network_deployments.insert(
            contract_name.to_string(),
            Value::String(format!("{address:#x}")),
        );

        let contents = serde_json::to_string_pretty(&parsed_json)
            .map_err(|e| ScriptError::Serde(e.to_string()))?;
        fs::write(&self.path, contents).map_err(|e| ScriptError::WriteFile(e.to_string()))
    }

    /// Read back the address of a deployed contract
    pub fn read_deployed_address(&self, contract_name: &str) -> Result<Address, ScriptError> {
        let parsed_json = self.read()?;
        let addr_str = parsed_json[DEPLOYMENTS_KEY][self.network.to_string()][contract_name]
            .as_str()
            .ok_or_else(|| {
                ScriptError::ReadFile(format!(
                    "no {} deployment of {} in {}",
                    self.network,
                    contract_name,
                    self.path.display()
                ))
            })?;

        Address::from_str(addr_str).map_err(|e| ScriptError::ReadFile(e.to_string()))
    }

    /// Parse the file
    fn read(&self) -> Result<Value, ScriptError> {
        let contents =
            fs::read_to_string(&self.path).map_err(|e| ScriptError::ReadFile(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| ScriptError::ReadFile(e.to_string()))
    }
}

/// Get the object under `key`, inserting an empty one if absent
fn entry_object<'a>(
    obj: &'a mut Map<String, Value>,
    key: &str,
) -> Result<&'a mut Map<String, Value>, ScriptError> {
    obj.entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| ScriptError::WriteFile(format!("`{key}` is not a JSON object")))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use alloy::primitives::Address;
    use serde_json::Value;

    use super::DeploymentsFile;
    use crate::{config::Network, errors::ScriptError};

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployments.json");
        let file = DeploymentsFile::new(&path, Network::MetisMain);

        let addr = Address::repeat_byte(0x11);
        file.write_deployed_address("TransactionManager", addr).unwrap();

        assert_eq!(file.read_deployed_address("TransactionManager").unwrap(), addr);
        let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            json["deployments"]["metis_main"]["TransactionManager"],
            Value::String(format!("{addr:#x}"))
        );
    }

    #[test]
    fn test_write_preserves_other_networks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployments.json");

        let eth = DeploymentsFile::new(&path, Network::Ethereum);
        let metis = DeploymentsFile::new(&path, Network::MetisMain);
        eth.write_deployed_address("TradeManager", Address::repeat_byte(0x01)).unwrap();
        metis.write_deployed_address("DexpoolsToken", Address::repeat_byte(0x02)).unwrap();
        eth.write_deployed_address("DexPoolsToken", Address::repeat_byte(0x03)).unwrap();

        assert_eq!(
            eth.read_deployed_address("TradeManager").unwrap(),
            Address::repeat_byte(0x01)
        );
        assert_eq!(
            metis.read_deployed_address("DexpoolsToken").unwrap(),
            Address::repeat_byte(0x02)
        );
        assert!(matches!(
            metis.read_deployed_address("TradeManager"),
            Err(ScriptError::ReadFile(_))
        ));
    }
}
