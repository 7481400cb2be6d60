//! Loading of Hardhat compilation artifacts
//!
//! Compilation happens outside of these scripts; they only read the JSON artifacts the
//! compiler leaves behind, one `<ContractName>.json` per contract.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt},
    json_abi::JsonAbi,
    primitives::Bytes,
};
use itertools::Itertools;
use serde::Deserialize;

use crate::{
    constants::{DEBUG_ARTIFACT_SUFFIX, JSON_EXTENSION},
    errors::ScriptError,
};

/// The directory Hardhat stores compiler inputs & outputs in, which holds no artifacts
const BUILD_INFO_DIR: &str = "build-info";

/// A single contract's compilation artifact
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    /// The name of the contract
    pub contract_name: String,
    /// The source file the contract is defined in
    pub source_name: String,
    /// The contract's ABI
    pub abi: JsonAbi,
    /// The creation bytecode
    pub bytecode: Bytes,
    /// The runtime bytecode
    pub deployed_bytecode: Bytes,
}

impl ContractArtifact {
    /// Parse an artifact from a file
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ScriptError::ReadFile(format!("{}: {}", path.display(), e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))
    }

    /// Build the deployment payload: the creation bytecode followed by the
    /// ABI-encoded constructor arguments
    pub fn deploy_code(&self, args: &[DynSolValue]) -> Result<Bytes, ScriptError> {
        if self.bytecode.is_empty() {
            return Err(ScriptError::ContractDeployment(format!(
                "{} has no bytecode, is it abstract or an interface?",
                self.contract_name
            )));
        }

        let encoded_args = match &self.abi.constructor {
            Some(constructor) => constructor
                .abi_encode_input(args)
                .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?,
            None if args.is_empty() => Vec::new(),
            None => {
                return Err(ScriptError::CalldataConstruction(format!(
                    "{} takes no constructor arguments, got {}",
                    self.contract_name,
                    args.len()
                )))
            }
        };

        let mut code = self.bytecode.to_vec();
        code.extend_from_slice(&encoded_args);
        Ok(code.into())
    }

    /// The size of the runtime bytecode, in bytes
    pub fn deployed_size(&self) -> usize {
        self.deployed_bytecode.len()
    }
}

/// A directory of compilation artifacts
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    /// The root of the artifacts directory
    root: PathBuf,
}

impl ArtifactStore {
    /// Create a store reading from the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load the artifact of the named contract
    pub fn load(&self, contract_name: &str) -> Result<ContractArtifact, ScriptError> {
        let file_name = format!("{contract_name}.{JSON_EXTENSION}");
        let mut matches: Vec<PathBuf> = self
            .artifact_files()?
            .into_iter()
            .filter(|path| path.file_name().is_some_and(|name| name == file_name.as_str()))
            .collect();

        match matches.len() {
            0 => Err(ScriptError::ArtifactNotFound(format!(
                "no artifact for {} under {}",
                contract_name,
                self.root.display()
            ))),
            1 => ContractArtifact::from_file(&matches.remove(0)),
            _ => Err(ScriptError::ArtifactParsing(format!(
                "multiple artifacts named {}: {}",
                contract_name,
                matches.iter().map(|p| p.display()).join(", ")
            ))),
        }
    }

    /// Load every artifact in the store, ordered by path
    pub fn load_all(&self) -> Result<Vec<ContractArtifact>, ScriptError> {
        self.artifact_files()?
            .iter()
            .map(|path| ContractArtifact::from_file(path))
            .collect()
    }

    /// List the artifact files in the store, skipping debug files and build info
    fn artifact_files(&self) -> Result<Vec<PathBuf>, ScriptError> {
        if !self.root.is_dir() {
            return Err(ScriptError::ArtifactNotFound(format!(
                "artifacts directory {} does not exist, compile the contracts first",
                self.root.display()
            )));
        }

        let mut files = Vec::new();
        collect_artifact_files(&self.root, &mut files)?;
        files.sort();
        Ok(files)
    }
}

/// Recursively collect artifact files under `dir`
fn collect_artifact_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), ScriptError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ScriptError::ReadFile(format!("{}: {}", dir.display(), e)))?;

    for entry in entries {
        let path = entry
            .map_err(|e| ScriptError::ReadFile(format!("{}: {}", dir.display(), e)))?
            .path();

        if path.is_dir() {
            if path.file_name().is_some_and(|name| name == BUILD_INFO_DIR) {
                continue;
            }
            collect_artifact_files(&path, files)?;
            continue;
        }

        let is_json = path.extension().is_some_and(|ext| ext == JSON_EXTENSION);
        let is_debug = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(DEBUG_ARTIFACT_SUFFIX));
        if is_json && !is_debug {
            files.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{fs, path::Path};

    use alloy::{dyn_abi::DynSolValue, primitives::Address};
    use serde_json::json;

    use super::ArtifactStore;
    use crate::errors::ScriptError;

    /// Write a minimal artifact for `name` under `<root>/contracts/<name>.sol/`
    pub(crate) fn write_artifact(
        root: &Path,
        name: &str,
        with_forwarder: bool,
        deployed_bytecode: &str,
    ) {
        let constructor = if with_forwarder {
            json!({
                "type": "constructor",
                "stateMutability": "nonpayable",
                "inputs": [{ "name": "trustedForwarder", "type": "address", "internalType": "address" }]
            })
        } else {
            json!({ "type": "constructor", "stateMutability": "nonpayable", "inputs": [] })
        };

        let artifact = json!({
            "_format": "hh-sol-artifact-1",
            "contractName": name,
            "sourceName": format!("contracts/{name}.sol"),
            "abi": [
                constructor,
                {
                    "type": "function",
                    "name": "transferOwnership",
                    "stateMutability": "nonpayable",
                    "inputs": [{ "name": "newOwner", "type": "address", "internalType": "address" }],
                    "outputs": []
                }
            ],
            "bytecode": "0x6080604052",
            "deployedBytecode": deployed_bytecode,
            "linkReferences": {},
            "deployedLinkReferences": {}
        });

        let dir = root.join("contracts").join(format!("{name}.sol"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{name}.json")), artifact.to_string()).unwrap();
        fs::write(dir.join(format!("{name}.dbg.json")), "{\"buildInfo\": \"x\"}").unwrap();
    }

    #[test]
    fn test_load_nested_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "TradeManager", false, "0x6080");
        fs::create_dir_all(dir.path().join("build-info")).unwrap();
        fs::write(dir.path().join("build-info").join("abc.json"), "{}").unwrap();

        let store = ArtifactStore::new(dir.path());
        let artifact = store.load("TradeManager").unwrap();
        assert_eq!(artifact.contract_name, "TradeManager");
        assert_eq!(artifact.source_name, "contracts/TradeManager.sol");
        assert_eq!(artifact.deployed_size(), 2);

        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "TradeManager", false, "0x6080");

        let store = ArtifactStore::new(dir.path());
        let res = store.load("TransactionManager");
        assert!(matches!(res, Err(ScriptError::ArtifactNotFound(_))));

        let store = ArtifactStore::new(dir.path().join("missing"));
        assert!(matches!(store.load("TradeManager"), Err(ScriptError::ArtifactNotFound(_))));
    }

    #[test]
    fn test_constructor_encoding() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "DexpoolsToken", true, "0x6080");
        let artifact = ArtifactStore::new(dir.path()).load("DexpoolsToken").unwrap();

        let forwarder = Address::repeat_byte(0xaa);
        let code = artifact
            .deploy_code(&[DynSolValue::Address(forwarder)])
            .unwrap();

        // Creation code followed by a single left-padded address word
        assert_eq!(code.len(), 5 + 32);
        assert_eq!(&code[..5], &[0x60, 0x80, 0x60, 0x40, 0x52]);
        assert_eq!(&code[5 + 12..], forwarder.as_slice());
    }

    #[test]
    fn test_constructor_arity_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "DexpoolsToken", true, "0x6080");
        let artifact = ArtifactStore::new(dir.path()).load("DexpoolsToken").unwrap();

        let res = artifact.deploy_code(&[]);
        assert!(matches!(res, Err(ScriptError::CalldataConstruction(_))));

        let res = artifact.deploy_code(&[DynSolValue::Bool(true)]);
        assert!(matches!(res, Err(ScriptError::CalldataConstruction(_))));
    }
}
