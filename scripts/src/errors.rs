//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use tracing::error;

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug)]
pub enum ScriptError {
    /// No signer key is configured for the target network
    MissingCredential(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// The connected node reports a different chain than the network profile
    ChainIdMismatch {
        /// The chain ID of the network profile
        expected: u64,
        /// The chain ID reported by the node
        actual: u64,
    },
    /// No compilation artifact exists for the requested contract
    ArtifactNotFound(String),
    /// Error parsing a compilation artifact
    ArtifactParsing(String),
    /// Error constructing calldata for a constructor or contract method
    CalldataConstruction(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// Error reading a file
    ReadFile(String),
    /// Error writing a file
    WriteFile(String),
    /// Error de/serializing JSON output
    Serde(String),
    /// A contract exceeds the deployable bytecode size
    ContractSize(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::MissingCredential(s) => write!(f, "missing signer credential: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::ChainIdMismatch { expected, actual } => write!(
                f,
                "chain ID mismatch: expected {}, node reports {}",
                expected, actual
            ),
            ScriptError::ArtifactNotFound(s) => write!(f, "artifact not found: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::ReadFile(s) => write!(f, "error reading file: {}", s),
            ScriptError::WriteFile(s) => write!(f, "error writing file: {}", s),
            ScriptError::Serde(s) => write!(f, "error serializing JSON: {}", s),
            ScriptError::ContractSize(s) => write!(f, "contract size limit exceeded: {}", s),
        }
    }
}

impl Error for ScriptError {}

/// The process exit code reported when a script fails
pub const FAILURE_EXIT_CODE: u8 = 1;

/// Map the result of a command to a process exit code, logging any error
pub fn exit_code(res: &Result<(), ScriptError>) -> u8 {
    match res {
        Ok(()) => 0,
        Err(e) => {
            error!("{}", e);
            FAILURE_EXIT_CODE
        }
    }
}
