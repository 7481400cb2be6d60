//! Helpers for deploying contracts and sending transactions to them

use alloy::{
    contract::{CallBuilder, CallDecoder},
    dyn_abi::DynSolValue,
    network::{Ethereum, TransactionBuilder},
    primitives::B256,
    providers::{DynProvider, Provider},
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use async_trait::async_trait;
use itertools::Itertools;
use tracing::{info, warn};

use crate::{
    artifacts::ArtifactStore,
    constants::{MAX_CONTRACT_SIZE, NUM_CONFIRMATIONS},
    errors::ScriptError,
    solidity::IOtcManager,
    types::{AdminAction, DeployedContract},
};

/// The call builder type used for administrative transactions
pub type ScriptCallBuilder<'a, C> = CallBuilder<&'a DynProvider, C, Ethereum>;

/// The operations a deploy script needs from the chain
#[async_trait]
pub trait ContractDeployer {
    /// Deploy the named contract with the given constructor arguments,
    /// waiting for the deployment to be mined
    async fn deploy_contract(
        &self,
        name: &str,
        args: &[DynSolValue],
    ) -> Result<DeployedContract, ScriptError>;

    /// Issue an administrative transaction against a deployed contract,
    /// returning the hash of the mined transaction
    async fn send_admin_txn(
        &self,
        contract: &DeployedContract,
        action: &AdminAction,
    ) -> Result<B256, ScriptError>;
}

/// Deploys contracts from compilation artifacts through an RPC provider
pub struct RpcDeployer {
    /// The signing provider
    provider: DynProvider,
    /// The artifacts to deploy from
    artifacts: ArtifactStore,
    /// Whether to skip the EIP-170 size check
    allow_unlimited_contract_size: bool,
}

impl RpcDeployer {
    /// Constructor
    pub fn new(
        provider: DynProvider,
        artifacts: ArtifactStore,
        allow_unlimited_contract_size: bool,
    ) -> Self {
        Self {
            provider,
            artifacts,
            allow_unlimited_contract_size,
        }
    }
}

#[async_trait]
impl ContractDeployer for RpcDeployer {
    async fn deploy_contract(
        &self,
        name: &str,
        args: &[DynSolValue],
    ) -> Result<DeployedContract, ScriptError> {
        let artifact = self.artifacts.load(name)?;
        if !self.allow_unlimited_contract_size && artifact.deployed_size() > MAX_CONTRACT_SIZE {
            return Err(ScriptError::ContractSize(format!(
                "{} is {} bytes, the limit is {}",
                name,
                artifact.deployed_size(),
                MAX_CONTRACT_SIZE
            )));
        }

        info!("Deploying {} {}", name, args.iter().map(fmt_arg).join(","));
        let tx = TransactionRequest::default().with_deploy_code(artifact.deploy_code(args)?);

        let pending_tx = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
        info!("Deployment transaction sent: {:#x}", pending_tx.tx_hash());

        let receipt = pending_tx
            .with_required_confirmations(NUM_CONFIRMATIONS)
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        if !receipt.status() {
            return Err(ScriptError::ContractDeployment(format!(
                "deployment of {} reverted in {:#x}",
                name, receipt.transaction_hash
            )));
        }

        let address = receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!("no contract address in receipt for {name}"))
        })?;
        info!("Completed {} deployment at {:#x}", name, address);

        Ok(DeployedContract {
            name: name.to_string(),
            address,
            tx_hash: receipt.transaction_hash,
        })
    }

    async fn send_admin_txn(
        &self,
        contract: &DeployedContract,
        action: &AdminAction,
    ) -> Result<B256, ScriptError> {
        let instance = IOtcManager::new(contract.address, self.provider.clone());
        let label = admin_label(contract, action);

        let receipt = match action {
            AdminAction::SetCommissionAddress(commission) => {
                send_txn(instance.setCommissionAddress(*commission), &label).await?
            }
            AdminAction::TransferOwnership { new_owner, .. } => {
                send_txn(instance.transferOwnership(*new_owner), &label).await?
            }
        };

        Ok(receipt.transaction_hash)
    }
}

/// Send a transaction and wait for it to be mined, failing if it reverts
pub async fn send_txn<C: CallDecoder>(
    tx: ScriptCallBuilder<'_, C>,
    label: &str,
) -> Result<TransactionReceipt, ScriptError> {
    info!("Sending {}...", label);
    let pending_tx = tx
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(format!("{label}: {e}")))?;

    let receipt = pending_tx
        .with_required_confirmations(NUM_CONFIRMATIONS)
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractInteraction(format!("{label}: {e}")))?;

    if !receipt.status() {
        warn!("{} reverted", label);
        return Err(ScriptError::ContractInteraction(format!(
            "{} reverted in {:#x}",
            label, receipt.transaction_hash
        )));
    }

    info!("Sent! {} {:#x}", label, receipt.transaction_hash);
    Ok(receipt)
}

/// The label an administrative transaction is logged under, falling back to
/// `<contract>.<call>` when the action carries none
fn admin_label(contract: &DeployedContract, action: &AdminAction) -> String {
    action
        .label()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}.{}", contract.name, action))
}

/// Render a constructor argument for logging
fn fmt_arg(arg: &DynSolValue) -> String {
    match arg {
        DynSolValue::Address(addr) => format!("{addr:#x}"),
        other => format!("{other:?}"),
    }
}
