//! Deploys against a local Anvil node
//!
//! Each test returns early when no `anvil` binary is on the `PATH`.

use std::path::Path;

use alloy::{
    node_bindings::{Anvil, AnvilInstance},
    primitives::hex,
    providers::Provider,
};
use dexpools_scripts::{
    artifacts::ArtifactStore,
    config::{Network, ProjectConfig},
    constants::{COMMISSION_ADDRESS, DEFAULT_LOCAL_PKEY},
    deployer::{ContractDeployer, RpcDeployer},
    errors::ScriptError,
    run_plan,
    types::{AdminAction, DeployScript},
    utils::{setup_client, DeploymentsFile},
};
use serde_json::json;

/// Creation code returning [`RUNTIME_CODE`]
const INIT_CODE: &str = "6015600c60003960156000f3";

/// Runtime code that reverts on `transferOwnership(address)` and accepts any other call
const RUNTIME_CODE: &str = "60003560e01c63f2fde38b14601057005b600080fd";

/// Spawn an Anvil node, or `None` if Anvil is unavailable
fn spawn_anvil() -> Option<AnvilInstance> {
    match Anvil::new().try_spawn() {
        Ok(anvil) => Some(anvil),
        Err(e) => {
            eprintln!("skipping, could not spawn anvil: {e}");
            None
        }
    }
}

/// Write an artifact for `name` backed by the stub contract
fn write_stub_artifact(root: &Path, name: &str) {
    let artifact = json!({
        "_format": "hh-sol-artifact-1",
        "contractName": name,
        "sourceName": format!("contracts/{name}.sol"),
        "abi": [],
        "bytecode": format!("0x{INIT_CODE}{RUNTIME_CODE}"),
        "deployedBytecode": format!("0x{RUNTIME_CODE}"),
        "linkReferences": {},
        "deployedLinkReferences": {}
    });

    let dir = root.join("contracts").join(format!("{name}.sol"));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("{name}.json")), artifact.to_string()).unwrap();
}

#[tokio::test]
async fn test_deploy_and_admin_txns() {
    let Some(anvil) = spawn_anvil() else { return };
    let artifacts_dir = tempfile::tempdir().unwrap();
    write_stub_artifact(artifacts_dir.path(), "TradeManager");

    let config = ProjectConfig::load(artifacts_dir.path().to_path_buf());
    let profile = config.network_profile(Network::Local, Some(&anvil.endpoint()));
    let provider = setup_client(&profile, DEFAULT_LOCAL_PKEY).await.unwrap();
    let deployer = RpcDeployer::new(
        provider.clone(),
        ArtifactStore::new(artifacts_dir.path()),
        profile.allow_unlimited_contract_size,
    );

    let contract = deployer.deploy_contract("TradeManager", &[]).await.unwrap();
    let code = provider.get_code_at(contract.address).await.unwrap();
    assert_eq!(code.to_vec(), hex::decode(RUNTIME_CODE).unwrap());

    let action = AdminAction::SetCommissionAddress(COMMISSION_ADDRESS);
    deployer.send_admin_txn(&contract, &action).await.unwrap();

    let plan = DeployScript::OtcEthereum.plan();
    let res = deployer.send_admin_txn(&contract, &plan.admin_actions[1]).await;
    assert!(matches!(res, Err(ScriptError::ContractInteraction(_))));
}

#[tokio::test]
async fn test_reverted_transfer_keeps_recorded_deployment() {
    let Some(anvil) = spawn_anvil() else { return };
    let artifacts_dir = tempfile::tempdir().unwrap();
    write_stub_artifact(artifacts_dir.path(), "TradeManager");

    let config = ProjectConfig::load(artifacts_dir.path().to_path_buf());
    let profile = config.network_profile(Network::Local, Some(&anvil.endpoint()));
    let provider = setup_client(&profile, DEFAULT_LOCAL_PKEY).await.unwrap();
    let deployer = RpcDeployer::new(provider, ArtifactStore::new(artifacts_dir.path()), true);
    let deployments =
        DeploymentsFile::new(artifacts_dir.path().join("deployments.json"), Network::Local);

    let res = run_plan(
        &DeployScript::OtcEthereum.plan(),
        &deployer,
        Some(&deployments),
    )
    .await;

    assert!(matches!(res, Err(ScriptError::ContractInteraction(_))));
    assert!(deployments.read_deployed_address("TradeManager").is_ok());
}

#[tokio::test]
async fn test_chain_id_mismatch() {
    let Some(anvil) = spawn_anvil() else { return };

    let config = ProjectConfig::load("artifacts".into());
    let profile = config.network_profile(Network::Ethereum, Some(&anvil.endpoint()));
    let res = setup_client(&profile, DEFAULT_LOCAL_PKEY).await;

    assert!(matches!(
        res,
        Err(ScriptError::ChainIdMismatch {
            expected: 1,
            actual: 31337
        })
    ));
}
