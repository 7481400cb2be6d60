//! Implementations of the various deploy scripts

use serde_json::json;
use tracing::{info, warn};

use crate::{
    abi_export::export_abis,
    artifacts::ArtifactStore,
    cli::{DeployArgs, ExportAbisArgs, SizeArgs},
    config::ProjectConfig,
    deployer::{ContractDeployer, RpcDeployer},
    errors::ScriptError,
    sizer::{contract_sizes, report_sizes},
    types::{DeployPlan, DeployedContract},
    utils::{setup_client, DeploymentsFile},
};

/// Deploy a contract according to a deploy script, then issue its administrative transactions
pub async fn deploy(
    args: DeployArgs,
    config: &ProjectConfig,
    rpc_url: Option<&str>,
    priv_key: Option<&str>,
) -> Result<(), ScriptError> {
    let network = args.network.unwrap_or_else(|| args.script.home_network());
    if network != args.script.home_network() {
        warn!(
            "Running `{}` against {} instead of {}",
            args.script,
            network,
            args.script.home_network()
        );
    }

    let profile = config.network_profile(network, rpc_url);
    info!(
        "Running `{}` on {} (chain {})",
        args.script, network, profile.chain_id
    );

    let key = profile.signer_key(priv_key)?;
    let provider = setup_client(&profile, &key).await?;
    let deployer = RpcDeployer::new(
        provider,
        ArtifactStore::new(&config.artifacts_dir),
        profile.allow_unlimited_contract_size,
    );

    let deployments = args
        .deployments_path
        .map(|path| DeploymentsFile::new(path, network));

    run_plan(&args.script.plan(), &deployer, deployments.as_ref()).await?;
    Ok(())
}

/// Execute a deploy plan step by step, stopping at the first failure
///
/// A failure after the deployment leaves the contract deployed; nothing is rolled back.
pub async fn run_plan(
    plan: &DeployPlan,
    deployer: &impl ContractDeployer,
    deployments: Option<&DeploymentsFile>,
) -> Result<DeployedContract, ScriptError> {
    let contract = deployer
        .deploy_contract(plan.contract, &plan.constructor_args)
        .await?;

    if let Some(deployments) = deployments {
        deployments.write_deployed_address(&contract.name, contract.address)?;
    }

    for action in &plan.admin_actions {
        deployer.send_admin_txn(&contract, action).await?;
    }

    info!(
        "`{}` complete: {} at {:#x}",
        plan.script, contract.name, contract.address
    );
    Ok(contract)
}

/// Export the ABIs of all compiled contracts
pub fn export(args: ExportAbisArgs, config: &ProjectConfig) -> Result<(), ScriptError> {
    let mut settings = config.abi_exporter.clone();
    if let Some(out) = args.out {
        settings.path = out;
    }
    if args.no_clear {
        settings.clear = false;
    }

    let artifacts = ArtifactStore::new(&config.artifacts_dir).load_all()?;
    export_abis(&artifacts, &settings)?;
    Ok(())
}

/// Report the sizes of all compiled contracts
pub fn size(args: SizeArgs, config: &ProjectConfig) -> Result<(), ScriptError> {
    let artifacts = ArtifactStore::new(&config.artifacts_dir).load_all()?;
    let sizes = contract_sizes(&artifacts, &config.contract_sizer);
    report_sizes(&sizes, config.contract_sizer.strict && !args.no_strict)
}

/// Print the resolved configuration, without secrets
pub fn show_config(config: &ProjectConfig) -> Result<(), ScriptError> {
    println!("{}", render_config(config)?);
    Ok(())
}

/// Render the configuration report: settings, key presence per network and artifact presence
fn render_config(config: &ProjectConfig) -> Result<String, ScriptError> {
    let key_status: serde_json::Map<String, serde_json::Value> = config
        .networks
        .iter()
        .map(|p| (p.network.to_string(), json!(p.has_key())))
        .collect();

    let report = json!({
        "config": config,
        "keys_configured": key_status,
        "artifacts_present": config.artifacts_dir.is_dir(),
    });

    serde_json::to_string_pretty(&report).map_err(|e| ScriptError::Serde(e.to_string()))
}
