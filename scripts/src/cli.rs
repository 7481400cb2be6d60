//! Definitions of CLI arguments and commands for deploy scripts

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{deploy, export, show_config, size},
    config::{Network, ProjectConfig},
    constants::DEFAULT_ARTIFACTS_DIR,
    errors::ScriptError,
    types::DeployScript,
};

/// Deploy and administer the DexPools contracts
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the compilation artifacts
    #[arg(long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,

    /// Network RPC URL, replacing the target network's default endpoint
    #[arg(short, long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Private key of the deployer, replacing the target network's key variable
    #[arg(short, long)]
    pub priv_key: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The available commands
#[derive(Subcommand)]
pub enum Command {
    /// Run a deploy script
    Deploy(DeployArgs),
    /// Export contract ABIs
    ExportAbis(ExportAbisArgs),
    /// Report deployed contract sizes
    Size(SizeArgs),
    /// Print the resolved configuration
    ShowConfig,
}

impl Command {
    /// Run the command
    pub async fn run(
        self,
        config: &ProjectConfig,
        rpc_url: Option<&str>,
        priv_key: Option<&str>,
    ) -> Result<(), ScriptError> {
        match self {
            Command::Deploy(args) => deploy(args, config, rpc_url, priv_key).await,
            Command::ExportAbis(args) => export(args, config),
            Command::Size(args) => size(args, config),
            Command::ShowConfig => show_config(config),
        }
    }
}

/// Deploy a contract and issue its post-deployment transactions
#[derive(Args)]
pub struct DeployArgs {
    /// The deploy script to run
    pub script: DeployScript,

    /// The network to deploy to, defaults to the script's own network
    #[arg(short, long)]
    pub network: Option<Network>,

    /// Path of a JSON file to record deployed addresses in
    #[arg(short, long)]
    pub deployments_path: Option<PathBuf>,
}

/// Export the ABI of every compiled contract
#[derive(Args)]
pub struct ExportAbisArgs {
    /// Directory to export to, defaults to `abis`
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Keep existing files in the export directory
    #[arg(long)]
    pub no_clear: bool,
}

/// Report the deployed size of every compiled contract
#[derive(Args)]
pub struct SizeArgs {
    /// Report oversized contracts without failing
    #[arg(long)]
    pub no_strict: bool,
}
