use std::{io, process::ExitCode};

use clap::Parser;
use dexpools_scripts::{cli::Cli, config::ProjectConfig, errors::exit_code};

#[tokio::main]
async fn main() -> ExitCode {
    // Load `.env` before parsing so that it can supply keys and overrides
    dotenv::dotenv().ok();

    let Cli {
        artifacts,
        rpc_url,
        priv_key,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt()
        .pretty()
        .with_writer(io::stderr)
        .init();

    let config = ProjectConfig::load(artifacts);
    let res = command
        .run(&config, rpc_url.as_deref(), priv_key.as_deref())
        .await;

    ExitCode::from(exit_code(&res))
}
