mod arguments;
mod logging;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, Parser};
use contract_deployer::{config::ProjectConfig, deploy_contract, Deployment};

use crate::arguments::Arguments;

#[tokio::main]
async fn main() -> ExitCode {
    // before parsing so `.env` values can back the command line options
    dotenv::dotenv().ok();

    let args = match Arguments::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    logging::initialize(&args.log_filter);
    tracing::debug!("running with arguments:\n{}", args);

    match run(&args).await {
        Ok(deployment) => {
            println!("{}", deployed_line(&deployment));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Arguments) -> Result<Deployment> {
    let config = args.apply(ProjectConfig::load())?;

    tracing::info!(
        network = %config.default_network,
        artifacts = %config.artifacts_dir.display(),
        "loaded project config"
    );

    deploy_contract(
        &config,
        &config.default_network,
        &args.contract,
        args.confirmations,
    )
    .await
    .context("deployment failed")
}

fn deployed_line(deployment: &Deployment) -> String {
    format!(
        "✅ {} deployed at: {}",
        deployment.contract_name,
        deployment.checksum_address()
    )
}
