use std::{fmt, path::PathBuf};

use contract_deployer::config::ProjectConfig;

pub const DEFAULT_CONTRACT: &str = "EnergyToken";

/// Deploy a compiled contract and print its address.
///
/// Every option has a default, running without arguments deploys
/// `EnergyToken` to the Rootstock testnet with the key in `PRIVATE_KEY`.
#[derive(clap::Parser, Debug)]
#[clap(version)]
pub struct Arguments {
    /// Named network to deploy to, the project default when unset.
    #[clap(long, env)]
    pub network: Option<String>,

    /// Contract whose hardhat artifact gets deployed.
    #[clap(long, env = "CONTRACT_NAME", default_value = DEFAULT_CONTRACT)]
    pub contract: String,

    /// Directory `hardhat compile` wrote artifacts to.
    #[clap(long, env)]
    pub artifacts_dir: Option<PathBuf>,

    /// Overrides the RPC endpoint of the selected network.
    #[clap(long, env)]
    pub rpc_url: Option<String>,

    /// Overrides the chain id of the selected network.
    #[clap(long, env)]
    pub chain_id: Option<u64>,

    /// Blocks, counting the including one, before the deployment counts as
    /// confirmed.
    #[clap(long, env, default_value_t = 1)]
    pub confirmations: usize,

    #[clap(
        long,
        env,
        default_value = "warn,contract_deployer=info,energy_token_deploy=info"
    )]
    pub log_filter: String,
}

impl Arguments {
    /// Applies the command line overrides. The selected network becomes the
    /// project default and must exist.
    pub fn apply(&self, mut config: ProjectConfig) -> anyhow::Result<ProjectConfig> {
        if let Some(network) = &self.network {
            config.default_network = network.clone();
        }
        if let Some(artifacts_dir) = &self.artifacts_dir {
            config.artifacts_dir = artifacts_dir.clone();
        }

        let mut network = config.network(&config.default_network)?.clone();
        if let Some(rpc_url) = &self.rpc_url {
            network.rpc_url = rpc_url.clone();
        }
        if let Some(chain_id) = self.chain_id {
            network.chain_id = chain_id;
        }
        config.add_network(network);

        Ok(config)
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "network: {:?}", self.network)?;
        writeln!(f, "contract: {}", self.contract)?;
        writeln!(f, "artifacts_dir: {:?}", self.artifacts_dir)?;
        writeln!(f, "rpc_url: {:?}", self.rpc_url)?;
        writeln!(f, "chain_id: {:?}", self.chain_id)?;
        writeln!(f, "confirmations: {}", self.confirmations)?;
        write!(f, "log_filter: {}", self.log_filter)
    }
}
