use std::{collections::BTreeMap, env, path::PathBuf, time::Duration};

use anyhow::{anyhow, Result};

pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// compiler version the artifacts are expected to be built with
pub const SOLIDITY_VERSION: &str = "0.8.20";
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

pub const ROOTSTOCK_TESTNET: &str = "rootstock_testnet";
const ROOTSTOCK_TESTNET_RPC_URL: &str = "https://public-node.testnet.rsk.co";
const ROOTSTOCK_TESTNET_CHAIN_ID: u64 = 31;

pub const LOCALHOST: &str = "localhost";
const LOCALHOST_RPC_URL: &str = "http://127.0.0.1:8545";
const LOCALHOST_CHAIN_ID: u64 = 31337;

const REMOTE_POLL_INTERVAL: Duration = Duration::from_secs(7);
const LOCAL_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// A named chain that contracts can be deployed to.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkConfig {
    pub name: String,
    pub rpc_url: String,
    pub chain_id: u64,
    /// hex encoded private keys, the first one signs deployments
    pub accounts: Vec<String>,
    /// send pre EIP-1559 transactions. Rootstock has no base fee market.
    pub legacy_transactions: bool,
    pub poll_interval: Duration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectConfig {
    pub solidity_version: String,
    pub artifacts_dir: PathBuf,
    /// network used when none is named
    pub default_network: String,
    networks: BTreeMap<String, NetworkConfig>,
}

impl ProjectConfig {
    /// Built-in networks, all signing with `private_key` when one is given.
    pub fn new(private_key: Option<String>) -> Self {
        let accounts: Vec<String> = private_key.into_iter().collect();

        let networks = [
            NetworkConfig {
                name: ROOTSTOCK_TESTNET.to_owned(),
                rpc_url: ROOTSTOCK_TESTNET_RPC_URL.to_owned(),
                chain_id: ROOTSTOCK_TESTNET_CHAIN_ID,
                accounts: accounts.clone(),
                legacy_transactions: true,
                poll_interval: REMOTE_POLL_INTERVAL,
            },
            NetworkConfig {
                name: LOCALHOST.to_owned(),
                rpc_url: LOCALHOST_RPC_URL.to_owned(),
                chain_id: LOCALHOST_CHAIN_ID,
                accounts,
                legacy_transactions: false,
                poll_interval: LOCAL_POLL_INTERVAL,
            },
        ]
        .into_iter()
        .map(|network| (network.name.clone(), network))
        .collect();

        Self {
            solidity_version: SOLIDITY_VERSION.to_owned(),
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
            default_network: ROOTSTOCK_TESTNET.to_owned(),
            networks,
        }
    }

    /// load the signing key from env (or a `.env` file)
    pub fn load() -> Self {
        dotenv::dotenv().ok();

        let private_key = env::var(PRIVATE_KEY_ENV_VAR).ok();
        if private_key.is_none() {
            tracing::warn!("{PRIVATE_KEY_ENV_VAR} is not set, deployments will fail");
        }

        Self::new(private_key)
    }

    pub fn network(&self, name: &str) -> Result<&NetworkConfig> {
        self.networks.get(name).ok_or_else(|| {
            anyhow!(
                "unknown network '{name}', expected one of: {}",
                self.network_names().join(", ")
            )
        })
    }

    pub fn network_names(&self) -> Vec<&str> {
        self.networks.keys().map(String::as_str).collect()
    }

    /// Adds a network, replacing any with the same name.
    pub fn add_network(&mut self, network: NetworkConfig) {
        self.networks.insert(network.name.clone(), network);
    }
}
