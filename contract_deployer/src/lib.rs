pub mod config;
pub mod contracts;
pub mod deployer;
pub mod ethers_client;

pub use contracts::{artifact::ContractArtifact, factory::Deployment};
pub use deployer::deploy_contract;
