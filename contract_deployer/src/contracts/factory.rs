use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use ethers::{
    contract::ContractFactory,
    providers::Middleware,
    types::{Address, H256, U64},
    utils::to_checksum,
};

use super::artifact::ContractArtifact;

/// A confirmed contract creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Deployment {
    pub contract_name: String,
    pub address: Address,
    pub transaction_hash: H256,
    pub block_number: Option<U64>,
}

impl Deployment {
    /// EIP-55 mixed case `0x..` address
    pub fn checksum_address(&self) -> String {
        to_checksum(&self.address, None)
    }
}

/// Submits contract-creation transactions for a single compiled artifact.
pub struct ContractDeployer<M> {
    client: Arc<M>,
    artifact: ContractArtifact,
    confirmations: usize,
    legacy: bool,
}

impl<M> ContractDeployer<M>
where
    M: Middleware + 'static,
{
    pub fn new(client: Arc<M>, artifact: ContractArtifact) -> Self {
        Self {
            client,
            artifact,
            confirmations: 1,
            legacy: false,
        }
    }

    /// blocks that must include or follow the transaction, `1` is the
    /// including block itself
    pub fn confirmations(mut self, confirmations: usize) -> Self {
        self.confirmations = confirmations;
        self
    }

    pub fn legacy(mut self) -> Self {
        self.legacy = true;
        self
    }

    /// Deploys with no constructor arguments and waits for the receipt.
    /// Every call creates a new contract.
    pub async fn deploy(&self) -> Result<Deployment> {
        let contract_name = &self.artifact.contract_name;

        let factory = ContractFactory::new(
            self.artifact.abi.clone(),
            self.artifact.bytecode.clone(),
            self.client.clone(),
        );

        let mut deployer = factory
            .deploy(())
            .map_err(|e| anyhow!(e.to_string()))
            .with_context(|| format!("could not build deployment of {contract_name}"))?
            .confirmations(self.confirmations);
        if self.legacy {
            deployer = deployer.legacy();
        }

        tracing::info!(
            contract = %contract_name,
            confirmations = self.confirmations,
            "submitting deployment transaction"
        );

        let (contract, receipt) = deployer
            .send_with_receipt()
            .await
            .map_err(|e| anyhow!(e.to_string()))
            .with_context(|| format!("deployment of {contract_name} was not confirmed"))?;

        let deployment = Deployment {
            contract_name: contract_name.clone(),
            address: contract.address(),
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
        };

        tracing::info!(
            contract = %contract_name,
            address = %deployment.checksum_address(),
            tx = ?deployment.transaction_hash,
            block = ?deployment.block_number,
            "deployment confirmed"
        );

        Ok(deployment)
    }
}
