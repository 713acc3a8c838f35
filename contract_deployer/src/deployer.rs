use anyhow::Result;

use crate::{
    config::ProjectConfig,
    contracts::{
        artifact::ContractArtifact,
        factory::{ContractDeployer, Deployment},
    },
    ethers_client::get_signer_client,
};

/// Deploy the compiled `contract_name` to the project network `network_name`.
///
/// The signer is checked first, a missing or malformed key fails without
/// any request reaching the network. Not idempotent: each call sends a new
/// contract-creation transaction.
pub async fn deploy_contract(
    project: &ProjectConfig,
    network_name: &str,
    contract_name: &str,
    confirmations: usize,
) -> Result<Deployment> {
    let network = project.network(network_name)?;
    let signer = get_signer_client(network)?;
    let artifact = ContractArtifact::load(
        &project.artifacts_dir,
        contract_name,
        &project.solidity_version,
    )?;

    tracing::info!(
        network = %network.name,
        chain_id = network.chain_id,
        rpc_url = %network.rpc_url,
        contract = %contract_name,
        source = %artifact.source_name,
        solidity = %project.solidity_version,
        "deploying contract"
    );

    let mut deployer = ContractDeployer::new(signer, artifact).confirmations(confirmations);
    if network.legacy_transactions {
        deployer = deployer.legacy();
    }

    deployer.deploy().await
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::deploy_contract;
    use crate::{
        config::LOCALHOST,
        contracts::test_utils::{
            fixture_project, network_with_accounts, MINIMAL_CONTRACT, TEST_PRIVATE_KEY,
        },
    };

    #[tokio::test]
    async fn missing_key_fails_before_anything_else() {
        // neither the artifacts nor the endpoint exist, the key error must win
        let mut network = network_with_accounts(vec![]);
        network.rpc_url = "http://127.0.0.1:1".to_owned();
        let mut project = fixture_project(network);
        project.artifacts_dir = PathBuf::from("/nonexistent");

        let err = deploy_contract(&project, LOCALHOST, "EnergyToken", 1)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("PRIVATE_KEY"));
    }

    #[tokio::test]
    async fn malformed_key_fails_before_anything_else() {
        let mut network = network_with_accounts(vec!["0xdeadbeef".to_owned()]);
        network.rpc_url = "http://127.0.0.1:1".to_owned();
        let mut project = fixture_project(network);
        project.artifacts_dir = PathBuf::from("/nonexistent");

        let err = deploy_contract(&project, LOCALHOST, "EnergyToken", 1)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("private key"));
    }

    #[tokio::test]
    async fn unknown_network_fails() {
        let project = fixture_project(network_with_accounts(vec![TEST_PRIVATE_KEY.to_owned()]));

        let err = deploy_contract(&project, "mainnet", MINIMAL_CONTRACT, 1)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("unknown network"));
    }

    #[tokio::test]
    async fn missing_artifact_fails() {
        let project = fixture_project(network_with_accounts(vec![TEST_PRIVATE_KEY.to_owned()]));

        let err = deploy_contract(&project, LOCALHOST, "EnergyToken", 1)
            .await
            .unwrap_err();

        assert!(format!("{err:#}").contains("EnergyToken.json"));
    }

    #[tokio::test]
    async fn compiler_mismatch_fails_before_sending() {
        // unreachable endpoint, the version check has to fail first
        let mut network = network_with_accounts(vec![TEST_PRIVATE_KEY.to_owned()]);
        network.rpc_url = "http://127.0.0.1:1".to_owned();
        let project = fixture_project(network);

        let err = deploy_contract(&project, LOCALHOST, "Outdated", 1)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("compiled with solc 0.8.19"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_fails() {
        let mut network = network_with_accounts(vec![TEST_PRIVATE_KEY.to_owned()]);
        network.rpc_url = "http://127.0.0.1:1".to_owned();
        let project = fixture_project(network);

        let res = deploy_contract(&project, LOCALHOST, MINIMAL_CONTRACT, 1).await;

        assert!(res.is_err());
    }
}
