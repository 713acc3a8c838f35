use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Provider},
    signers::{LocalWallet, Signer},
};

use crate::config::{NetworkConfig, PRIVATE_KEY_ENV_VAR};

pub type EtherSigner = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Wallet for the first account of the network, bound to its chain id.
/// Does not touch the network.
pub fn signing_wallet(network: &NetworkConfig) -> Result<LocalWallet> {
    let key = network
        .accounts
        .first()
        .map(|key| key.trim())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            anyhow!(
                "no signing account configured for network {}, set {PRIVATE_KEY_ENV_VAR}",
                network.name
            )
        })?;

    // the parse error is dropped so the key never ends up in a log line
    let wallet = key.parse::<LocalWallet>().map_err(|_| {
        anyhow!(
            "signing key for network {} is not a 32 byte hex private key",
            network.name
        )
    })?;

    Ok(wallet.with_chain_id(network.chain_id))
}

/// The wallet is built before the provider, so a bad credential fails
/// before anything is sent.
pub fn get_signer_client(network: &NetworkConfig) -> Result<Arc<EtherSigner>> {
    let wallet = signing_wallet(network)?;

    let provider = Provider::<Http>::try_from(network.rpc_url.as_str())
        .with_context(|| format!("invalid rpc url {}", network.rpc_url))?
        .interval(network.poll_interval);

    tracing::debug!(
        network = %network.name,
        deployer = ?wallet.address(),
        "created signer client"
    );

    Ok(Arc::new(SignerMiddleware::new(provider, wallet)))
}

#[cfg(test)]
mod tests {
    use ethers::{signers::Signer, types::H160};

    use super::{get_signer_client, signing_wallet};
    use crate::contracts::test_utils::{network_with_accounts, TEST_ADDRESS, TEST_PRIVATE_KEY};

    #[test]
    fn wallet_from_prefixed_key() {
        let network = network_with_accounts(vec![TEST_PRIVATE_KEY.to_owned()]);
        let wallet = signing_wallet(&network).unwrap();

        assert_eq!(wallet.address(), TEST_ADDRESS.parse::<H160>().unwrap());
        assert_eq!(wallet.chain_id(), network.chain_id);
    }

    #[test]
    fn wallet_from_bare_key() {
        let bare = TEST_PRIVATE_KEY.trim_start_matches("0x").to_owned();
        let wallet = signing_wallet(&network_with_accounts(vec![bare])).unwrap();

        assert_eq!(wallet.address(), TEST_ADDRESS.parse::<H160>().unwrap());
    }

    #[test]
    fn missing_key_is_rejected() {
        let err = signing_wallet(&network_with_accounts(vec![])).unwrap_err();
        assert!(err.to_string().contains("PRIVATE_KEY"));
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(signing_wallet(&network_with_accounts(vec![String::new()])).is_err());
        assert!(signing_wallet(&network_with_accounts(vec!["  ".to_owned()])).is_err());
    }

    #[test]
    fn malformed_key_is_rejected_without_echoing_it() {
        let too_long = format!("{TEST_PRIVATE_KEY}00");
        for key in ["0x1234", "not a key", too_long.as_str()] {
            let err = signing_wallet(&network_with_accounts(vec![key.to_owned()])).unwrap_err();
            assert!(err.to_string().contains("not a 32 byte hex private key"));
            assert!(!err.to_string().contains(key));
        }
    }

    #[test]
    fn client_for_unreachable_endpoint_is_built_offline() {
        let mut network = network_with_accounts(vec![TEST_PRIVATE_KEY.to_owned()]);
        network.rpc_url = "http://127.0.0.1:1".to_owned();

        assert!(get_signer_client(&network).is_ok());
    }

    #[test]
    fn client_rejects_invalid_url() {
        let mut network = network_with_accounts(vec![TEST_PRIVATE_KEY.to_owned()]);
        network.rpc_url = "not a url".to_owned();

        assert!(get_signer_client(&network).is_err());
    }
}
