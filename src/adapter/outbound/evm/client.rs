//! Signing EVM client backed by an alloy HTTP provider.

use std::str::FromStr;

use alloy_primitives::Address;
use alloy_provider::network::{
    Ethereum, EthereumWallet, Network, ReceiptResponse, TransactionBuilder,
};
use alloy_provider::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use tracing::{debug, error, info};

use super::bindings::{
    ICaseLinked, IClancyERC721, IEscrowERC721, IMarketplaceERC721Escrow, ISeries1Case,
};
use crate::domain::{Setting, SettingValue};
use crate::error::{ChainError, ConfigError, Result};
use crate::port::{ChainClient, DeployRequest, Deployment};

/// Endpoint and key for a signing connection.
#[derive(Clone)]
pub struct ChainSettings {
    pub rpc_url: String,
    pub rpc_name: String,
    pub deployment_key: String,
}

impl std::fmt::Debug for ChainSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainSettings")
            .field("rpc_url", &self.rpc_url)
            .field("rpc_name", &self.rpc_name)
            .field("deployment_key", &"<redacted>")
            .finish()
    }
}

/// Chain client holding one provider for the whole run.
pub struct EvmChainClient {
    provider: DynProvider<Ethereum>,
    deployer: Address,
    rpc_name: String,
}

impl EvmChainClient {
    /// Build the signer and provider, then confirm the endpoint answers.
    ///
    /// # Errors
    ///
    /// Returns a config error for an empty or malformed key or URL and
    /// [`ChainError::Connection`] when the endpoint cannot be reached.
    pub async fn connect(settings: &ChainSettings) -> Result<Self> {
        if settings.deployment_key.trim().is_empty() {
            return Err(ConfigError::MissingEnv {
                name: "DEPLOYMENT_KEY".into(),
            }
            .into());
        }

        let signer = PrivateKeySigner::from_str(settings.deployment_key.trim()).map_err(|e| {
            ConfigError::InvalidValue {
                field: "DEPLOYMENT_KEY",
                reason: e.to_string(),
            }
        })?;
        let deployer = signer.address();

        let rpc_url: url::Url =
            settings
                .rpc_url
                .parse()
                .map_err(|e: url::ParseError| ConfigError::InvalidValue {
                    field: "RPC_URL",
                    reason: e.to_string(),
                })?;

        let wallet = EthereumWallet::from(signer);
        let provider = ProviderBuilder::new().wallet(wallet).connect_http(rpc_url);
        let provider = DynProvider::new(provider);

        let chain_id = provider
            .get_chain_id()
            .await
            .map_err(|e| ChainError::Connection {
                rpc: settings.rpc_name.clone(),
                reason: e.to_string(),
            })?;

        info!(
            component = "chain",
            method = "connect",
            network = %settings.rpc_name,
            chain_id,
            deployer = %deployer,
            "Connected to network"
        );

        Ok(Self {
            provider,
            deployer,
            rpc_name: settings.rpc_name.clone(),
        })
    }

    /// Address of the deployment key.
    #[must_use]
    pub fn deployer(&self) -> Address {
        self.deployer
    }

    async fn confirm(
        &self,
        pending: PendingTransactionBuilder<Ethereum>,
    ) -> std::result::Result<<Ethereum as Network>::ReceiptResponse, ChainError> {
        let tx_hash = *pending.tx_hash();
        debug!(
            component = "chain",
            method = "confirm",
            tx_hash = %tx_hash,
            "Waiting for receipt"
        );
        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| ChainError::Receipt(format!("{tx_hash}: {e}")))?;

        if !receipt.status() {
            error!(
                component = "chain",
                method = "confirm",
                tx_hash = %tx_hash,
                "Transaction reverted"
            );
            return Err(ChainError::Reverted {
                tx_hash: tx_hash.to_string(),
            });
        }
        Ok(receipt)
    }
}

fn call_failed(e: alloy_contract::Error) -> ChainError {
    ChainError::Call(e.to_string())
}

fn submission_failed(e: alloy_contract::Error) -> ChainError {
    ChainError::Submission(e.to_string())
}

#[async_trait]
impl ChainClient for EvmChainClient {
    async fn deploy(&self, request: &DeployRequest) -> std::result::Result<Deployment, ChainError> {
        info!(
            component = "chain",
            method = "deploy",
            contract = %request.name,
            network = %self.rpc_name,
            "Deploying contract"
        );

        let tx = <Ethereum as Network>::TransactionRequest::default()
            .with_from(self.deployer)
            .with_deploy_code(request.creation_code());
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ChainError::Submission(format!("{}: {e}", request.name)))?;

        let receipt = self.confirm(pending).await?;
        let tx_hash = receipt.transaction_hash().to_string();
        let address = receipt
            .contract_address()
            .ok_or_else(|| ChainError::MissingContractAddress {
                tx_hash: tx_hash.clone(),
            })?;

        Ok(Deployment { address, tx_hash })
    }

    async fn read_setting(
        &self,
        contract: Address,
        setting: &Setting,
    ) -> std::result::Result<SettingValue, ChainError> {
        let provider = &self.provider;
        let value = match *setting {
            Setting::PublicMint => SettingValue::Flag(
                IClancyERC721::new(contract, provider)
                    .publicMintEnabled()
                    .call()
                    .await
                    .map_err(call_failed)?,
            ),
            Setting::Burn => SettingValue::Flag(
                IClancyERC721::new(contract, provider)
                    .burnEnabled()
                    .call()
                    .await
                    .map_err(call_failed)?,
            ),
            Setting::AllowedContract(token) => SettingValue::Flag(
                IMarketplaceERC721Escrow::new(contract, provider)
                    .allowedContracts(token)
                    .call()
                    .await
                    .map_err(call_failed)?,
            ),
            Setting::Vendor(token) => SettingValue::Flag(
                IEscrowERC721::new(contract, provider)
                    .vendors(token)
                    .call()
                    .await
                    .map_err(call_failed)?,
            ),
            Setting::CaseContract(case) => SettingValue::Flag(
                ICaseLinked::new(contract, provider)
                    .caseContracts(case)
                    .call()
                    .await
                    .map_err(call_failed)?,
            ),
            Setting::MomentsContract => SettingValue::Address(
                ISeries1Case::new(contract, provider)
                    .momentsContract()
                    .call()
                    .await
                    .map_err(call_failed)?,
            ),
            Setting::ReelsContract => SettingValue::Address(
                ISeries1Case::new(contract, provider)
                    .reelsContract()
                    .call()
                    .await
                    .map_err(call_failed)?,
            ),
        };
        Ok(value)
    }

    async fn write_setting(
        &self,
        contract: Address,
        setting: &Setting,
        value: &SettingValue,
    ) -> std::result::Result<String, ChainError> {
        let provider = &self.provider;
        let sent = match (*setting, *value) {
            (Setting::PublicMint, SettingValue::Flag(flag)) => {
                IClancyERC721::new(contract, provider)
                    .setPublicMintEnabled(flag)
                    .send()
                    .await
            }
            (Setting::Burn, SettingValue::Flag(flag)) => {
                IClancyERC721::new(contract, provider)
                    .setBurnEnabled(flag)
                    .send()
                    .await
            }
            (Setting::AllowedContract(token), SettingValue::Flag(flag)) => {
                IMarketplaceERC721Escrow::new(contract, provider)
                    .setAllowedContract(token, flag)
                    .send()
                    .await
            }
            (Setting::Vendor(token), SettingValue::Flag(flag)) => {
                IEscrowERC721::new(contract, provider)
                    .setVendorStatus(token, flag)
                    .send()
                    .await
            }
            (Setting::CaseContract(case), SettingValue::Flag(flag)) => {
                ICaseLinked::new(contract, provider)
                    .setCaseContract(case, flag)
                    .send()
                    .await
            }
            (Setting::MomentsContract, SettingValue::Address(moments)) => {
                ISeries1Case::new(contract, provider)
                    .setMomentsContract(moments)
                    .send()
                    .await
            }
            (Setting::ReelsContract, SettingValue::Address(reels)) => {
                ISeries1Case::new(contract, provider)
                    .setReelsContract(reels)
                    .send()
                    .await
            }
            (setting, value) => {
                return Err(ChainError::SettingMismatch {
                    setting: setting.to_string(),
                    value: value.to_string(),
                })
            }
        };

        let pending = sent.map_err(submission_failed)?;
        let receipt = self.confirm(pending).await?;
        Ok(receipt.transaction_hash().to_string())
    }

    fn network_name(&self) -> &str {
        &self.rpc_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(key: &str, url: &str) -> ChainSettings {
        ChainSettings {
            rpc_url: url.into(),
            rpc_name: "local".into(),
            deployment_key: key.into(),
        }
    }

    #[test]
    fn debug_redacts_deployment_key() {
        let rendered = format!("{:?}", settings("0xsecret", "http://localhost:8545"));
        assert!(!rendered.contains("0xsecret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[tokio::test]
    async fn connect_rejects_empty_key() {
        let err = EvmChainClient::connect(&settings("  ", "http://localhost:8545"))
            .await
            .err()
            .unwrap();
        assert!(matches!(
            err,
            crate::error::Error::Config(ConfigError::MissingEnv { .. })
        ));
    }

    #[tokio::test]
    async fn connect_rejects_malformed_key() {
        let err = EvmChainClient::connect(&settings("not-a-key", "http://localhost:8545"))
            .await
            .err()
            .unwrap();
        assert!(matches!(
            err,
            crate::error::Error::Config(ConfigError::InvalidValue {
                field: "DEPLOYMENT_KEY",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn connect_rejects_malformed_url() {
        let key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        let err = EvmChainClient::connect(&settings(key, "not a url"))
            .await
            .err()
            .unwrap();
        assert!(matches!(
            err,
            crate::error::Error::Config(ConfigError::InvalidValue { field: "RPC_URL", .. })
        ));
    }
}
