//! Chain client port.
//!
//! Covers the three things the tool does on chain: create a contract, read a
//! setting and write a setting. Every write blocks until its receipt is
//! available.

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;

use crate::domain::{Setting, SettingValue};
use crate::error::ChainError;

/// A contract-creation transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployRequest {
    /// Registry name, used for logging only.
    pub name: String,
    pub bytecode: Bytes,
    /// ABI-encoded constructor arguments appended to the bytecode.
    pub constructor_args: Bytes,
}

impl DeployRequest {
    /// Creation code as submitted: bytecode followed by arguments.
    #[must_use]
    pub fn creation_code(&self) -> Bytes {
        let mut code = Vec::with_capacity(self.bytecode.len() + self.constructor_args.len());
        code.extend_from_slice(&self.bytecode);
        code.extend_from_slice(&self.constructor_args);
        code.into()
    }
}

/// A confirmed deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub address: Address,
    pub tx_hash: String,
}

/// Port for a signing connection to an EVM network.
///
/// Implementations hold the signer and provider for one RPC endpoint.
/// Nothing is retried: a failed deployment may still have landed.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Submit a contract-creation transaction and wait for its receipt.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::Reverted`] if the receipt reports failure and
    /// [`ChainError::MissingContractAddress`] if it carries no address.
    async fn deploy(&self, request: &DeployRequest) -> Result<Deployment, ChainError>;

    /// Read the current value of `setting` on `contract`.
    async fn read_setting(
        &self,
        contract: Address,
        setting: &Setting,
    ) -> Result<SettingValue, ChainError>;

    /// Write `value` to `setting` on `contract`, returning the transaction hash.
    async fn write_setting(
        &self,
        contract: Address,
        setting: &Setting,
        value: &SettingValue,
    ) -> Result<String, ChainError>;

    /// Display name of the network, for logs.
    fn network_name(&self) -> &str;
}
