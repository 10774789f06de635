//! Contract deployment and registration.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::{ContractHandle, DeployPlan, NewContractRecord};
use crate::error::Result;
use crate::port::{ArtifactResolver, ChainClient, ContractRegistry, DeployRequest};

/// Deploys one planned contract and records it in the registry.
pub struct Deployer {
    chain: Arc<dyn ChainClient>,
    registry: Arc<dyn ContractRegistry>,
    artifacts: Arc<dyn ArtifactResolver>,
}

impl Deployer {
    #[must_use]
    pub fn new(
        chain: Arc<dyn ChainClient>,
        registry: Arc<dyn ContractRegistry>,
        artifacts: Arc<dyn ArtifactResolver>,
    ) -> Self {
        Self {
            chain,
            registry,
            artifacts,
        }
    }

    /// Deploy `plan` and upsert its record under the plan's record name.
    ///
    /// The artifact is resolved before anything is submitted, so a missing
    /// artifact never costs a transaction.
    ///
    /// # Errors
    ///
    /// Returns the artifact error, [`crate::error::Error::Network`] for any
    /// chain failure, or the registry error if the upsert fails.
    pub async fn deploy(&self, plan: &DeployPlan) -> Result<ContractHandle> {
        let artifact = self.artifacts.resolve(&plan.artifact)?;
        let request = DeployRequest {
            name: plan.record_name.clone(),
            bytecode: artifact.bytecode.clone(),
            constructor_args: plan.constructor_args.encode(),
        };

        info!(
            component = "deployer",
            method = "deploy",
            contract = %plan.record_name,
            artifact = %plan.artifact,
            network = %self.chain.network_name(),
            "Deploying contract"
        );

        let deployment = self.chain.deploy(&request).await.map_err(|e| {
            error!(
                component = "deployer",
                method = "deploy",
                contract = %plan.record_name,
                error = %e,
                "Deployment failed"
            );
            e
        })?;

        let record = self
            .registry
            .upsert(&NewContractRecord {
                contract_name: plan.record_name.clone(),
                contract_address: deployment.address,
                contract_artifact: artifact.to_record_json(),
                external_token_id: plan.external_token_id,
                contract_type: plan.contract_type,
            })
            .await?;

        info!(
            component = "deployer",
            method = "deploy",
            contract = %record.contract_name,
            address = %record.contract_address,
            tx_hash = %deployment.tx_hash,
            "Contract deployed"
        );
        Ok(record.handle())
    }
}
