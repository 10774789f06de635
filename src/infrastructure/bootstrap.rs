//! Composition root: builds the adapters a run needs.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::artifact::FsArtifactResolver;
use crate::adapter::outbound::evm::EvmChainClient;
use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use crate::adapter::outbound::sqlite::SqliteContractRegistry;
use crate::application::RunContext;
use crate::domain::{ActiveEnvironment, CollectionConfig};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Open the registry database of `environment` and apply migrations.
///
/// Migrations run even for a read-only environment; they never touch
/// existing rows.
pub fn open_registry(environment: &ActiveEnvironment) -> Result<SqliteContractRegistry> {
    let pool = create_pool(&environment.database_url)?;
    run_migrations(&pool)?;
    info!(
        component = "bootstrap",
        method = "open_registry",
        client = %environment.client,
        tier = %environment.tier,
        read_only = environment.read_only,
        "Registry opened"
    );
    Ok(SqliteContractRegistry::new(pool).with_read_only(environment.read_only))
}

/// Connect the chain client, open the registry and bind the run context.
///
/// # Errors
///
/// Returns a config error when `RPC_URL` or `DEPLOYMENT_KEY` is missing, a
/// network error when the endpoint is unreachable, or a database error.
pub async fn build_context(
    config: &Config,
    environment: ActiveEnvironment,
    collections: CollectionConfig,
) -> Result<RunContext> {
    let chain = EvmChainClient::connect(&config.chain_settings()?).await?;
    let registry = open_registry(&environment)?;
    let artifacts = FsArtifactResolver::new(config.artifacts.project_dir.clone());

    Ok(RunContext::new(
        environment,
        collections,
        Arc::new(chain),
        Arc::new(registry),
        Arc::new(artifacts),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Client, EnvTier, NewContractRecord, TokenIds};
    use crate::error::Error;
    use crate::port::ContractRegistry;
    use alloy_primitives::Address;
    use tempfile::TempDir;

    #[tokio::test]
    async fn read_only_environment_opens_read_only_registry() {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}", dir.path().join("registry.db").display());
        let environment =
            ActiveEnvironment::new(Client::Euroleague, EnvTier::Dev, url, TokenIds::new())
                .unwrap()
                .with_read_only(true);

        let registry = open_registry(&environment).unwrap();
        assert!(registry.is_read_only());
        assert!(registry.list().await.unwrap().is_empty());

        let err = registry
            .upsert(&NewContractRecord {
                contract_name: "Moments".into(),
                contract_address: Address::repeat_byte(1),
                contract_artifact: "{}".into(),
                external_token_id: 0,
                contract_type: crate::domain::ContractType::Erc721,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ReadOnly));
    }
}
