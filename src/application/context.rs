//! Per-run context threaded through every stage.

use std::sync::Arc;

use crate::domain::{ActiveEnvironment, CollectionConfig};
use crate::error::{Error, Result};
use crate::port::{ArtifactResolver, ChainClient, ContractRegistry};

use super::deployer::Deployer;
use super::linker::Linker;

/// Everything a run needs, built once at startup.
///
/// The environment, collection config and outbound adapters are fixed for
/// the lifetime of the run.
#[derive(Clone)]
pub struct RunContext {
    environment: ActiveEnvironment,
    collections: CollectionConfig,
    chain: Arc<dyn ChainClient>,
    registry: Arc<dyn ContractRegistry>,
    artifacts: Arc<dyn ArtifactResolver>,
}

impl RunContext {
    #[must_use]
    pub fn new(
        environment: ActiveEnvironment,
        collections: CollectionConfig,
        chain: Arc<dyn ChainClient>,
        registry: Arc<dyn ContractRegistry>,
        artifacts: Arc<dyn ArtifactResolver>,
    ) -> Self {
        Self {
            environment,
            collections,
            chain,
            registry,
            artifacts,
        }
    }

    #[must_use]
    pub fn environment(&self) -> &ActiveEnvironment {
        &self.environment
    }

    #[must_use]
    pub fn collections(&self) -> &CollectionConfig {
        &self.collections
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<dyn ContractRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn deployer(&self) -> Deployer {
        Deployer::new(
            Arc::clone(&self.chain),
            Arc::clone(&self.registry),
            Arc::clone(&self.artifacts),
        )
    }

    #[must_use]
    pub fn linker(&self) -> Linker {
        Linker::new(Arc::clone(&self.chain))
    }

    /// Fail with [`Error::ReadOnly`] before any transaction is sent when the
    /// environment forbids registry writes.
    ///
    /// A deployment that cannot be recorded would be lost, so this runs
    /// ahead of the chain.
    pub fn ensure_writable(&self) -> Result<()> {
        if self.environment.read_only {
            return Err(Error::ReadOnly);
        }
        Ok(())
    }
}
