//! Shared setup for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use titan::application::RunContext;
use titan::domain::{CollectionConfig, DeployPlan, TokenIds};
use titan::port::{ChainClient, ContractRegistry};
use titan::testkit::artifact::MemoryArtifactResolver;
use titan::testkit::chain::MockChainClient;
use titan::testkit::domain::euroleague_dev;
use titan::testkit::registry::memory_registry;

/// A run context over a mock chain and an in-memory registry.
pub struct Harness {
    pub chain: Arc<MockChainClient>,
    pub registry: Arc<dyn ContractRegistry>,
    pub ctx: RunContext,
}

impl Harness {
    /// Every artifact any contract kind or case in `collections` needs is
    /// available.
    pub fn new(collections: CollectionConfig) -> Self {
        Self::build(collections, TokenIds::new(), false)
    }

    pub fn with_token_ids(collections: CollectionConfig, token_ids: TokenIds) -> Self {
        Self::build(collections, token_ids, false)
    }

    pub fn read_only(collections: CollectionConfig) -> Self {
        Self::build(collections, TokenIds::new(), true)
    }

    fn build(collections: CollectionConfig, token_ids: TokenIds, read_only: bool) -> Self {
        let chain = Arc::new(MockChainClient::new());
        let registry: Arc<dyn ContractRegistry> = Arc::new(memory_registry().unwrap());
        let artifacts = MemoryArtifactResolver::new().with_all(&artifact_locations(&collections));
        let environment = euroleague_dev(token_ids).unwrap().with_read_only(read_only);

        let ctx = RunContext::new(
            environment,
            collections,
            Arc::clone(&chain) as Arc<dyn ChainClient>,
            Arc::clone(&registry),
            Arc::new(artifacts),
        );
        Self {
            chain,
            registry,
            ctx,
        }
    }
}

fn artifact_locations(collections: &CollectionConfig) -> Vec<titan::domain::ArtifactLocation> {
    let mut locations: Vec<_> = titan::domain::ContractKind::ALL
        .into_iter()
        .filter_map(|kind| DeployPlan::resolve(kind, collections).ok())
        .map(|plan| plan.artifact)
        .collect();
    locations.extend(
        collections
            .euroleague
            .erc
            .series1_cases
            .iter()
            .map(|case| DeployPlan::series1_case(case, 0).artifact),
    );
    locations
}
