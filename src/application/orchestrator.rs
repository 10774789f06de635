//! Stage driver for a deployment run.
//!
//! A run goes through up to four stages, strictly in order:
//!
//! 1. rehydrate every contract known to the registry,
//! 2. deploy newly requested contracts (tokens before marketplaces),
//! 3. coordinate the selected contracts from collection config,
//! 4. allow the selected tokens on the configured marketplace.
//!
//! Everything runs sequentially and the first failure halts the run.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::domain::{
    CollectionConfig, ContractContainer, ContractHandle, ContractKind, ContractType, DeployPlan,
    Link,
};
use crate::error::{Error, Result};

use super::context::RunContext;
use super::linker::{marketplace_entry, LinkSummary};

/// Contract kinds selected for each stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRequest {
    pub deploy: Vec<ContractKind>,
    pub coordinate: Vec<ContractKind>,
    pub marketplace: Vec<ContractKind>,
}

impl RunRequest {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deploy.is_empty() && self.coordinate.is_empty() && self.marketplace.is_empty()
    }
}

/// A selected contract resolved to its registry name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub kind: ContractKind,
    pub name: String,
}

/// A [`RunRequest`] resolved against the collection config.
///
/// Built before any connection is opened so misconfiguration fails fast.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    /// De-duplicated and ordered by deployment rank.
    pub deploy: Vec<DeployPlan>,
    pub coordinate: Vec<Target>,
    pub marketplace: Vec<Target>,
    /// Marketplace receiving allowances; set when the marketplace stage runs.
    pub allowance_target: Option<Target>,
}

impl RunPlan {
    /// Resolve every selected kind to its plan or registry name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when a selected kind has no collection
    /// config, or when a marketplace is selected for the allowance stage.
    pub fn resolve(
        request: &RunRequest,
        collections: &CollectionConfig,
        marketplace: ContractKind,
    ) -> Result<Self> {
        let mut deploy = dedup(&request.deploy)
            .into_iter()
            .map(|kind| DeployPlan::resolve(kind, collections))
            .collect::<Result<Vec<_>>>()?;
        // Stable, so equal ranks keep their requested order.
        deploy.sort_by_key(|plan| plan.kind.rank());

        let coordinate = targets(&request.coordinate, collections)?;

        let marketplace_targets = targets(&request.marketplace, collections)?;
        if let Some(target) = marketplace_targets.iter().find(|t| t.kind.is_marketplace()) {
            return Err(Error::Validation(format!(
                "{} is a marketplace and cannot be allowed on {marketplace}",
                target.kind
            )));
        }
        let allowance_target = if marketplace_targets.is_empty() {
            None
        } else {
            Some(target(marketplace, collections)?)
        };

        Ok(Self {
            deploy,
            coordinate,
            marketplace: marketplace_targets,
            allowance_target,
        })
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub rehydrated: usize,
    pub deployed: Vec<ContractHandle>,
    pub coordinated: LinkSummary,
    pub allowed: LinkSummary,
}

/// Drives the stages of a run against a [`RunContext`].
pub struct Orchestrator<'a> {
    ctx: &'a RunContext,
}

impl<'a> Orchestrator<'a> {
    #[must_use]
    pub fn new(ctx: &'a RunContext) -> Self {
        Self { ctx }
    }

    /// Execute `plan`.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure. Contracts deployed before the
    /// failure stay deployed and recorded.
    pub async fn run(&self, plan: &RunPlan) -> Result<RunReport> {
        let mut report = RunReport::default();

        let mut container = self.rehydrate().await?;
        report.rehydrated = container.len();

        if !plan.deploy.is_empty() {
            let fresh = self.deploy(&plan.deploy).await?;
            report.deployed = fresh.iter().cloned().collect();
            container.merge(fresh);
        }

        if !plan.coordinate.is_empty() {
            report.coordinated = self.coordinate(&container, &plan.coordinate).await?;
        }

        if let Some(target) = &plan.allowance_target {
            report.allowed = self.allow(&container, target, &plan.marketplace).await?;
        }

        info!(
            component = "orchestrator",
            method = "run",
            rehydrated = report.rehydrated,
            deployed = report.deployed.len(),
            applied = report.coordinated.applied + report.allowed.applied,
            already_set = report.coordinated.already_set + report.allowed.already_set,
            "Run complete"
        );
        Ok(report)
    }

    /// Load every registry record into a container.
    ///
    /// # Errors
    ///
    /// Returns the registry error. An empty registry is not an error.
    pub async fn rehydrate(&self) -> Result<ContractContainer> {
        let records = self.ctx.registry().list().await?;
        if records.is_empty() {
            info!(
                component = "orchestrator",
                method = "rehydrate",
                "Registry is empty, nothing to rehydrate"
            );
            return Ok(ContractContainer::new());
        }

        let container: ContractContainer = records.iter().map(|r| r.handle()).collect();
        info!(
            component = "orchestrator",
            method = "rehydrate",
            count = container.len(),
            "Contracts rehydrated"
        );
        Ok(container)
    }

    /// Deploy each plan once, in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadOnly`] before submitting anything when the
    /// environment is read only, otherwise the first deployment failure.
    pub async fn deploy(&self, plans: &[DeployPlan]) -> Result<ContractContainer> {
        if let Err(e) = self.ctx.ensure_writable() {
            warn!(
                component = "orchestrator",
                method = "deploy",
                count = plans.len(),
                "Refusing to deploy against a read-only registry"
            );
            return Err(e);
        }

        let deployer = self.ctx.deployer();
        let mut fresh = ContractContainer::new();
        for plan in plans {
            let handle = deployer.deploy(plan).await?;
            fresh.insert(handle);
        }
        Ok(fresh)
    }

    /// Reconcile the selected contracts with their collection config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegistryNotFound`] for a selected contract missing
    /// from the container, or the first link failure.
    pub async fn coordinate(
        &self,
        container: &ContractContainer,
        targets: &[Target],
    ) -> Result<LinkSummary> {
        let linker = self.ctx.linker();
        let mut summary = LinkSummary::default();

        for target in targets {
            let handle = container.require(&target.name)?;
            let links = self.coordination_links(container, target, handle);
            if links.is_empty() {
                debug!(
                    component = "orchestrator",
                    method = "coordinate",
                    contract = %target.name,
                    "Nothing to coordinate"
                );
                continue;
            }
            summary.absorb(linker.apply_all(&links).await?);
        }
        Ok(summary)
    }

    fn coordination_links(
        &self,
        container: &ContractContainer,
        target: &Target,
        handle: &ContractHandle,
    ) -> Vec<Link> {
        let collections = self.ctx.collections();
        match target.kind.contract_type() {
            ContractType::Erc721 => collections
                .erc721(&target.name)
                .map(|config| {
                    vec![
                        Link::public_mint(handle, config.public_mint_status),
                        Link::burn(handle, config.public_burn_status),
                    ]
                })
                .unwrap_or_default(),
            ContractType::Marketplace => collections
                .erc721_collections()
                .filter_map(|config| {
                    container.get(config.name()).map(|token| {
                        marketplace_entry(target.kind, handle, token, config.valid_for_sale)
                    })
                })
                .collect(),
            ContractType::Erc20 | ContractType::Utility => Vec::new(),
        }
    }

    /// Allow each selected token on the marketplace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegistryNotFound`] when the marketplace or a token is
    /// missing from the container, or the first link failure.
    pub async fn allow(
        &self,
        container: &ContractContainer,
        marketplace: &Target,
        tokens: &[Target],
    ) -> Result<LinkSummary> {
        let market = container.require(&marketplace.name)?;
        let handles = tokens
            .iter()
            .map(|token| container.require(&token.name))
            .collect::<Result<Vec<_>>>()?;

        let linker = self.ctx.linker();
        let mut summary = LinkSummary::default();
        for token in handles {
            let outcome = match marketplace.kind {
                ContractKind::MarketplaceErc721EscrowV1 => {
                    linker.set_allowed_contract(market, token, true).await?
                }
                _ => linker.set_vendor_status(market, token, true).await?,
            };
            summary.record(&outcome);
        }
        Ok(summary)
    }
}

fn dedup(kinds: &[ContractKind]) -> Vec<ContractKind> {
    let mut seen = BTreeSet::new();
    kinds.iter().copied().filter(|kind| seen.insert(*kind)).collect()
}

fn target(kind: ContractKind, collections: &CollectionConfig) -> Result<Target> {
    let name = collections
        .record_name(kind)
        .ok_or_else(|| Error::Validation(format!("no collection config for {kind}")))?;
    Ok(Target {
        kind,
        name: name.to_string(),
    })
}

fn targets(kinds: &[ContractKind], collections: &CollectionConfig) -> Result<Vec<Target>> {
    dedup(kinds)
        .into_iter()
        .map(|kind| target(kind, collections))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::collections;

    #[test]
    fn deploy_plans_are_deduplicated_and_ranked() {
        let request = RunRequest {
            deploy: vec![
                ContractKind::MarketplaceErc721EscrowV1,
                ContractKind::ClancyErc721,
                ContractKind::MarketplaceErc721EscrowV1,
                ContractKind::ClancyErc20,
            ],
            ..RunRequest::default()
        };
        let plan = RunPlan::resolve(
            &request,
            &collections(),
            ContractKind::MarketplaceErc721EscrowV1,
        )
        .unwrap();

        let kinds: Vec<_> = plan.deploy.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ContractKind::ClancyErc721,
                ContractKind::ClancyErc20,
                ContractKind::MarketplaceErc721EscrowV1,
            ]
        );
    }

    #[test]
    fn targets_use_record_names() {
        let request = RunRequest {
            coordinate: vec![ContractKind::ClancyErc721],
            marketplace: vec![ContractKind::ClancyErc721],
            ..RunRequest::default()
        };
        let plan = RunPlan::resolve(
            &request,
            &collections(),
            ContractKind::MarketplaceErc721EscrowV1,
        )
        .unwrap();

        assert_eq!(plan.coordinate[0].name, "Test");
        assert_eq!(plan.marketplace[0].name, "Test");
        assert_eq!(
            plan.allowance_target.unwrap().name,
            "MarketplaceERC721Escrow_v1"
        );
    }

    #[test]
    fn no_allowance_target_without_marketplace_stage() {
        let request = RunRequest {
            coordinate: vec![ContractKind::ClancyErc721],
            ..RunRequest::default()
        };
        let plan = RunPlan::resolve(
            &request,
            &collections(),
            ContractKind::MarketplaceErc721EscrowV1,
        )
        .unwrap();
        assert!(plan.allowance_target.is_none());
    }

    #[test]
    fn marketplace_stage_rejects_marketplaces() {
        let request = RunRequest {
            marketplace: vec![ContractKind::EscrowErc721],
            ..RunRequest::default()
        };
        let err = RunPlan::resolve(
            &request,
            &collections(),
            ContractKind::MarketplaceErc721EscrowV1,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn unconfigured_kind_fails_validation() {
        let request = RunRequest {
            coordinate: vec![ContractKind::Reels],
            ..RunRequest::default()
        };
        let err = RunPlan::resolve(
            &request,
            &collections(),
            ContractKind::MarketplaceErc721EscrowV1,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
