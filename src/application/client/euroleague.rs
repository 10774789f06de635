//! Euroleague Series 1 collection deployment.
//!
//! Deploys Moments (and Reels when configured), then every Series 1 case,
//! and finally points the cases and the Moments/Reels contracts at each
//! other.

use tracing::info;

use crate::application::context::RunContext;
use crate::application::linker::{LinkSummary, Linker};
use crate::domain::collection::Erc721Config;
use crate::domain::{
    ActiveEnvironment, CollectionConfig, ContractHandle, ContractKind, DeployPlan,
};
use crate::error::{Error, Result};

/// One case together with its collection flags.
#[derive(Debug, Clone, PartialEq)]
pub struct CasePlan {
    pub plan: DeployPlan,
    pub config: Erc721Config,
}

/// Deploy plans for the whole Series 1 collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Series1Plan {
    pub moments: DeployPlan,
    pub reels: Option<DeployPlan>,
    pub cases: Vec<CasePlan>,
}

impl Series1Plan {
    /// Resolve plans, looking up each case's token id in the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when Moments or the cases are not
    /// configured, or when a case has no token id in this environment.
    pub fn resolve(
        collections: &CollectionConfig,
        environment: &ActiveEnvironment,
    ) -> Result<Self> {
        let moments = DeployPlan::resolve(ContractKind::Moments, collections)?;
        let reels = collections
            .euroleague
            .erc
            .reels
            .is_some()
            .then(|| DeployPlan::resolve(ContractKind::Reels, collections))
            .transpose()?;

        let configured = &collections.euroleague.erc.series1_cases;
        if configured.is_empty() {
            return Err(Error::Validation("no Series1Cases configured".into()));
        }
        let cases = configured
            .iter()
            .map(|config| {
                let token_id = environment.token_id(config.name())?;
                Ok(CasePlan {
                    plan: DeployPlan::series1_case(config, token_id),
                    config: config.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            moments,
            reels,
            cases,
        })
    }
}

/// Handles of everything the flow deployed.
#[derive(Debug, Clone, PartialEq)]
pub struct Series1Report {
    pub moments: ContractHandle,
    pub reels: Option<ContractHandle>,
    pub cases: Vec<ContractHandle>,
    pub links: LinkSummary,
}

/// Deploy and wire the Series 1 collection.
///
/// # Errors
///
/// Returns [`Error::ReadOnly`] up front for a read-only environment,
/// otherwise the first deployment or link failure.
pub async fn deploy_series1(ctx: &RunContext, plan: &Series1Plan) -> Result<Series1Report> {
    ctx.ensure_writable()?;
    let deployer = ctx.deployer();
    let linker = ctx.linker();
    let mut links = LinkSummary::default();

    let moments = deployer.deploy(&plan.moments).await?;
    links.record(&linker.set_public_mint(&moments, true).await?);

    let reels = match &plan.reels {
        Some(reels_plan) => {
            let reels = deployer.deploy(reels_plan).await?;
            links.record(&linker.set_public_mint(&reels, true).await?);
            Some(reels)
        }
        None => None,
    };

    let mut cases = Vec::with_capacity(plan.cases.len());
    for case in &plan.cases {
        let handle = deployer.deploy(&case.plan).await?;
        let flags = &case.config;
        links.record(&linker.set_public_mint(&handle, flags.public_mint_status).await?);
        links.record(&linker.set_burn(&handle, flags.public_burn_status).await?);
        cases.push(handle);
    }

    for case in &cases {
        links.absorb(link_case(&linker, case, &moments, reels.as_ref()).await?);
    }

    info!(
        component = "euroleague",
        method = "deploy_series1",
        cases = cases.len(),
        reels = reels.is_some(),
        applied = links.applied,
        already_set = links.already_set,
        "Series 1 deployed"
    );
    Ok(Series1Report {
        moments,
        reels,
        cases,
        links,
    })
}

/// Point `case` at Moments (and Reels) and flag it on each of them.
///
/// # Errors
///
/// Returns the first link failure.
pub async fn link_case(
    linker: &Linker,
    case: &ContractHandle,
    moments: &ContractHandle,
    reels: Option<&ContractHandle>,
) -> Result<LinkSummary> {
    let mut links = LinkSummary::default();
    links.record(&linker.set_moments_contract(case, moments).await?);
    links.record(&linker.set_case_contract(moments, case, true).await?);
    if let Some(reels) = reels {
        links.record(&linker.set_reels_contract(case, reels).await?);
        links.record(&linker.set_case_contract(reels, case, true).await?);
    }
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::{Client, EnvTier, Setting, TokenIds};
    use crate::port::ChainClient;
    use crate::testkit::chain::MockChainClient;
    use crate::testkit::domain::{handle, series1_collections};

    fn environment(ids: TokenIds) -> ActiveEnvironment {
        ActiveEnvironment::new(Client::Euroleague, EnvTier::Dev, "sqlite::memory:", ids).unwrap()
    }

    #[test]
    fn cases_take_token_ids_from_environment() {
        let env = environment(TokenIds::from([("CLUTCH", 13), ("SWISHIN", 12)]));
        let plan = Series1Plan::resolve(&series1_collections(), &env).unwrap();

        assert_eq!(plan.moments.record_name, "Moments");
        assert_eq!(plan.moments.artifact.subpath, "Series1/Series1/");
        assert!(plan.reels.is_none());
        let ids: Vec<_> = plan
            .cases
            .iter()
            .map(|c| (c.plan.record_name.as_str(), c.plan.external_token_id))
            .collect();
        assert_eq!(ids, vec![("Clutch", 13), ("Swishin", 12)]);
        assert_eq!(plan.cases[0].plan.artifact.to_string(), "Series1/Series1/Clutch");
    }

    #[test]
    fn missing_case_token_id_fails() {
        let env = environment(TokenIds::from([("CLUTCH", 13)]));
        let err = Series1Plan::resolve(&series1_collections(), &env).unwrap_err();
        assert!(matches!(err, Error::Validation(msg) if msg.contains("Swishin")));
    }

    #[tokio::test]
    async fn case_is_linked_both_ways() {
        let chain = Arc::new(MockChainClient::new());
        let linker = Linker::new(Arc::clone(&chain) as Arc<dyn ChainClient>);
        let case = handle("Clutch", 1);
        let moments = handle("Moments", 2);
        let reels = handle("Reels", 3);

        let summary = link_case(&linker, &case, &moments, Some(&reels)).await.unwrap();

        let writes: Vec<_> = chain.writes().iter().map(|w| (w.contract, w.setting)).collect();
        assert_eq!(
            writes,
            vec![
                (case.address, Setting::MomentsContract),
                (moments.address, Setting::CaseContract(case.address)),
                (case.address, Setting::ReelsContract),
                (reels.address, Setting::CaseContract(case.address)),
            ]
        );
        assert_eq!(summary.applied, 4);
    }

    #[tokio::test]
    async fn case_without_reels_gets_two_links() {
        let chain = Arc::new(MockChainClient::new());
        let linker = Linker::new(Arc::clone(&chain) as Arc<dyn ChainClient>);

        let summary = link_case(&linker, &handle("Clutch", 1), &handle("Moments", 2), None)
            .await
            .unwrap();

        assert_eq!(summary.total(), 2);
        assert_eq!(chain.writes().len(), 2);
    }
}
