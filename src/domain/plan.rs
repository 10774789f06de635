//! Deploy plans resolved from contract kinds and collection config.

use std::fmt;

use alloy_primitives::{Bytes, U256};
use alloy_sol_types::SolValue;

use crate::domain::collection::{CollectionConfig, Erc20Args, Erc721Args, Erc721Config};
use crate::domain::contract::{ContractKind, ContractType};
use crate::error::{Error, Result};

/// Token id stored for contracts without a commerce-backend product.
pub const NO_EXTERNAL_TOKEN: i64 = 0;

/// Where an artifact lives under the project's `out/` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocation {
    pub name: String,
    /// Prefix inside `out/`, empty or ending in `/`.
    pub subpath: String,
}

impl ArtifactLocation {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subpath: String::new(),
        }
    }

    #[must_use]
    pub fn with_subpath(mut self, subpath: impl Into<String>) -> Self {
        self.subpath = subpath.into();
        self
    }
}

impl fmt::Display for ArtifactLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.subpath, self.name)
    }
}

/// Constructor arguments, kept typed until submission.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructorArgs {
    None,
    Erc721(Erc721Args),
    Erc20(Erc20Args),
}

impl ConstructorArgs {
    /// ABI-encode the arguments for appending to creation bytecode.
    #[must_use]
    pub fn encode(&self) -> Bytes {
        match self {
            ConstructorArgs::None => Bytes::new(),
            ConstructorArgs::Erc721(args) => (
                args.name.clone(),
                args.symbol.clone(),
                U256::from(args.max_supply),
                args.uri.clone(),
            )
                .abi_encode_params()
                .into(),
            ConstructorArgs::Erc20(args) => (
                args.name.clone(),
                args.symbol.clone(),
                U256::from(args.initial_supply),
                U256::from(args.cap),
            )
                .abi_encode_params()
                .into(),
        }
    }
}

/// Everything needed to deploy and record one contract.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployPlan {
    pub kind: ContractKind,
    /// Registry key, also the container key.
    pub record_name: String,
    pub artifact: ArtifactLocation,
    pub constructor_args: ConstructorArgs,
    pub external_token_id: i64,
    pub contract_type: ContractType,
}

impl DeployPlan {
    /// Resolve the plan for a CLI-selectable contract kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the kind's collection section is
    /// missing.
    pub fn resolve(kind: ContractKind, config: &CollectionConfig) -> Result<Self> {
        let missing = || Error::Validation(format!("no collection config for {kind}"));
        let erc = &config.clancy.erc;
        let series1 = &config.euroleague.erc;

        let plan = match kind {
            ContractKind::ClancyErc721 => {
                let collection = erc.clancy_erc721.as_ref().ok_or_else(missing)?;
                Self::erc721(kind, collection, ArtifactLocation::new(kind.as_str()))
            }
            ContractKind::ClancyErc20 => {
                let collection = erc.clancy_erc20.as_ref().ok_or_else(missing)?;
                Self::fixed(
                    kind,
                    collection.cargs.name.clone(),
                    ConstructorArgs::Erc20(collection.cargs.clone()),
                )
            }
            ContractKind::ClancyErc20Airdrop => {
                let named = erc.clancy_erc20_airdrop.as_ref().ok_or_else(missing)?;
                Self::fixed(kind, named.name.clone(), ConstructorArgs::None)
            }
            ContractKind::MarketplaceErc721EscrowV1
            | ContractKind::EscrowErc721
            | ContractKind::OffersErc721 => {
                let named = config.marketplace(kind).ok_or_else(missing)?;
                Self::fixed(kind, named.name.clone(), ConstructorArgs::None)
            }
            ContractKind::Moments => {
                let collection = series1.moments.as_ref().ok_or_else(missing)?;
                Self::erc721(
                    kind,
                    collection,
                    ArtifactLocation::new(kind.as_str()).with_subpath("Series1/Series1/"),
                )
            }
            ContractKind::Reels => {
                let collection = series1.reels.as_ref().ok_or_else(missing)?;
                Self::erc721(
                    kind,
                    collection,
                    ArtifactLocation::new(kind.as_str()).with_subpath("Series1/"),
                )
            }
        };
        Ok(plan)
    }

    /// Plan for one Series 1 case; each case has its own artifact.
    #[must_use]
    pub fn series1_case(collection: &Erc721Config, external_token_id: i64) -> Self {
        let artifact = ArtifactLocation::new(collection.name()).with_subpath("Series1/Series1/");
        let mut plan = Self::erc721(ContractKind::ClancyErc721, collection, artifact);
        plan.external_token_id = external_token_id;
        plan
    }

    fn erc721(kind: ContractKind, collection: &Erc721Config, artifact: ArtifactLocation) -> Self {
        Self {
            kind,
            record_name: collection.name().to_string(),
            artifact,
            constructor_args: ConstructorArgs::Erc721(collection.cargs.clone()),
            external_token_id: NO_EXTERNAL_TOKEN,
            contract_type: ContractType::Erc721,
        }
    }

    fn fixed(kind: ContractKind, record_name: String, constructor_args: ConstructorArgs) -> Self {
        Self {
            kind,
            record_name,
            artifact: ArtifactLocation::new(kind.as_str()),
            constructor_args,
            external_token_id: NO_EXTERNAL_TOKEN,
            contract_type: kind.contract_type(),
        }
    }
}
