//! Contract kinds, registry records and live handles.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Every contract the tool knows how to deploy.
///
/// The CLI accepts exactly these names; anything else is rejected before a
/// connection is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Deserialize)]
#[serde(try_from = "String")]
pub enum ContractKind {
    #[value(name = "ClancyERC721")]
    ClancyErc721,
    #[value(name = "ClancyERC20")]
    ClancyErc20,
    #[value(name = "ClancyERC20Airdrop")]
    ClancyErc20Airdrop,
    #[value(name = "MarketplaceERC721Escrow_v1")]
    MarketplaceErc721EscrowV1,
    #[value(name = "EscrowERC721")]
    EscrowErc721,
    #[value(name = "OffersERC721")]
    OffersErc721,
    #[value(name = "Moments")]
    Moments,
    #[value(name = "Reels")]
    Reels,
}

impl ContractKind {
    pub const ALL: [ContractKind; 8] = [
        ContractKind::ClancyErc721,
        ContractKind::ClancyErc20,
        ContractKind::ClancyErc20Airdrop,
        ContractKind::MarketplaceErc721EscrowV1,
        ContractKind::EscrowErc721,
        ContractKind::OffersErc721,
        ContractKind::Moments,
        ContractKind::Reels,
    ];

    /// Canonical name, also the artifact name for fixed-name contracts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ContractKind::ClancyErc721 => "ClancyERC721",
            ContractKind::ClancyErc20 => "ClancyERC20",
            ContractKind::ClancyErc20Airdrop => "ClancyERC20Airdrop",
            ContractKind::MarketplaceErc721EscrowV1 => "MarketplaceERC721Escrow_v1",
            ContractKind::EscrowErc721 => "EscrowERC721",
            ContractKind::OffersErc721 => "OffersERC721",
            ContractKind::Moments => "Moments",
            ContractKind::Reels => "Reels",
        }
    }

    /// Record type stored in the registry.
    #[must_use]
    pub const fn contract_type(self) -> ContractType {
        match self {
            ContractKind::ClancyErc721 | ContractKind::Moments | ContractKind::Reels => {
                ContractType::Erc721
            }
            ContractKind::ClancyErc20 => ContractType::Erc20,
            ContractKind::ClancyErc20Airdrop => ContractType::Utility,
            ContractKind::MarketplaceErc721EscrowV1
            | ContractKind::EscrowErc721
            | ContractKind::OffersErc721 => ContractType::Marketplace,
        }
    }

    /// Deployment rank. Lower ranks deploy first so marketplaces can
    /// reference the tokens deployed in the same run.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self.contract_type() {
            ContractType::Marketplace => 1,
            _ => 0,
        }
    }

    #[must_use]
    pub const fn is_marketplace(self) -> bool {
        matches!(self.contract_type(), ContractType::Marketplace)
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContractKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::Validation(format!("unknown contract {s}")))
    }
}

impl TryFrom<String> for ContractKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Registry tag describing what a record is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    Erc721,
    Erc20,
    Utility,
    Marketplace,
}

impl ContractType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ContractType::Erc721 => "erc721",
            ContractType::Erc20 => "erc20",
            ContractType::Utility => "utility",
            ContractType::Marketplace => "marketplace",
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "erc721" => Ok(ContractType::Erc721),
            "erc20" => Ok(ContractType::Erc20),
            "utility" => Ok(ContractType::Utility),
            "marketplace" => Ok(ContractType::Marketplace),
            other => Err(Error::Parse(format!("unknown contract type {other}"))),
        }
    }
}

/// A deployed contract as persisted in the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractRecord {
    pub id: i32,
    pub contract_name: String,
    pub contract_address: Address,
    /// Serialized artifact JSON (ABI and bytecode).
    pub contract_artifact: String,
    pub external_token_id: i64,
    pub contract_type: ContractType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContractRecord {
    #[must_use]
    pub fn handle(&self) -> ContractHandle {
        ContractHandle::new(self.contract_name.clone(), self.contract_address)
    }
}

/// Fields written by an upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContractRecord {
    pub contract_name: String,
    pub contract_address: Address,
    pub contract_artifact: String,
    pub external_token_id: i64,
    pub contract_type: ContractType,
}

/// A live contract the chain client can address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractHandle {
    pub name: String,
    pub address: Address,
}

impl ContractHandle {
    #[must_use]
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self {
            name: name.into(),
            address,
        }
    }
}

impl fmt::Display for ContractHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.address)
    }
}
