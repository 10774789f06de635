//! Static collection configuration.
//!
//! Section and field names mirror the collection file, so the serde renames
//! below are the file format.

use serde::Deserialize;

use crate::domain::contract::{ContractKind, ContractType};
use crate::error::{Error, Result};

/// Root of the collection file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CollectionConfig {
    #[serde(rename = "Clancy", default)]
    pub clancy: ClancyConfig,
    #[serde(rename = "Euroleague", default)]
    pub euroleague: EuroleagueConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClancyConfig {
    #[serde(rename = "ERC", default)]
    pub erc: ClancyErcConfig,
    #[serde(rename = "Marketplace", default)]
    pub marketplace: MarketplaceConfig,
}

/// `Clancy.ERC`.
///
/// ERC-20 sections are read either flat (`ClancyERC20`, `ClancyERC20Airdrop`)
/// or nested (`ERC20.ClancyERC20`, `ERC20.Utils.ClancyERC20Airdrop`). A flat
/// section wins when both are present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawClancyErcConfig")]
pub struct ClancyErcConfig {
    pub clancy_erc721: Option<Erc721Config>,
    pub clancy_erc20: Option<Erc20Config>,
    pub clancy_erc20_airdrop: Option<NamedConfig>,
}

#[derive(Deserialize)]
struct RawClancyErcConfig {
    #[serde(rename = "ClancyERC721")]
    clancy_erc721: Option<Erc721Config>,
    #[serde(rename = "ClancyERC20")]
    clancy_erc20: Option<Erc20Config>,
    #[serde(rename = "ClancyERC20Airdrop")]
    clancy_erc20_airdrop: Option<NamedConfig>,
    #[serde(rename = "ERC20", default)]
    erc20: Erc20Section,
}

#[derive(Default, Deserialize)]
struct Erc20Section {
    #[serde(rename = "ClancyERC20")]
    clancy_erc20: Option<Erc20Config>,
    #[serde(rename = "Utils", default)]
    utils: Erc20Utils,
}

#[derive(Default, Deserialize)]
struct Erc20Utils {
    #[serde(rename = "ClancyERC20Airdrop")]
    clancy_erc20_airdrop: Option<NamedConfig>,
}

impl From<RawClancyErcConfig> for ClancyErcConfig {
    fn from(raw: RawClancyErcConfig) -> Self {
        Self {
            clancy_erc721: raw.clancy_erc721,
            clancy_erc20: raw.clancy_erc20.or(raw.erc20.clancy_erc20),
            clancy_erc20_airdrop: raw
                .clancy_erc20_airdrop
                .or(raw.erc20.utils.clancy_erc20_airdrop),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MarketplaceConfig {
    #[serde(rename = "Escrow")]
    pub escrow: Option<NamedConfig>,
    #[serde(rename = "EscrowV1")]
    pub escrow_v1: Option<NamedConfig>,
    #[serde(rename = "Offers")]
    pub offers: Option<NamedConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EuroleagueConfig {
    #[serde(rename = "ERC", default)]
    pub erc: EuroleagueErcConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EuroleagueErcConfig {
    #[serde(rename = "Moments")]
    pub moments: Option<Erc721Config>,
    #[serde(rename = "Reels")]
    pub reels: Option<Erc721Config>,
    #[serde(rename = "Series1Cases", default)]
    pub series1_cases: Vec<Erc721Config>,
}

/// An ERC-721 collection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Erc721Config {
    pub cargs: Erc721Args,
    #[serde(rename = "validForSale", default)]
    pub valid_for_sale: bool,
    #[serde(rename = "publicMintStatus", default)]
    pub public_mint_status: bool,
    #[serde(rename = "publicBurnStatus", default)]
    pub public_burn_status: bool,
}

impl Erc721Config {
    /// Registry name of the collection.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.cargs.name
    }
}

/// ERC-721 constructor arguments, in constructor order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Erc721Args {
    pub name: String,
    pub symbol: String,
    pub max_supply: u64,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Erc20Config {
    pub cargs: Erc20Args,
}

/// ERC-20 constructor arguments, in constructor order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Erc20Args {
    pub name: String,
    pub symbol: String,
    pub initial_supply: u64,
    pub cap: u64,
}

/// A contract configured only by its registry name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamedConfig {
    pub name: String,
}

impl CollectionConfig {
    /// Every configured ERC-721 collection, Clancy first, then Euroleague.
    pub fn erc721_collections(&self) -> impl Iterator<Item = &Erc721Config> {
        self.clancy
            .erc
            .clancy_erc721
            .iter()
            .chain(self.euroleague.erc.moments.iter())
            .chain(self.euroleague.erc.reels.iter())
            .chain(self.euroleague.erc.series1_cases.iter())
    }

    /// ERC-721 collection registered under `name`.
    #[must_use]
    pub fn erc721(&self, name: &str) -> Option<&Erc721Config> {
        self.erc721_collections().find(|c| c.name() == name)
    }

    /// Configured section for a marketplace kind.
    #[must_use]
    pub fn marketplace(&self, kind: ContractKind) -> Option<&NamedConfig> {
        let market = &self.clancy.marketplace;
        match kind {
            ContractKind::MarketplaceErc721EscrowV1 => market.escrow_v1.as_ref(),
            ContractKind::EscrowErc721 => market.escrow.as_ref(),
            ContractKind::OffersErc721 => market.offers.as_ref(),
            _ => None,
        }
    }

    /// Registry name configured for a contract kind, if its section exists.
    #[must_use]
    pub fn record_name(&self, kind: ContractKind) -> Option<&str> {
        let erc = &self.clancy.erc;
        match kind {
            ContractKind::ClancyErc721 => erc.clancy_erc721.as_ref().map(Erc721Config::name),
            ContractKind::ClancyErc20 => erc.clancy_erc20.as_ref().map(|c| c.cargs.name.as_str()),
            ContractKind::ClancyErc20Airdrop => {
                erc.clancy_erc20_airdrop.as_ref().map(|c| c.name.as_str())
            }
            ContractKind::Moments => self.euroleague.erc.moments.as_ref().map(Erc721Config::name),
            ContractKind::Reels => self.euroleague.erc.reels.as_ref().map(Erc721Config::name),
            ContractKind::MarketplaceErc721EscrowV1
            | ContractKind::EscrowErc721
            | ContractKind::OffersErc721 => self.marketplace(kind).map(|c| c.name.as_str()),
        }
    }

    /// Reject empty names and duplicate registry names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the offending entry.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::BTreeSet::new();
        // ERC-721 sections are covered by erc721_collections.
        let names = ContractKind::ALL
            .into_iter()
            .filter(|kind| kind.contract_type() != ContractType::Erc721)
            .filter_map(|kind| self.record_name(kind))
            .chain(self.erc721_collections().map(Erc721Config::name));

        for name in names {
            if name.trim().is_empty() {
                return Err(Error::Validation(
                    "collection config contains an empty name".into(),
                ));
            }
            if !seen.insert(name) {
                return Err(Error::Validation(format!(
                    "collection name {name} is configured more than once"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn erc721(name: &str, valid_for_sale: bool) -> serde_json::Value {
        json!({
            "cargs": {"name": name, "symbol": "SYM", "max_supply": 100, "uri": "ipfs://x/"},
            "validForSale": valid_for_sale,
            "publicMintStatus": true,
            "publicBurnStatus": false
        })
    }

    fn sample() -> CollectionConfig {
        serde_json::from_value(json!({
            "Clancy": {
                "ERC": {
                    "ClancyERC721": erc721("Test", true),
                    "ClancyERC20": {"cargs": {"name": "Clancy", "symbol": "CLC", "initial_supply": 1000, "cap": 5000}}
                },
                "Marketplace": {"EscrowV1": {"name": "MarketplaceERC721Escrow_v1"}}
            },
            "Euroleague": {
                "ERC": {
                    "Moments": erc721("Moments", false),
                    "Series1Cases": [erc721("Clutch", true), erc721("Swishin", false)]
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn parses_camel_case_flags() {
        let config = sample();
        let test = config.erc721("Test").unwrap();
        assert!(test.valid_for_sale);
        assert!(test.public_mint_status);
        assert!(!test.public_burn_status);
        assert_eq!(test.cargs.max_supply, 100);
    }

    #[test]
    fn iterates_every_erc721_collection() {
        let config = sample();
        let names: Vec<&str> = config.erc721_collections().map(Erc721Config::name).collect();
        assert_eq!(names, ["Test", "Moments", "Clutch", "Swishin"]);
    }

    #[test]
    fn record_names_follow_sections() {
        let config = sample();
        assert_eq!(config.record_name(ContractKind::ClancyErc721), Some("Test"));
        assert_eq!(config.record_name(ContractKind::ClancyErc20), Some("Clancy"));
        assert_eq!(
            config.record_name(ContractKind::MarketplaceErc721EscrowV1),
            Some("MarketplaceERC721Escrow_v1")
        );
        assert_eq!(config.record_name(ContractKind::OffersErc721), None);
        assert_eq!(config.record_name(ContractKind::Reels), None);
    }

    #[test]
    fn nested_erc20_sections_are_read() {
        let config: CollectionConfig = serde_json::from_value(json!({
            "Clancy": {
                "ERC": {
                    "ERC20": {
                        "ClancyERC20": {"cargs": {"name": "Coin", "symbol": "C", "initial_supply": 1, "cap": 2}},
                        "Utils": {"ClancyERC20Airdrop": {"name": "Airdrop"}}
                    }
                }
            }
        }))
        .unwrap();

        assert_eq!(config.record_name(ContractKind::ClancyErc20), Some("Coin"));
        assert_eq!(config.record_name(ContractKind::ClancyErc20Airdrop), Some("Airdrop"));
    }

    #[test]
    fn flat_erc20_section_wins_over_nested() {
        let config: CollectionConfig = serde_json::from_value(json!({
            "Clancy": {
                "ERC": {
                    "ClancyERC20Airdrop": {"name": "Flat"},
                    "ERC20": {"Utils": {"ClancyERC20Airdrop": {"name": "Nested"}}}
                }
            }
        }))
        .unwrap();

        assert_eq!(config.record_name(ContractKind::ClancyErc20Airdrop), Some("Flat"));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let config: CollectionConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(config.erc721_collections().count(), 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_names() {
        let mut config = sample();
        config.euroleague.erc.series1_cases[1].cargs.name = "Clutch".into();
        assert!(matches!(config.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn validate_accepts_sample() {
        assert!(sample().validate().is_ok());
    }
}
