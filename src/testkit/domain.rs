//! Builders for domain values used across tests.
//!
//! The fixture collections mirror a small `collections.json`: a Clancy
//! ERC-721 named `Test`, an ERC-20 named `Coin` and the three
//! marketplaces, plus a separate Euroleague Series 1 setup.

use alloy_primitives::Address;

use crate::domain::collection::{
    ClancyConfig, ClancyErcConfig, Erc20Args, Erc20Config, Erc721Args, Erc721Config,
    EuroleagueConfig, EuroleagueErcConfig, MarketplaceConfig, NamedConfig,
};
use crate::domain::{
    ActiveEnvironment, Client, CollectionConfig, ContractHandle, EnvTier, TokenIds,
};
use crate::error::Result;

/// A handle whose address is `byte` repeated.
pub fn handle(name: &str, byte: u8) -> ContractHandle {
    ContractHandle::new(name, Address::repeat_byte(byte))
}

/// An ERC-721 collection with the given flags.
pub fn erc721(name: &str, valid_for_sale: bool, mint: bool, burn: bool) -> Erc721Config {
    Erc721Config {
        cargs: Erc721Args {
            name: name.to_string(),
            symbol: name.to_uppercase(),
            max_supply: 1000,
            uri: format!("ipfs://{}/", name.to_lowercase()),
        },
        valid_for_sale,
        public_mint_status: mint,
        public_burn_status: burn,
    }
}

fn named(name: &str) -> Option<NamedConfig> {
    Some(NamedConfig {
        name: name.to_string(),
    })
}

/// Clancy collections: `Test` (for sale, mint on, burn off), `Coin` and
/// every marketplace under its contract name.
pub fn collections() -> CollectionConfig {
    CollectionConfig {
        clancy: ClancyConfig {
            erc: ClancyErcConfig {
                clancy_erc721: Some(erc721("Test", true, true, false)),
                clancy_erc20: Some(Erc20Config {
                    cargs: Erc20Args {
                        name: "Coin".into(),
                        symbol: "COIN".into(),
                        initial_supply: 1_000_000,
                        cap: 10_000_000,
                    },
                }),
                clancy_erc20_airdrop: named("ClancyERC20Airdrop"),
            },
            marketplace: MarketplaceConfig {
                escrow: named("EscrowERC721"),
                escrow_v1: named("MarketplaceERC721Escrow_v1"),
                offers: named("OffersERC721"),
            },
        },
        euroleague: EuroleagueConfig::default(),
    }
}

/// Euroleague Series 1: Moments plus the `Clutch` and `Swishin` cases.
pub fn series1_collections() -> CollectionConfig {
    CollectionConfig {
        clancy: ClancyConfig::default(),
        euroleague: EuroleagueConfig {
            erc: EuroleagueErcConfig {
                moments: Some(erc721("Moments", false, true, false)),
                reels: None,
                series1_cases: vec![
                    erc721("Clutch", false, true, true),
                    erc721("Swishin", false, false, true),
                ],
            },
        },
    }
}

/// [`series1_collections`] with a Reels contract added.
pub fn series1_with_reels() -> CollectionConfig {
    let mut config = series1_collections();
    config.euroleague.erc.reels = Some(erc721("Reels", false, true, false));
    config
}

/// A Euroleague dev environment with the given token ids.
pub fn euroleague_dev(token_ids: TokenIds) -> Result<ActiveEnvironment> {
    ActiveEnvironment::new(Client::Euroleague, EnvTier::Dev, ":memory:", token_ids)
}
