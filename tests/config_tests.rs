//! The shipped example configuration files load and resolve.

use std::path::PathBuf;

use titan::domain::{Client, ContractKind, EnvTier};
use titan::infrastructure::config::collection::load_collections;
use titan::infrastructure::config::environment::resolve_environment_with;
use titan::infrastructure::config::settings::Config;

fn manifest_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(name)
}

fn example_config() -> Config {
    let content = std::fs::read_to_string(manifest_file("titan.example.toml")).unwrap();
    Config::parse_toml_with(&content, |_| None).unwrap()
}

#[test]
fn example_config_parses() {
    let config = example_config();

    assert_eq!(config.logging.format, "pretty");
    assert_eq!(config.network_name(), "polygon-amoy");
    assert_eq!(
        config.marketplace.contract,
        ContractKind::MarketplaceErc721EscrowV1
    );
    assert!(!config.database.read_only);
    assert!(config.network.deployment_key.is_none());
}

#[test]
fn example_collections_parse_and_validate() {
    let collections = load_collections(&manifest_file("collections.example.json")).unwrap();

    assert_eq!(collections.record_name(ContractKind::ClancyErc721), Some("Test"));
    assert_eq!(
        collections.record_name(ContractKind::MarketplaceErc721EscrowV1),
        Some("MarketplaceERC721Escrow_v1")
    );
    assert_eq!(collections.record_name(ContractKind::Reels), None);
    assert_eq!(collections.euroleague.erc.series1_cases.len(), 5);
}

#[test]
fn every_example_case_has_a_dev_token_id() {
    let config = example_config();
    let collections = load_collections(&manifest_file("collections.example.json")).unwrap();
    let environment = resolve_environment_with(Client::Euroleague, EnvTier::Dev, &config, |name| {
        (name == "DATABASE_URL_DEV_EUROLEAGUE").then(|| "sqlite://registry-dev.db".to_string())
    })
    .unwrap();

    for case in &collections.euroleague.erc.series1_cases {
        assert!(
            environment.token_id(case.name()).is_ok(),
            "no token id for {}",
            case.name()
        );
    }
    assert_eq!(environment.token_id("Clutch").unwrap(), 13);
}

#[test]
fn qa_environment_needs_its_own_database_variable() {
    let config = example_config();
    let err = resolve_environment_with(Client::Euroleague, EnvTier::Qa, &config, |name| {
        (name == "DATABASE_URL_DEV_EUROLEAGUE").then(|| "sqlite://registry-dev.db".to_string())
    })
    .unwrap_err();

    assert!(err.to_string().contains("DATABASE_URL_QA_EUROLEAGUE"));
}
