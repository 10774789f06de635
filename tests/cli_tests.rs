//! CLI integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `titan` run from `dir` with a clean environment.
fn titan(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("titan");
    cmd.current_dir(dir).env_clear().env("RUST_LOG", "error");
    cmd
}

fn example_collections() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("collections.example.json")
}

#[test]
fn help_lists_stage_flags() {
    let dir = TempDir::new().unwrap();
    titan(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--deploy"))
        .stdout(predicate::str::contains("--coordinate"))
        .stdout(predicate::str::contains("--marketplace"))
        .stdout(predicate::str::contains("--client"));
}

#[test]
fn unknown_contract_is_rejected_while_parsing() {
    let dir = TempDir::new().unwrap();
    titan(dir.path())
        .env("RPC_URL", "http://127.0.0.1:1")
        .env("DEPLOYMENT_KEY", "0x01")
        .args(["--deploy", "ClancyERC1155"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ClancyERC1155"));
}

#[test]
fn client_conflicts_with_deploy() {
    let dir = TempDir::new().unwrap();
    titan(dir.path())
        .args(["--client", "euroleague", "--deploy", "Moments"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn no_flags_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    titan(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to do"));
}

#[test]
fn missing_database_variable_is_reported() {
    let dir = TempDir::new().unwrap();
    titan(dir.path())
        .args(["--deploy", "ClancyERC721", "--collections"])
        .arg(example_collections())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("DATABASE_URL_DEV_EUROLEAGUE"));
}

#[test]
fn missing_deployment_key_is_reported_before_connecting() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("registry.db");
    titan(dir.path())
        .env("DATABASE_URL_DEV_EUROLEAGUE", &db)
        .env("RPC_URL", "http://127.0.0.1:8545")
        .args(["--deploy", "ClancyERC721", "--collections"])
        .arg(example_collections())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("DEPLOYMENT_KEY"));
}

#[test]
fn unsupported_environment_is_rejected() {
    let dir = TempDir::new().unwrap();
    titan(dir.path())
        .env("DATABASE_URL_PROD_EUROLEAGUE", dir.path().join("registry.db"))
        .args(["--deploy", "ClancyERC721", "--client_env", "prod", "--collections"])
        .arg(example_collections())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no prod environment"));
}

#[test]
fn list_on_fresh_registry_reports_empty() {
    let dir = TempDir::new().unwrap();
    titan(dir.path())
        .env("DATABASE_URL_DEV_EUROLEAGUE", dir.path().join("registry.db"))
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Registry is empty"));
}

#[test]
fn reset_with_yes_skips_the_prompt() {
    let dir = TempDir::new().unwrap();
    titan(dir.path())
        .env("DATABASE_URL_DEV_EUROLEAGUE", dir.path().join("registry.db"))
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 0 rows from contracts"));
}

#[test]
fn reset_is_refused_on_read_only_registry() {
    let dir = TempDir::new().unwrap();
    titan(dir.path())
        .env("DATABASE_URL_DEV_EUROLEAGUE", dir.path().join("registry.db"))
        .env("TITAN_DATABASE_READONLY", "1")
        .args(["reset", "tokens", "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("read only"));
}

#[test]
fn benfica_reports_joined_orders() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data/benfica");
    fs::create_dir_all(&data).unwrap();
    fs::write(
        data.join("packs.json"),
        r#"{"packs": [{"pack_id": 1, "order_rid": 5}, {"pack_id": 2}]}"#,
    )
    .unwrap();
    fs::write(
        data.join("order_details.json"),
        r#"{"order_details": [
            {"order_id": 5, "tx_status": "COMPLETE"},
            {"order_id": 6, "tx_status": "COMPLETE"},
            {"order_id": 7, "tx_status": "CANCELLED"}
        ]}"#,
    )
    .unwrap();

    titan(dir.path())
        .args(["--client", "benfica"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Benfica lift and shift"))
        .stdout(predicate::str::contains("Lift and shift complete"));
}

#[test]
fn benfica_without_exports_fails() {
    let dir = TempDir::new().unwrap();
    titan(dir.path())
        .args(["--client", "benfica"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn benfica_rejects_non_prod_environment() {
    let dir = TempDir::new().unwrap();
    titan(dir.path())
        .args(["--client", "benfica", "--client_env", "dev"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no dev environment"))
        .stdout(predicate::str::contains("Lift and shift complete").not());
}

#[test]
fn benfica_rejects_marketplace_allowances() {
    let dir = TempDir::new().unwrap();
    titan(dir.path())
        .args(["--client", "benfica", "-m", "ClancyERC721"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--marketplace cannot be combined"))
        .stdout(predicate::str::contains("Lift and shift complete").not());
}
