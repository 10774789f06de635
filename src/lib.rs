//! Titan - smart-contract collection deployment.
//!
//! Deploys ERC-721 / ERC-20 token contracts and marketplace escrows to an
//! EVM network, records every deployment in a contract registry, and wires
//! the deployed contracts together.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Contract kinds, records, collection config, deploy plans
//!   and links. No I/O.
//! - [`port`] - Traits for the artifact store, the chain and the registry.
//! - [`adapter`] - Foundry artifacts on disk, alloy for the chain, Diesel
//!   over SQLite for the registry, and the `clap` CLI.
//! - [`application`] - The deployer, the linker, the stage orchestrator and
//!   the client flows.
//! - [`infrastructure`] - Configuration and wiring.
//!
//! # Example
//!
//! ```no_run
//! use titan::application::{RunPlan, RunRequest};
//! use titan::domain::ContractKind;
//! use titan::infrastructure::config::collection::load_collections;
//!
//! fn main() -> titan::error::Result<()> {
//!     let collections = load_collections("collections.json".as_ref())?;
//!     let request = RunRequest {
//!         deploy: vec![ContractKind::ClancyErc721],
//!         ..RunRequest::default()
//!     };
//!     let plan = RunPlan::resolve(&request, &collections, ContractKind::MarketplaceErc721EscrowV1)?;
//!     assert_eq!(plan.deploy.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
