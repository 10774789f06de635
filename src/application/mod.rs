//! Application services.
//!
//! Drives deployments through the outbound ports:
//!
//! - [`context`] - Per-run context (environment, config, adapters)
//! - [`deployer`] - Deploy one contract and record it
//! - [`linker`] - Read-then-write cross-contract settings
//! - [`orchestrator`] - Rehydrate, deploy, coordinate and allow stages
//! - [`client`] - Client-specific flows

pub mod client;
pub mod context;
pub mod deployer;
pub mod linker;
pub mod orchestrator;

pub use context::RunContext;
pub use deployer::Deployer;
pub use linker::{LinkSummary, Linker};
pub use orchestrator::{Orchestrator, RunPlan, RunReport, RunRequest};
