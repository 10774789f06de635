//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`chain`] - [`MockChainClient`](chain::MockChainClient), an in-memory
//!   chain that records deployments and setting writes.
//! - [`registry`] - In-memory SQLite registries with migrations applied.
//! - [`artifact`] - [`MemoryArtifactResolver`](artifact::MemoryArtifactResolver).
//! - [`domain`] - Builders for handles, collections and environments.

pub mod artifact;
pub mod chain;
pub mod domain;
pub mod registry;
