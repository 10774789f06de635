//! Outbound adapters (driven side).

pub mod artifact;
pub mod evm;
pub mod sqlite;
