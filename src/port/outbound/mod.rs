//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These describe the artifact store, the contract registry and the chain.

pub mod artifact;
pub mod chain;
pub mod registry;
