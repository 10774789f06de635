//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - Driving side: the command line
//! - [`outbound`] - Driven side: artifacts, the chain and the registry

pub mod inbound;
pub mod outbound;
