//! EVM chain adapter.
//!
//! Builds a signing alloy provider from the RPC endpoint and deployment key
//! and implements [`crate::port::ChainClient`] on top of it.

pub mod bindings;
pub mod client;

pub use client::{ChainSettings, EvmChainClient};
