//! SQLite persistence adapters.
//!
//! Provides the SQLite-backed contract registry using Diesel ORM.

pub mod database;
pub mod registry;

pub use registry::SqliteContractRegistry;
