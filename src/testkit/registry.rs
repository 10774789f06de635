//! In-memory registries.

use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use crate::adapter::outbound::sqlite::SqliteContractRegistry;
use crate::error::Result;

/// A writable SQLite registry in a private in-memory database.
pub fn memory_registry() -> Result<SqliteContractRegistry> {
    let pool = create_pool(":memory:")?;
    run_migrations(&pool)?;
    Ok(SqliteContractRegistry::new(pool))
}
