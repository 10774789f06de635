//! SQLite contract registry implementation.
//!
//! Persists deployed contracts using SQLite and Diesel ORM, keyed by the
//! unique contract name.

use std::str::FromStr;

use alloy_primitives::Address;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use tracing::{debug, info, warn};

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    ContractChangeset, ContractRow, NewContractRow,
};
use crate::adapter::outbound::sqlite::database::schema::{contracts, tokens};
use crate::domain::{ContractRecord, ContractType, NewContractRecord};
use crate::error::{Error, Result};
use crate::port::ContractRegistry;

/// SQLite-backed contract registry.
///
/// When opened read-only every write fails with [`Error::ReadOnly`] before
/// touching the database.
pub struct SqliteContractRegistry {
    /// Database connection pool.
    pool: DbPool,
    read_only: bool,
}

impl SqliteContractRegistry {
    /// Create a writable registry over the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            read_only: false,
        }
    }

    #[must_use]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }

    fn ensure_writable(&self, method: &'static str) -> Result<()> {
        if self.read_only {
            warn!(
                component = "registry",
                method,
                "Database is read only, refusing write"
            );
            return Err(Error::ReadOnly);
        }
        Ok(())
    }

    fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
        Ok(DateTime::parse_from_rfc3339(value)
            .map_err(|e| Error::Parse(e.to_string()))?
            .with_timezone(&Utc))
    }

    fn from_row(row: ContractRow) -> Result<ContractRecord> {
        let contract_address = Address::from_str(&row.contract_address)
            .map_err(|e| Error::Parse(format!("{}: {e}", row.contract_name)))?;
        let contract_type = ContractType::from_str(&row.contract_type)?;

        Ok(ContractRecord {
            id: row.id,
            contract_address,
            contract_type,
            external_token_id: row.external_token_id,
            created_at: Self::parse_timestamp(&row.created_at)?,
            updated_at: Self::parse_timestamp(&row.updated_at)?,
            contract_artifact: row.contract_artifact,
            contract_name: row.contract_name,
        })
    }

    /// Run `delete` and restart the table's AUTOINCREMENT counter, atomically.
    fn truncate<F>(&self, name: &'static str, delete: F) -> Result<usize>
    where
        F: FnOnce(&mut SqliteConnection) -> QueryResult<usize>,
    {
        let mut conn = self.conn()?;
        let deleted = conn
            .transaction(|conn| {
                let deleted = delete(conn)?;
                diesel::sql_query("DELETE FROM sqlite_sequence WHERE name = ?")
                    .bind::<diesel::sql_types::Text, _>(name)
                    .execute(conn)?;
                Ok::<_, diesel::result::Error>(deleted)
            })
            .map_err(|e| Error::Database(e.to_string()))?;

        info!(
            component = "registry",
            method = "reset",
            table = name,
            deleted,
            "Table emptied and identity restarted"
        );
        Ok(deleted)
    }
}

#[async_trait]
impl ContractRegistry for SqliteContractRegistry {
    async fn upsert(&self, record: &NewContractRecord) -> Result<ContractRecord> {
        self.ensure_writable("upsert")?;

        let now = Utc::now().to_rfc3339();
        let address = record.contract_address.to_string();
        let row = NewContractRow {
            contract_name: record.contract_name.clone(),
            contract_address: address.clone(),
            contract_artifact: record.contract_artifact.clone(),
            external_token_id: record.external_token_id,
            contract_type: record.contract_type.to_string(),
            created_at: now.clone(),
            updated_at: now.clone(),
        };
        let changes = ContractChangeset {
            contract_address: address,
            contract_artifact: record.contract_artifact.clone(),
            external_token_id: record.external_token_id,
            contract_type: record.contract_type.to_string(),
            updated_at: now,
        };

        let mut conn = self.conn()?;
        let stored: ContractRow = conn
            .transaction(|conn| {
                diesel::insert_into(contracts::table)
                    .values(&row)
                    .on_conflict(contracts::contract_name)
                    .do_update()
                    .set(&changes)
                    .execute(conn)?;

                contracts::table
                    .filter(contracts::contract_name.eq(&record.contract_name))
                    .select(ContractRow::as_select())
                    .first(conn)
            })
            .map_err(|e| Error::Database(e.to_string()))?;

        debug!(
            component = "registry",
            method = "upsert",
            contract = %stored.contract_name,
            address = %stored.contract_address,
            id = stored.id,
            "Contract upserted"
        );
        Self::from_row(stored)
    }

    async fn find(&self, name: &str) -> Result<Option<ContractRecord>> {
        let mut conn = self.conn()?;

        let row: Option<ContractRow> = contracts::table
            .filter(contracts::contract_name.eq(name))
            .select(ContractRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(Self::from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<ContractRecord>> {
        let mut conn = self.conn()?;

        let rows: Vec<ContractRow> = contracts::table
            .order(contracts::id.asc())
            .select(ContractRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn reset(&self) -> Result<usize> {
        self.ensure_writable("reset")?;
        self.truncate("contracts", |conn| diesel::delete(contracts::table).execute(conn))
    }

    async fn reset_tokens(&self) -> Result<usize> {
        self.ensure_writable("reset_tokens")?;
        self.truncate("tokens", |conn| diesel::delete(tokens::table).execute(conn))
    }
}
