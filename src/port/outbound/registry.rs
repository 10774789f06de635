//! Contract registry port.

use async_trait::async_trait;

use crate::domain::{ContractRecord, NewContractRecord};
use crate::error::{Error, Result};

/// Persistent store of deployed contracts keyed by contract name.
#[async_trait]
pub trait ContractRegistry: Send + Sync {
    /// Insert a record, or replace the existing record with the same name.
    ///
    /// Returns the stored row. `created_at` and `id` survive a replace.
    async fn upsert(&self, record: &NewContractRecord) -> Result<ContractRecord>;

    /// Look up a record by name.
    async fn find(&self, name: &str) -> Result<Option<ContractRecord>>;

    /// All records ordered by id.
    async fn list(&self) -> Result<Vec<ContractRecord>>;

    /// Delete every contract record and restart the id sequence.
    async fn reset(&self) -> Result<usize>;

    /// Delete every token row and restart its id sequence.
    async fn reset_tokens(&self) -> Result<usize>;

    /// Look up a record by name, failing when it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegistryNotFound`] when no record has that name.
    async fn get(&self, name: &str) -> Result<ContractRecord> {
        self.find(name).await?.ok_or_else(|| Error::RegistryNotFound {
            name: name.to_string(),
        })
    }

    /// All records, failing when there are none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegistryEmpty`] when the registry holds no records.
    async fn get_all(&self) -> Result<Vec<ContractRecord>> {
        let records = self.list().await?;
        if records.is_empty() {
            return Err(Error::RegistryEmpty);
        }
        Ok(records)
    }
}
