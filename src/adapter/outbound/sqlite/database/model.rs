//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::contracts;

/// Database row for a deployed contract (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = contracts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ContractRow {
    pub id: i32,
    pub contract_name: String,
    pub contract_address: String,
    pub contract_artifact: String,
    pub external_token_id: i64,
    pub contract_type: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Database row for a deployed contract (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = contracts)]
pub struct NewContractRow {
    pub contract_name: String,
    pub contract_address: String,
    pub contract_artifact: String,
    pub external_token_id: i64,
    pub contract_type: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Columns replaced when a contract is redeployed under the same name.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = contracts)]
pub struct ContractChangeset {
    pub contract_address: String,
    pub contract_artifact: String,
    pub external_token_id: i64,
    pub contract_type: String,
    pub updated_at: String,
}
