//! Handler for the `list` command.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::{selected_environment, Cli, ListArgs};
use crate::adapter::inbound::cli::output;
use crate::domain::ContractRecord;
use crate::error::Result;
use crate::infrastructure::bootstrap::open_registry;
use crate::infrastructure::config::environment::resolve_environment;
use crate::infrastructure::config::settings::Config;
use crate::port::ContractRegistry;

#[derive(Tabled)]
struct ContractRow {
    #[tabled(rename = "Id")]
    id: i32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Type")]
    contract_type: String,
    #[tabled(rename = "Token Id")]
    token_id: i64,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl From<&ContractRecord> for ContractRow {
    fn from(record: &ContractRecord) -> Self {
        Self {
            id: record.id,
            name: record.contract_name.clone(),
            address: record.contract_address.to_string(),
            contract_type: record.contract_type.to_string(),
            token_id: record.external_token_id,
            updated: record.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute the list command.
pub async fn execute(cli: &Cli, args: &ListArgs, config: &Config) -> Result<()> {
    let (client, tier) = selected_environment(args.client, cli.client_env);
    let environment = resolve_environment(client, tier, config)?;
    let registry = open_registry(&environment)?;
    let records = registry.list().await?;

    output::section(&format!("Contracts ({client} {tier})"));
    if records.is_empty() {
        output::note("Registry is empty");
        return Ok(());
    }

    println!("{}", render(&records));
    Ok(())
}

fn render(records: &[ContractRecord]) -> String {
    let rows: Vec<ContractRow> = records.iter().map(ContractRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use chrono::Utc;

    #[test]
    fn table_shows_name_type_and_token_id() {
        let now = Utc::now();
        let record = ContractRecord {
            id: 1,
            contract_name: "Clutch".into(),
            contract_address: Address::repeat_byte(0xab),
            contract_artifact: "{}".into(),
            external_token_id: 13,
            contract_type: crate::domain::ContractType::Erc721,
            created_at: now,
            updated_at: now,
        };

        let table = render(&[record]);
        assert!(table.contains("Clutch"));
        assert!(table.contains("erc721"));
        assert!(table.contains("13"));
        assert!(table.contains("Token Id"));
    }
}
