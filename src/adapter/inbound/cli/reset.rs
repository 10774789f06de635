//! Handler for the `reset` command.

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use tracing::warn;

use crate::adapter::inbound::cli::command::{selected_environment, Cli, ResetArgs, ResetTable};
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap::open_registry;
use crate::infrastructure::config::environment::resolve_environment;
use crate::infrastructure::config::settings::Config;
use crate::port::ContractRegistry;

/// Execute the reset command.
pub async fn execute(cli: &Cli, args: &ResetArgs, config: &Config) -> Result<()> {
    let (client, tier) = selected_environment(args.client, cli.client_env);
    let environment = resolve_environment(client, tier, config)?;
    let registry = open_registry(&environment)?;
    let table = args.table.as_str();

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Delete every row of {table} in the {client} {tier} registry?"
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            output::note("Reset cancelled");
            return Ok(());
        }
    }

    let deleted = match args.table {
        ResetTable::Contracts => registry.reset().await?,
        ResetTable::Tokens => registry.reset_tokens().await?,
    };
    warn!(
        component = "cli",
        method = "reset",
        table,
        client = %client,
        tier = %tier,
        deleted,
        "Registry table reset"
    );
    output::success(&format!("Deleted {deleted} rows from {table}"));
    Ok(())
}
