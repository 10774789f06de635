//! CLI module graph.

pub mod command;
pub mod list;
pub mod output;
pub mod reset;
pub mod run;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

use command::{Cli, Commands};

/// Dispatch a parsed command line.
pub async fn execute(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Some(Commands::List(args)) => list::execute(cli, args, config).await,
        Some(Commands::Reset(args)) => reset::execute(cli, args, config).await,
        None => run::execute(cli, config).await,
    }
}
