//! Command-line interface definitions.
//!
//! Contract and client names are closed `clap` value enums, so an unknown
//! name is rejected while parsing, before any config is read or any
//! connection is opened.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::{Client, ContractKind, EnvTier};

/// Deploy, register and link smart-contract collections
#[derive(Parser, Debug)]
#[command(name = "titan")]
#[command(version)]
pub struct Cli {
    /// Contracts to deploy
    #[arg(short = 'd', long, num_args = 1.., value_name = "CONTRACT")]
    pub deploy: Vec<ContractKind>,

    /// Contracts to coordinate from collection config
    #[arg(short = 'o', long, num_args = 1.., value_name = "CONTRACT")]
    pub coordinate: Vec<ContractKind>,

    /// Contracts to allow on the configured marketplace
    #[arg(short = 'm', long, num_args = 1.., value_name = "CONTRACT")]
    pub marketplace: Vec<ContractKind>,

    /// Client flow to run instead of individual stages
    #[arg(short = 'c', long, conflicts_with_all = ["deploy", "coordinate"])]
    pub client: Option<Client>,

    /// Client environment [default: the client's first environment]
    #[arg(short = 'e', long = "client_env", global = true)]
    pub client_env: Option<EnvTier>,

    /// Application config file [default: titan.toml when present]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Collection config file, JSON or TOML
    #[arg(long, global = true)]
    pub collections: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Registry maintenance subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the contract registry
    List(ListArgs),

    /// Empty a registry table and restart its ids
    Reset(ResetArgs),
}

/// Arguments for `titan list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Client whose registry to read
    #[arg(short = 'c', long)]
    pub client: Option<Client>,
}

/// Arguments for `titan reset`.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Table to empty
    #[arg(value_enum, default_value = "contracts")]
    pub table: ResetTable,

    /// Client whose registry to reset
    #[arg(short = 'c', long)]
    pub client: Option<Client>,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

/// Registry tables that can be reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResetTable {
    Contracts,
    Tokens,
}

impl ResetTable {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ResetTable::Contracts => "contracts",
            ResetTable::Tokens => "tokens",
        }
    }
}

/// Resolve the client and tier a command runs against.
///
/// Runs without `--client` use the Euroleague registry. Without
/// `--client_env` the client's first environment is used.
#[must_use]
pub fn selected_environment(client: Option<Client>, tier: Option<EnvTier>) -> (Client, EnvTier) {
    let client = client.unwrap_or(Client::Euroleague);
    let tier = tier.unwrap_or_else(|| client.tiers().first().copied().unwrap_or(EnvTier::Dev));
    (client, tier)
}
