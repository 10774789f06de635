//! Client selection and the environment a run operates against.

use std::collections::BTreeMap;
use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Client projects with their own collections and databases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Client {
    Euroleague,
    Benfica,
}

impl Client {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Client::Euroleague => "euroleague",
            Client::Benfica => "benfica",
        }
    }

    /// Tiers the client has databases for.
    #[must_use]
    pub const fn tiers(self) -> &'static [EnvTier] {
        match self {
            Client::Euroleague => &[EnvTier::Dev, EnvTier::Qa, EnvTier::Uat],
            Client::Benfica => &[EnvTier::Prod],
        }
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvTier {
    Dev,
    Qa,
    Uat,
    Prod,
}

impl EnvTier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EnvTier::Dev => "dev",
            EnvTier::Qa => "qa",
            EnvTier::Uat => "uat",
            EnvTier::Prod => "prod",
        }
    }
}

impl fmt::Display for EnvTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External token ids keyed by upper-cased collection name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TokenIds(BTreeMap<String, i64>);

impl TokenIds {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, id: i64) {
        self.0.insert(name.to_uppercase(), id);
    }

    /// Case-insensitive lookup.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<i64> {
        self.0.get(&name.to_uppercase()).copied()
    }

    /// Entries from `other` override ours.
    pub fn extend(&mut self, other: &TokenIds) {
        for (name, id) in &other.0 {
            self.0.insert(name.to_uppercase(), *id);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> From<[(&str, i64); N]> for TokenIds {
    fn from(entries: [(&str, i64); N]) -> Self {
        let mut ids = TokenIds::new();
        for (name, id) in entries {
            ids.insert(name, id);
        }
        ids
    }
}

/// The environment a run is bound to.
///
/// Built once at startup and handed to every stage; nothing switches it
/// mid-run.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEnvironment {
    pub client: Client,
    pub tier: EnvTier,
    pub database_url: String,
    pub token_ids: TokenIds,
    pub read_only: bool,
}

impl ActiveEnvironment {
    /// Validate the client/tier combination and bind the environment.
    pub fn new(
        client: Client,
        tier: EnvTier,
        database_url: impl Into<String>,
        token_ids: TokenIds,
    ) -> Result<Self> {
        ensure_supported(client, tier)?;
        Ok(Self {
            client,
            tier,
            database_url: database_url.into(),
            token_ids,
            read_only: false,
        })
    }

    #[must_use]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Token id for a collection, failing when the table has no entry.
    pub fn token_id(&self, name: &str) -> Result<i64> {
        self.token_ids.get(name).ok_or_else(|| {
            Error::Validation(format!(
                "no external token id for {name} in {} {}",
                self.client, self.tier
            ))
        })
    }
}

/// Reject client/tier combinations the client has no database for.
pub fn ensure_supported(client: Client, tier: EnvTier) -> Result<()> {
    if client.tiers().contains(&tier) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "{client} has no {tier} environment"
        )))
    }
}
