//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct read from `titan.toml`. Secrets are
//! never read from the file: the deployment key comes from `DEPLOYMENT_KEY`
//! and the RPC endpoint may be overridden by `RPC_URL` / `RPC_NAME`.
//!
//! # Example
//!
//! ```no_run
//! use titan::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("titan.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::adapter::outbound::evm::ChainSettings;
use crate::domain::{Client, ContractKind, EnvTier, TokenIds};
use crate::error::{ConfigError, Result};

/// Default application config file.
pub const DEFAULT_CONFIG_FILE: &str = "titan.toml";

/// Default collection config file.
pub const DEFAULT_COLLECTIONS_FILE: &str = "collections.json";

/// RPC endpoint settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkConfig {
    /// Display name of the network. Overridden by `RPC_NAME`.
    pub name: Option<String>,
    /// JSON-RPC endpoint. Overridden by `RPC_URL`.
    pub url: Option<String>,
    /// Loaded from `DEPLOYMENT_KEY` only.
    #[serde(skip)]
    pub deployment_key: Option<String>,
}

/// Location of the Foundry project whose `out/` holds the artifacts.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    #[serde(default = "default_project_dir")]
    pub project_dir: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            project_dir: default_project_dir(),
        }
    }
}

fn default_project_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfig {
    /// Refuse every registry write. Also set by `TITAN_DATABASE_READONLY`.
    #[serde(default)]
    pub read_only: bool,
}

/// Marketplace targeted by the `--marketplace` stage.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceSettings {
    #[serde(default = "default_marketplace")]
    pub contract: ContractKind,
}

impl Default for MarketplaceSettings {
    fn default() -> Self {
        Self {
            contract: default_marketplace(),
        }
    }
}

fn default_marketplace() -> ContractKind {
    ContractKind::MarketplaceErc721EscrowV1
}

/// Inputs of the Benfica lift-and-shift report.
#[derive(Debug, Clone, Deserialize)]
pub struct BenficaSettings {
    #[serde(default = "default_benfica_dir")]
    pub data_dir: PathBuf,
}

impl Default for BenficaSettings {
    fn default() -> Self {
        Self {
            data_dir: default_benfica_dir(),
        }
    }
}

fn default_benfica_dir() -> PathBuf {
    PathBuf::from("data/benfica")
}

/// Main application configuration.
///
/// Every section is optional; an empty file yields a usable default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    /// Collection config path, JSON or TOML by extension.
    #[serde(default)]
    pub collections: Option<PathBuf>,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub marketplace: MarketplaceSettings,

    #[serde(default)]
    pub benfica: BenficaSettings,

    /// Per-environment token id overrides, e.g. `[token_ids.euroleague.dev]`.
    #[serde(default)]
    pub token_ids: BTreeMap<String, BTreeMap<String, TokenIds>>,
}

/// Interpret common truthy spellings of a flag variable.
fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Config {
    /// Parse configuration from TOML content, applying environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with(content, |name| std::env::var(name).ok())
    }

    /// Same as [`Config::parse_toml`] with an explicit variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml_with<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Some(url) = env("RPC_URL").filter(|v| !v.trim().is_empty()) {
            config.network.url = Some(url);
        }
        if let Some(name) = env("RPC_NAME").filter(|v| !v.trim().is_empty()) {
            config.network.name = Some(name);
        }
        // Never from the config file.
        config.network.deployment_key = env("DEPLOYMENT_KEY").filter(|v| !v.trim().is_empty());
        if let Some(flag) = env("TITAN_DATABASE_READONLY") {
            config.database.read_only = is_truthy(&flag);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_toml(&content)
    }

    /// Load `path` if given, else `titan.toml` if present, else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be read or any
    /// file fails to parse.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE),
            None => Self::parse_toml(""),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "logging.level",
            }
            .into());
        }
        if !self.logging.is_known_format() {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected json or pretty, got {}", self.logging.format),
            }
            .into());
        }
        if !self.marketplace.contract.is_marketplace() {
            return Err(ConfigError::InvalidValue {
                field: "marketplace.contract",
                reason: format!("{} is not a marketplace contract", self.marketplace.contract),
            }
            .into());
        }
        if let Some(url) = &self.network.url {
            url::Url::parse(url).map_err(|e| ConfigError::InvalidValue {
                field: "network.url",
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Collection config path, falling back to `collections.json`.
    #[must_use]
    pub fn collections_path(&self) -> PathBuf {
        self.collections
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_COLLECTIONS_FILE))
    }

    /// Display name of the network.
    #[must_use]
    pub fn network_name(&self) -> &str {
        self.network.name.as_deref().unwrap_or("unnamed network")
    }

    /// Endpoint and key for the chain client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] when `RPC_URL` or `DEPLOYMENT_KEY`
    /// is not set.
    pub fn chain_settings(&self) -> Result<ChainSettings> {
        let rpc_url = self.network.url.clone().ok_or_else(|| ConfigError::MissingEnv {
            name: "RPC_URL".into(),
        })?;
        let deployment_key =
            self.network
                .deployment_key
                .clone()
                .ok_or_else(|| ConfigError::MissingEnv {
                    name: "DEPLOYMENT_KEY".into(),
                })?;

        Ok(ChainSettings {
            rpc_url,
            rpc_name: self.network_name().to_string(),
            deployment_key,
        })
    }

    /// Token id overrides for one environment, empty when none are set.
    #[must_use]
    pub fn token_id_overrides(&self, client: Client, tier: EnvTier) -> TokenIds {
        self.token_ids
            .get(client.as_str())
            .and_then(|tiers| tiers.get(tier.as_str()))
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::parse_toml_with("", env(&[])).unwrap();
        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(config.artifacts.project_dir, PathBuf::from("."));
        assert_eq!(config.collections_path(), PathBuf::from("collections.json"));
        assert_eq!(
            config.marketplace.contract,
            ContractKind::MarketplaceErc721EscrowV1
        );
        assert!(!config.database.read_only);
    }

    #[test]
    fn env_overrides_network_and_supplies_key() {
        let toml = r#"
            [network]
            name = "amoy"
            url = "http://localhost:8545"
        "#;
        let config = Config::parse_toml_with(
            toml,
            env(&[
                ("RPC_URL", "https://rpc.example.org"),
                ("DEPLOYMENT_KEY", "0xabc"),
            ]),
        )
        .unwrap();

        let chain = config.chain_settings().unwrap();
        assert_eq!(chain.rpc_url, "https://rpc.example.org");
        assert_eq!(chain.rpc_name, "amoy");
        assert_eq!(chain.deployment_key, "0xabc");
    }

    #[test]
    fn chain_settings_require_deployment_key() {
        let config =
            Config::parse_toml_with("", env(&[("RPC_URL", "http://localhost:8545")])).unwrap();
        let err = config.chain_settings().unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingEnv { ref name }) if name == "DEPLOYMENT_KEY"
        ));
    }

    #[test]
    fn readonly_flag_comes_from_env() {
        let config =
            Config::parse_toml_with("", env(&[("TITAN_DATABASE_READONLY", "true")])).unwrap();
        assert!(config.database.read_only);

        let config = Config::parse_toml_with(
            "[database]\nread_only = true",
            env(&[("TITAN_DATABASE_READONLY", "0")]),
        )
        .unwrap();
        assert!(!config.database.read_only);
    }

    #[test]
    fn parses_token_id_overrides() {
        let toml = r#"
            [token_ids.euroleague.qa]
            CLUTCH = 9000
        "#;
        let config = Config::parse_toml_with(toml, env(&[])).unwrap();
        let ids = config.token_id_overrides(Client::Euroleague, EnvTier::Qa);
        assert_eq!(ids.get("Clutch"), Some(9000));
        assert!(config
            .token_id_overrides(Client::Euroleague, EnvTier::Dev)
            .is_empty());
    }

    #[test]
    fn marketplace_must_be_a_marketplace_kind() {
        let err = Config::parse_toml_with("[marketplace]\ncontract = \"Moments\"", env(&[]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "marketplace.contract",
                ..
            })
        ));
    }

    #[test]
    fn unknown_marketplace_name_fails_to_parse() {
        let err = Config::parse_toml_with("[marketplace]\ncontract = \"Bazaar\"", env(&[]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let toml = "[logging]\nlevel = \"info\"\nformat = \"xml\"";
        assert!(Config::parse_toml_with(toml, env(&[])).is_err());
    }

    #[test]
    fn rejects_malformed_rpc_url() {
        let err = Config::parse_toml_with("", env(&[("RPC_URL", "not a url")])).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "network.url",
                ..
            })
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load("/nonexistent/titan.toml").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ReadFile { .. })));
    }
}
