use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("missing environment variable: {name}")]
    MissingEnv { name: String },

    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to parse collection config: {0}")]
    ParseCollection(String),
}

/// Chain interaction errors.
///
/// Deployments are not idempotent, so none of these are retried.
#[derive(Error, Debug, Clone)]
pub enum ChainError {
    #[error("failed to connect to {rpc}: {reason}")]
    Connection { rpc: String, reason: String },

    #[error("failed to submit transaction: {0}")]
    Submission(String),

    #[error("failed to get receipt: {0}")]
    Receipt(String),

    #[error("transaction {tx_hash} reverted")]
    Reverted { tx_hash: String },

    #[error("deployment receipt {tx_hash} carries no contract address")]
    MissingContractAddress { tx_hash: String },

    #[error("contract call failed: {0}")]
    Call(String),

    #[error("setting {setting} cannot take value {value}")]
    SettingMismatch { setting: String, value: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("artifact for {name} not found at {}", path.display())]
    ArtifactNotFound { name: String, path: PathBuf },

    #[error("invalid artifact: {0}")]
    Artifact(String),

    #[error("network error: {0}")]
    Network(#[from] ChainError),

    #[error("contract {name} not found in registry")]
    RegistryNotFound { name: String },

    #[error("registry holds no contracts")]
    RegistryEmpty,

    #[error("database is read only")]
    ReadOnly,

    #[error("failed to link {contract} with {counterpart}: {source}")]
    Link {
        contract: String,
        counterpart: String,
        #[source]
        source: ChainError,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
