//! Collection config loading.

use std::path::Path;

use tracing::debug;

use crate::domain::CollectionConfig;
use crate::error::{ConfigError, Result};

/// Load and validate a collection config, JSON or TOML by extension.
///
/// # Errors
///
/// Returns [`ConfigError::ReadFile`] if the file cannot be read,
/// [`ConfigError::ParseCollection`] if it does not parse, and a validation
/// error for duplicate or empty names.
pub fn load_collections(path: &Path) -> Result<CollectionConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let config = match extension.as_deref() {
        Some("toml") => parse_toml(&content)?,
        Some("json") | None => parse_json(&content)?,
        Some(other) => {
            return Err(ConfigError::InvalidValue {
                field: "collections",
                reason: format!("unsupported collection file extension .{other}"),
            }
            .into())
        }
    };

    config.validate()?;
    debug!(
        component = "config",
        method = "load_collections",
        path = %path.display(),
        erc721 = config.erc721_collections().count(),
        "Collection config loaded"
    );
    Ok(config)
}

/// Parse a JSON collection config.
///
/// # Errors
///
/// Returns [`ConfigError::ParseCollection`] on malformed input.
pub fn parse_json(content: &str) -> Result<CollectionConfig> {
    serde_json::from_str(content)
        .map_err(|e| ConfigError::ParseCollection(e.to_string()).into())
}

/// Parse a TOML collection config.
///
/// # Errors
///
/// Returns [`ConfigError::ParseCollection`] on malformed input.
pub fn parse_toml(content: &str) -> Result<CollectionConfig> {
    toml::from_str(content).map_err(|e| ConfigError::ParseCollection(e.to_string()).into())
}
