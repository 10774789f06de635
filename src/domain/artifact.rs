//! Compiled contract artifacts.

use alloy_primitives::Bytes;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Compiled ABI and creation bytecode for one contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub name: String,
    pub abi: Value,
    pub bytecode: Bytes,
    /// The artifact document exactly as read, persisted with the record.
    pub raw: Value,
}

/// Foundry emits `bytecode` as an object; older toolchains emit a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum BytecodeField {
    Hex(String),
    Object { object: String },
}

#[derive(Deserialize)]
struct ArtifactDocument {
    abi: Value,
    bytecode: BytecodeField,
}

impl Artifact {
    /// Parse an artifact document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Artifact`] if the document lacks an ABI or its
    /// bytecode is not valid hex.
    pub fn from_json(name: &str, raw: Value) -> Result<Self> {
        let document: ArtifactDocument = serde_json::from_value(raw.clone())
            .map_err(|e| Error::Artifact(format!("{name}: {e}")))?;

        let hex = match document.bytecode {
            BytecodeField::Hex(hex) => hex,
            BytecodeField::Object { object } => object,
        };
        let bytecode: Bytes = hex
            .parse()
            .map_err(|e| Error::Artifact(format!("{name}: bytecode is not hex: {e}")))?;
        if bytecode.is_empty() {
            return Err(Error::Artifact(format!("{name}: bytecode is empty")));
        }

        Ok(Self {
            name: name.to_string(),
            abi: document.abi,
            bytecode,
            raw,
        })
    }

    /// Serialized form stored in the registry.
    #[must_use]
    pub fn to_record_json(&self) -> String {
        self.raw.to_string()
    }
}
