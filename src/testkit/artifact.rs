//! In-memory [`ArtifactResolver`].

use std::collections::HashMap;
use std::path::PathBuf;

use serde_json::json;

use crate::domain::{Artifact, ArtifactLocation};
use crate::error::{Error, Result};
use crate::port::ArtifactResolver;

/// Minimal creation bytecode used by generated artifacts.
pub const BYTECODE: &str = "0x6080604052348015600f57600080fd5b50";

/// Resolves artifacts from a map keyed by `subpath + name`.
#[derive(Debug, Clone, Default)]
pub struct MemoryArtifactResolver {
    artifacts: HashMap<String, Artifact>,
}

impl MemoryArtifactResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a generated artifact at `location`.
    pub fn with(mut self, location: &ArtifactLocation) -> Self {
        let raw = json!({ "abi": [], "bytecode": { "object": BYTECODE } });
        if let Ok(artifact) = Artifact::from_json(&location.name, raw) {
            self.artifacts.insert(location.to_string(), artifact);
        }
        self
    }

    /// Add generated artifacts for every location.
    pub fn with_all<'a, I>(self, locations: I) -> Self
    where
        I: IntoIterator<Item = &'a ArtifactLocation>,
    {
        locations.into_iter().fold(self, Self::with)
    }
}

impl ArtifactResolver for MemoryArtifactResolver {
    fn resolve(&self, location: &ArtifactLocation) -> Result<Artifact> {
        self.artifacts
            .get(&location.to_string())
            .cloned()
            .ok_or_else(|| Error::ArtifactNotFound {
                name: location.name.clone(),
                path: PathBuf::from(location.to_string()),
            })
    }
}
