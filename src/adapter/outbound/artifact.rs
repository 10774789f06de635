//! Foundry artifact resolver.
//!
//! Reads `<project>/out/<subpath><name>.sol/<name>.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, error};

use crate::domain::{Artifact, ArtifactLocation};
use crate::error::{Error, Result};
use crate::port::ArtifactResolver;

/// Resolves artifacts from a Foundry project's `out/` directory.
#[derive(Debug, Clone)]
pub struct FsArtifactResolver {
    project_dir: PathBuf,
}

impl FsArtifactResolver {
    #[must_use]
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    /// Path the artifact for `location` is expected at.
    #[must_use]
    pub fn path_for(&self, location: &ArtifactLocation) -> PathBuf {
        let mut path = self.project_dir.join("out");
        for segment in location.subpath.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.sol", location.name));
        path.push(format!("{}.json", location.name));
        path
    }
}

impl ArtifactResolver for FsArtifactResolver {
    fn resolve(&self, location: &ArtifactLocation) -> Result<Artifact> {
        let path = self.path_for(location);
        debug!(
            component = "artifact",
            method = "resolve",
            path = %path.display(),
            "Resolving artifact"
        );

        let contents = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                error!(
                    component = "artifact",
                    method = "resolve",
                    contract = %location.name,
                    path = %path.display(),
                    "Artifact not found"
                );
                Error::ArtifactNotFound {
                    name: location.name.clone(),
                    path: path.clone(),
                }
            } else {
                Error::Io(e)
            }
        })?;

        let raw = serde_json::from_str(&contents)
            .map_err(|e| Error::Artifact(format!("{}: {e}", path.display())))?;
        Artifact::from_json(&location.name, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_artifact(root: &Path, subpath: &str, name: &str, body: &str) {
        let dir = root.join("out").join(subpath).join(format!("{name}.sol"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{name}.json")), body).unwrap();
    }

    #[test]
    fn resolves_artifact_under_out() {
        let dir = TempDir::new().unwrap();
        write_artifact(
            dir.path(),
            "",
            "ClancyERC721",
            r#"{"abi": [], "bytecode": {"object": "0x6080"}}"#,
        );
        let resolver = FsArtifactResolver::new(dir.path());

        let artifact = resolver
            .resolve(&ArtifactLocation::new("ClancyERC721"))
            .unwrap();

        assert_eq!(artifact.name, "ClancyERC721");
        assert_eq!(artifact.bytecode.len(), 2);
    }

    #[test]
    fn resolves_artifact_with_subpath() {
        let dir = TempDir::new().unwrap();
        write_artifact(
            dir.path(),
            "Series1/Series1",
            "Moments",
            r#"{"abi": [], "bytecode": "0x6080"}"#,
        );
        let resolver = FsArtifactResolver::new(dir.path());
        let location = ArtifactLocation::new("Moments").with_subpath("Series1/Series1/");

        assert!(resolver.resolve(&location).is_ok());
    }

    #[test]
    fn missing_artifact_reports_expected_path() {
        let dir = TempDir::new().unwrap();
        let resolver = FsArtifactResolver::new(dir.path());

        let err = resolver
            .resolve(&ArtifactLocation::new("Reels"))
            .unwrap_err();

        match err {
            Error::ArtifactNotFound { name, path } => {
                assert_eq!(name, "Reels");
                assert!(path.ends_with("out/Reels.sol/Reels.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_json_is_an_artifact_error() {
        let dir = TempDir::new().unwrap();
        write_artifact(dir.path(), "", "Broken", "{not json");
        let resolver = FsArtifactResolver::new(dir.path());

        let err = resolver
            .resolve(&ArtifactLocation::new("Broken"))
            .unwrap_err();

        assert!(matches!(err, Error::Artifact(_)));
    }
}
