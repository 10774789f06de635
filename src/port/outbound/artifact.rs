//! Artifact lookup port.

use crate::domain::{Artifact, ArtifactLocation};
use crate::error::Result;

/// Source of compiled contract artifacts.
pub trait ArtifactResolver: Send + Sync {
    /// Load the artifact at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::ArtifactNotFound`] when nothing exists
    /// at the location and [`crate::error::Error::Artifact`] when the
    /// document is malformed.
    fn resolve(&self, location: &ArtifactLocation) -> Result<Artifact>;
}
