use std::path::{Path, PathBuf};

use crate::error::SyncError;

/// CEF release matching the binary distribution the browser target is built against.
pub const DEFAULT_CEF_VERSION: &str = "140.1.14+geb1c06e+chromium-140.0.7339.185";

/// Canonical upstream for the CEF sources.
pub const DEFAULT_CEF_REPOSITORY: &str = "https://bitbucket.org/chromiumembedded/cef.git";

/// Literal every CEF release tag starts with (`cef_<version>`).
pub const TAG_PREFIX: &str = "cef_";

/// What a single invocation should converge to.
///
/// Built once from CLI input and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    version: String,
    repo: String,
    destination: PathBuf,
}

impl SyncRequest {
    /// # Errors
    /// Returns [`SyncError::EmptyVersion`] if `version` is empty.
    pub fn new(
        version: impl Into<String>,
        repo: impl Into<String>,
        destination: impl Into<PathBuf>,
    ) -> Result<Self, SyncError> {
        let version = version.into();
        if version.is_empty() {
            return Err(SyncError::EmptyVersion);
        }
        Ok(Self {
            version,
            repo: repo.into(),
            destination: destination.into(),
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Tag name this request pins to.
    pub fn tag(&self) -> String {
        tag_for_version(&self.version)
    }
}

/// Build the release tag for `version`. The version is used verbatim.
pub fn tag_for_version(version: &str) -> String {
    format!("{}{}", TAG_PREFIX, version)
}
