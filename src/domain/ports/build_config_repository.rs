//! Build configuration repository port.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::ReleaseBuildConfiguration;

/// A build configuration and where it lives, relative to the store root.
#[derive(Debug, Clone)]
pub struct StoredBuildConfig {
    /// Path below the store root.
    pub relative_path: PathBuf,
    /// Parsed contents.
    pub config: ReleaseBuildConfiguration,
}

/// Repository interface for ci-operator build configurations.
#[async_trait]
pub trait BuildConfigRepository: Send + Sync {
    /// Load every configuration in the store, keyed by file basename.
    async fn load_all(&self) -> DomainResult<BTreeMap<String, StoredBuildConfig>>;

    /// Replace (or create) the file at `relative_path`.
    async fn write(&self, relative_path: &Path, contents: &str) -> DomainResult<()>;
}
