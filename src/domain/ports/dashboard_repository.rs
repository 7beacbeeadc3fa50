//! Release dashboard repository port.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// Raw contents of one release-controller configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardFile {
    /// Location of the file, relative to the store root.
    pub path: PathBuf,
    /// Display name of the file.
    pub filename: String,
    /// Raw bytes.
    pub contents: Vec<u8>,
}

/// Repository interface for release-controller configs.
///
/// Files are treated as opaque bytes; job names are rewritten textually.
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Load every file directly inside the store, sorted by file name.
    async fn load_all(&self) -> DomainResult<Vec<DashboardFile>>;

    /// Replace the file at `path`, relative to the store root.
    async fn write(&self, path: &Path, contents: &[u8]) -> DomainResult<()>;
}
