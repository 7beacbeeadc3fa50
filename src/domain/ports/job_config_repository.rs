//! Job-config repository port.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::JobConfig;

/// One periodic job-config file.
#[derive(Debug, Clone)]
pub struct JobConfigFile {
    /// Location of the file, relative to the store root.
    pub path: PathBuf,
    /// Display name of the file.
    pub filename: String,
    /// Parsed contents.
    pub config: JobConfig,
}

/// Repository interface for prow periodic job configs.
#[async_trait]
pub trait JobConfigRepository: Send + Sync {
    /// Load every periodic job-config file, sorted by file name.
    async fn load_periodics(&self) -> DomainResult<Vec<JobConfigFile>>;

    /// Replace the file at `path`, relative to the store root.
    async fn write(&self, path: &Path, contents: &str) -> DomainResult<()>;
}
