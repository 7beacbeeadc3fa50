//! Generator table loaded from a YAML file.

use std::path::PathBuf;

use async_trait::async_trait;

use super::read_yaml;
use crate::domain::errors::DomainResult;
use crate::domain::models::GeneratorConfig;
use crate::domain::ports::GeneratorTableSource;

/// Generator table read from a single YAML file.
pub struct FsGeneratorTable {
    path: PathBuf,
}

impl FsGeneratorTable {
    /// Table stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl GeneratorTableSource for FsGeneratorTable {
    async fn load(&self) -> DomainResult<GeneratorConfig> {
        read_yaml(&self.path).await
    }
}
