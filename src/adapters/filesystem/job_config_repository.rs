//! Prow periodic job configs stored as `*-periodics.yaml` files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{list_dir, read_yaml, write_replacing};
use crate::domain::errors::DomainResult;
use crate::domain::ports::{JobConfigFile, JobConfigRepository};

/// Reads the files directly inside `root`; sub-directories are skipped.
pub struct FsJobConfigRepository {
    root: PathBuf,
    suffix: String,
}

impl FsJobConfigRepository {
    /// Only files whose name ends with `suffix` are loaded.
    pub fn new(root: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            suffix: suffix.into(),
        }
    }
}

#[async_trait]
impl JobConfigRepository for FsJobConfigRepository {
    async fn load_periodics(&self) -> DomainResult<Vec<JobConfigFile>> {
        let mut files = Vec::new();
        for entry in list_dir(&self.root).await? {
            if entry.is_dir || !entry.name.ends_with(&self.suffix) {
                continue;
            }
            let config = read_yaml(&entry.path).await?;
            debug!(file = %entry.name, "loaded job config");
            files.push(JobConfigFile {
                path: PathBuf::from(entry.file_name),
                filename: entry.name,
                config,
            });
        }
        Ok(files)
    }

    async fn write(&self, path: &Path, contents: &str) -> DomainResult<()> {
        write_replacing(&self.root.join(path), contents.as_bytes()).await
    }
}
