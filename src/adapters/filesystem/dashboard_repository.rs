//! Release-controller configs stored as files directly inside one directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{list_dir, write_replacing};
use crate::domain::errors::{DomainResult, MigrationError};
use crate::domain::ports::{DashboardFile, DashboardRepository};

/// The `.json` files directly inside `root`.
pub struct FsDashboardRepository {
    root: PathBuf,
}

impl FsDashboardRepository {
    /// Repository rooted at the dashboard directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DashboardRepository for FsDashboardRepository {
    async fn load_all(&self) -> DomainResult<Vec<DashboardFile>> {
        let mut files = Vec::new();
        for entry in list_dir(&self.root).await? {
            if entry.is_dir {
                continue;
            }
            let contents = fs::read(&entry.path)
                .await
                .map_err(|err| MigrationError::io(&entry.path, err))?;
            files.push(DashboardFile {
                path: PathBuf::from(entry.file_name),
                filename: entry.name,
                contents,
            });
        }
        Ok(files)
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> DomainResult<()> {
        write_replacing(&self.root.join(path), contents).await
    }
}
