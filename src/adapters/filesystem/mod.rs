//! Filesystem adapters for the configuration stores.

pub mod build_config_repository;
pub mod dashboard_repository;
pub mod generator_table;
pub mod job_config_repository;

pub use build_config_repository::FsBuildConfigRepository;
pub use dashboard_repository::FsDashboardRepository;
pub use generator_table::FsGeneratorTable;
pub use job_config_repository::FsJobConfigRepository;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tokio::fs;

use crate::domain::errors::{DomainResult, MigrationError};

/// A directory entry, classified.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    /// `root` joined with the file name.
    pub path: PathBuf,
    /// Raw file name, used to address the file again.
    pub file_name: OsString,
    /// Lossy UTF-8 form of `file_name` for matching and display.
    pub name: String,
    pub is_dir: bool,
}

/// List a directory's entries sorted by name.
pub(crate) async fn list_dir(dir: &Path) -> DomainResult<Vec<Entry>> {
    let mut reader = fs::read_dir(dir)
        .await
        .map_err(|err| MigrationError::io(dir, err))?;
    let mut entries = Vec::new();
    while let Some(entry) = reader
        .next_entry()
        .await
        .map_err(|err| MigrationError::io(dir, err))?
    {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .map_err(|err| MigrationError::io(&path, err))?;
        let file_name = entry.file_name();
        entries.push(Entry {
            name: file_name.to_string_lossy().into_owned(),
            file_name,
            is_dir: file_type.is_dir(),
            path,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

pub(crate) async fn read_yaml<T: DeserializeOwned>(path: &Path) -> DomainResult<T> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|err| MigrationError::io(path, err))?;
    serde_yaml::from_str(&raw).map_err(|err| MigrationError::parse(path, err))
}

/// Write through a sibling temporary file renamed over `path`.
pub(crate) async fn write_replacing(path: &Path, contents: &[u8]) -> DomainResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|err| MigrationError::io(parent, err))?;
    }
    let mut staging = path.as_os_str().to_owned();
    staging.push(".migrating");
    let staging = PathBuf::from(staging);

    fs::write(&staging, contents)
        .await
        .map_err(|err| MigrationError::io(&staging, err))?;
    fs::rename(&staging, path)
        .await
        .map_err(|err| MigrationError::io(path, err))
}
