//! ci-operator build configurations stored in a directory tree.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{list_dir, read_yaml, write_replacing};
use crate::domain::errors::{DomainResult, MigrationError};
use crate::domain::ports::{BuildConfigRepository, StoredBuildConfig};

/// Every `.yaml` file below `root`, at any depth, keyed by file name.
pub struct FsBuildConfigRepository {
    root: PathBuf,
}

impl FsBuildConfigRepository {
    /// Repository rooted at the build-config directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl BuildConfigRepository for FsBuildConfigRepository {
    async fn load_all(&self) -> DomainResult<BTreeMap<String, StoredBuildConfig>> {
        let mut configs: BTreeMap<String, StoredBuildConfig> = BTreeMap::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            for entry in list_dir(&dir).await? {
                if entry.is_dir {
                    pending.push(entry.path);
                    continue;
                }
                if !entry.name.ends_with(".yaml") {
                    continue;
                }
                let relative_path = entry
                    .path
                    .strip_prefix(&self.root)
                    .map_or_else(|_| entry.path.clone(), Path::to_path_buf);
                if let Some(previous) = configs.get(&entry.name) {
                    return Err(MigrationError::DuplicateBasename {
                        basename: entry.name,
                        first: previous.relative_path.clone(),
                        second: relative_path,
                    });
                }
                let config = read_yaml(&entry.path).await?;
                configs.insert(
                    entry.name,
                    StoredBuildConfig {
                        relative_path,
                        config,
                    },
                );
            }
        }

        debug!(count = configs.len(), root = %self.root.display(), "loaded build configs");
        Ok(configs)
    }

    async fn write(&self, relative_path: &Path, contents: &str) -> DomainResult<()> {
        write_replacing(&self.root.join(relative_path), contents.as_bytes()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = "base_images:\n  base:\n    namespace: ocp\n    name: '4.8'\n    tag: base\nbuild_root:\n  image_stream_tag:\n    name: release\n";

    #[tokio::test]
    async fn test_walks_nested_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("openshift/release");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("openshift-release-master__ocp-4.8.yaml"), CONFIG).unwrap();
        fs::write(nested.join("README.md"), "not a config").unwrap();

        let repo = FsBuildConfigRepository::new(dir.path());
        let configs = repo.load_all().await.unwrap();

        assert_eq!(configs.len(), 1);
        let stored = &configs["openshift-release-master__ocp-4.8.yaml"];
        assert_eq!(
            stored.relative_path,
            PathBuf::from("openshift/release/openshift-release-master__ocp-4.8.yaml")
        );
        assert_eq!(stored.config.base_images["base"].name, "4.8");
        assert!(stored.config.extra.contains_key("build_root"));
    }

    #[tokio::test]
    async fn test_duplicate_basename_is_rejected() {
        let dir = TempDir::new().unwrap();
        for sub in ["a", "b"] {
            fs::create_dir_all(dir.path().join(sub)).unwrap();
            fs::write(dir.path().join(sub).join("dup.yaml"), CONFIG).unwrap();
        }

        let repo = FsBuildConfigRepository::new(dir.path());
        let err = repo.load_all().await.unwrap_err();
        assert!(matches!(
            err,
            MigrationError::DuplicateBasename { ref basename, .. } if basename == "dup.yaml"
        ));
    }

    #[tokio::test]
    async fn test_unparsable_file_names_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.yaml"), "tests: [unclosed").unwrap();

        let repo = FsBuildConfigRepository::new(dir.path());
        let err = repo.load_all().await.unwrap_err();
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let repo = FsBuildConfigRepository::new(dir.path());
        let target = Path::new("openshift/release/new.yaml");

        repo.write(target, "tests: []\n").await.unwrap();

        let written = fs::read_to_string(dir.path().join(target)).unwrap();
        assert_eq!(written, "tests: []\n");
        assert!(!dir.path().join("openshift/release/new.yaml.migrating").exists());
    }
}
