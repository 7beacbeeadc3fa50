//! Common test utilities for integration tests
//!
//! Provides a temporary workspace holding the four stores a migration
//! reads, plus the sample documents used across the test files.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use release_job_migrator::adapters::filesystem::{
    FsBuildConfigRepository, FsDashboardRepository, FsGeneratorTable, FsJobConfigRepository,
};
use release_job_migrator::domain::models::{JobConfig, MigrationConfig, ReleaseBuildConfiguration};
use release_job_migrator::MigrationRunner;
use tempfile::TempDir;

pub const GENERATOR: &str = r"
config:
  e2e-aws:
    steps:
      cluster_profile: aws
      workflow: openshift-e2e-aws
  e2e-aws-upgrade:
    steps:
      cluster_profile: aws
      workflow: openshift-upgrade-aws
    base_images:
      upi-installer:
        tag: upi-installer
";

pub const EXISTING_CONFIG_PATH: &str = "openshift/release/openshift-release-master__ocp-4.8.yaml";
pub const NEW_CONFIG_PATH: &str = "openshift/release/openshift-release-master__ocp-4.9.yaml";

pub const EXISTING_CONFIG: &str = r#"
base_images:
  base:
    name: "4.8"
    namespace: ocp
    tag: base
build_root:
  image_stream_tag:
    name: release
    namespace: openshift
    tag: golang-1.15
releases:
  latest:
    candidate:
      product: ocp
      stream: nightly
      version: "4.8"
resources:
  '*':
    requests:
      cpu: 100m
      memory: 200Mi
tests:
- as: e2e-gcp
  interval: 24h
  steps:
    cluster_profile: gcp
    workflow: openshift-e2e-gcp
zz_generated_metadata:
  branch: master
  org: openshift
  repo: release
  variant: ocp-4.8
"#;

pub const JOB_FILE: &str = "openshift-release-release-4.8-periodics.yaml";

pub const JOBS: &str = r"
periodics:
- name: release-openshift-ocp-installer-e2e-aws-4.8
  cron: '0 6 * * *'
  agent: kubernetes
  spec:
    containers:
    - command:
      - ci-operator
      args:
      - --target=e2e-aws
      image: ci-operator:latest
- name: release-openshift-ocp-installer-e2e-aws-upgrade-4.9
  interval: 48h
  spec:
    containers:
    - command:
      - ci-operator
- name: release-openshift-ocp-installer-e2e-metal-4.8
  interval: 24h
  decorate: true
  spec:
    containers:
    - command:
      - ci-operator
- name: release-openshift-ocp-installer-e2e-script-4.8
  interval: 24h
  spec:
    containers:
    - command:
      - /bin/bash
- name: periodic-ci-openshift-release-master-nightly-4.8-e2e-gcp
  interval: 24h
";

pub const DASHBOARD_FILE: &str = "release-ocp-4.8.json";
pub const UNTOUCHED_DASHBOARD_FILE: &str = "release-okd-4.8.json";

pub const DASHBOARD: &str = r#"{
  "name": "4.8.0-0.nightly",
  "verify": {
    "aws": {"prowJob": {"name": "release-openshift-ocp-installer-e2e-aws-4.8"}},
    "upgrade": {"prowJob": {"name": "release-openshift-ocp-installer-e2e-aws-upgrade-4.9"}},
    "metal": {"prowJob": {"name": "release-openshift-ocp-installer-e2e-metal-4.8"}}
  }
}
"#;

pub const UNTOUCHED_DASHBOARD: &str = r#"{"name": "4.8.0-0.okd", "verify": {}}
"#;

pub const OLD_AWS: &str = "release-openshift-ocp-installer-e2e-aws-4.8";
pub const OLD_UPGRADE: &str = "release-openshift-ocp-installer-e2e-aws-upgrade-4.9";
pub const NEW_AWS: &str = "periodic-ci-openshift-release-master-ocp-4.8-e2e-aws";
pub const NEW_UPGRADE: &str = "periodic-ci-openshift-release-master-ocp-4.9-e2e-aws-upgrade";

/// A temporary workspace with the generator table and three store directories.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    /// An empty workspace with all directories created.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        for sub in ["ci-operator", "jobs", "rc"] {
            fs::create_dir_all(dir.path().join(sub)).expect("Failed to create store dir");
        }
        let workspace = Self { dir };
        workspace.write("generator.yaml", GENERATOR);
        workspace
    }

    /// The standard scenario: one existing config, one job file, two dashboards.
    pub fn standard() -> Self {
        let workspace = Self::empty();
        workspace.write_build_config(EXISTING_CONFIG_PATH, EXISTING_CONFIG);
        workspace.write_jobs(JOB_FILE, JOBS);
        workspace.write_dashboard(DASHBOARD_FILE, DASHBOARD);
        workspace.write_dashboard(UNTOUCHED_DASHBOARD_FILE, UNTOUCHED_DASHBOARD);
        workspace
    }

    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn generator_path(&self) -> PathBuf {
        self.path("generator.yaml")
    }

    pub fn build_config_dir(&self) -> PathBuf {
        self.path("ci-operator")
    }

    pub fn jobs_dir(&self) -> PathBuf {
        self.path("jobs")
    }

    pub fn dashboard_dir(&self) -> PathBuf {
        self.path("rc")
    }

    pub fn write(&self, relative: impl AsRef<Path>, contents: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(path, contents).expect("Failed to write fixture");
    }

    pub fn write_build_config(&self, relative: &str, contents: &str) {
        self.write(Path::new("ci-operator").join(relative), contents);
    }

    pub fn write_jobs(&self, filename: &str, contents: &str) {
        self.write(Path::new("jobs").join(filename), contents);
    }

    pub fn write_dashboard(&self, filename: &str, contents: &str) {
        self.write(Path::new("rc").join(filename), contents);
    }

    pub fn read(&self, relative: impl AsRef<Path>) -> String {
        fs::read_to_string(self.path(relative)).expect("Failed to read file")
    }

    pub fn build_config(&self, relative: &str) -> ReleaseBuildConfiguration {
        let raw = self.read(Path::new("ci-operator").join(relative));
        serde_yaml::from_str(&raw).expect("build config should parse")
    }

    pub fn jobs(&self, filename: &str) -> JobConfig {
        let raw = self.read(Path::new("jobs").join(filename));
        serde_yaml::from_str(&raw).expect("job config should parse")
    }

    pub fn dashboard(&self, filename: &str) -> String {
        self.read(Path::new("rc").join(filename))
    }

    /// Every file under the workspace with its contents, for before/after comparison.
    pub fn snapshot(&self) -> Vec<(PathBuf, Vec<u8>)> {
        let mut files = Vec::new();
        let mut pending = vec![self.dir.path().to_path_buf()];
        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir).expect("Failed to read dir") {
                let path = entry.expect("Failed to read entry").path();
                if path.is_dir() {
                    pending.push(path);
                } else {
                    let contents = fs::read(&path).expect("Failed to read file");
                    files.push((path, contents));
                }
            }
        }
        files.sort();
        files
    }

    pub fn runner(&self) -> MigrationRunner {
        self.runner_with(MigrationConfig::default())
    }

    pub fn runner_with(&self, settings: MigrationConfig) -> MigrationRunner {
        let suffix = settings.periodic_suffix.clone();
        MigrationRunner::new(
            settings,
            Arc::new(FsGeneratorTable::new(self.generator_path())),
            Arc::new(FsBuildConfigRepository::new(self.build_config_dir())),
            Arc::new(FsJobConfigRepository::new(self.jobs_dir(), suffix)),
            Arc::new(FsDashboardRepository::new(self.dashboard_dir())),
        )
    }

    /// Store arguments for the binary.
    pub fn cli_args(&self) -> Vec<String> {
        vec![
            "--config".to_string(),
            self.generator_path().display().to_string(),
            "--ci-op-configs".to_string(),
            self.build_config_dir().display().to_string(),
            "--jobs".to_string(),
            self.jobs_dir().display().to_string(),
            "--rc-configs".to_string(),
            self.dashboard_dir().display().to_string(),
        ]
    }
}
