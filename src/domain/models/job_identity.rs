//! Identity of a legacy release periodic, recovered from its name.
//!
//! Release jobs follow the format
//! `release-openshift-<product>-installer-<test name>-<version>`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::build_config::Metadata;
use super::config::MigrationConfig;

/// Minimum number of hyphen-separated segments in a release job name.
const MIN_SEGMENTS: usize = 6;

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+$").expect("version pattern is valid"));

/// Structured identity of a migratable release job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct JobIdentity {
    /// Test name, e.g. `e2e-aws`.
    pub test_name: String,
    /// Product segment, e.g. `ocp`.
    pub product: String,
    /// `major.minor` release, e.g. `4.8`.
    pub version: String,
}

impl JobIdentity {
    /// Parse a job name. Returns `None` for jobs that are not migration candidates.
    pub fn parse(job_name: &str, prefix: &str) -> Option<Self> {
        if !job_name.starts_with(prefix) {
            return None;
        }
        let segments: Vec<&str> = job_name.split('-').collect();
        if segments.len() < MIN_SEGMENTS {
            return None;
        }
        let (version, rest) = segments.split_last()?;
        if !VERSION_PATTERN.is_match(version) {
            return None;
        }
        // rest[3] is the fixed "installer" marker
        Some(Self {
            test_name: rest[4..].join("-"),
            product: rest[2].to_string(),
            version: (*version).to_string(),
        })
    }

    /// `product-version`, the variant of the target build configuration.
    pub fn variant(&self) -> String {
        format!("{}-{}", self.product, self.version)
    }

    /// Metadata of the build configuration this job migrates into.
    pub fn metadata(&self, settings: &MigrationConfig) -> Metadata {
        Metadata {
            org: settings.org.clone(),
            repo: settings.repo.clone(),
            branch: settings.branch.clone(),
            variant: self.variant(),
        }
    }

    /// Basename of the target build configuration file.
    pub fn target_basename(&self, settings: &MigrationConfig) -> String {
        self.metadata(settings).basename()
    }

    /// Name of the periodic generated from the migrated test.
    pub fn new_job_name(&self, settings: &MigrationConfig) -> String {
        self.metadata(settings)
            .job_name(&settings.periodic_prefix, &self.test_name)
    }
}
