//! Summary of a migration run.

use serde::Serialize;

use super::replacement::{ConfiglessSet, JobNameMapping};

/// One old-to-new job rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplacedJob {
    /// Name of the removed release job.
    pub old_name: String,
    /// Name of the generated job replacing it.
    pub new_name: String,
}

/// Files touched (or, in a dry run, that would be touched).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    /// Build configurations, relative to their directory.
    pub build_configs: Vec<String>,
    /// Job-config file names.
    pub job_configs: Vec<String>,
    /// Release-controller dashboard file names.
    pub dashboard_configs: Vec<String>,
}

impl WriteSummary {
    /// No file would be written.
    pub fn is_empty(&self) -> bool {
        self.build_configs.is_empty()
            && self.job_configs.is_empty()
            && self.dashboard_configs.is_empty()
    }
}

/// Result of a migration run, printed by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Sorted by old name.
    pub replaced_jobs: Vec<ReplacedJob>,
    /// Sorted.
    pub configless_tests: Vec<String>,
    /// Files written.
    pub writes: WriteSummary,
    /// Nothing was actually written.
    pub dry_run: bool,
}

impl MigrationReport {
    /// Build a report with sorted job and test lists.
    pub fn new(
        replaced_jobs: &JobNameMapping,
        configless_tests: &ConfiglessSet,
        writes: WriteSummary,
        dry_run: bool,
    ) -> Self {
        Self {
            replaced_jobs: replaced_jobs
                .iter()
                .map(|(old_name, new_name)| ReplacedJob {
                    old_name: old_name.clone(),
                    new_name: new_name.clone(),
                })
                .collect(),
            configless_tests: configless_tests.iter().cloned().collect(),
            writes,
            dry_run,
        }
    }

    /// True when no job was migrated and no test lacked configuration.
    pub fn is_noop(&self) -> bool {
        self.replaced_jobs.is_empty() && self.configless_tests.is_empty()
    }
}
