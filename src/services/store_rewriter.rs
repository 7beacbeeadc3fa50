//! Plans and applies the rewrite of all three stores.
//!
//! Planning serializes every output document in memory and can fail;
//! applying only writes what planning produced. Nothing is written unless
//! the whole plan was built.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::errors::{DomainResult, MigrationError};
use crate::domain::models::{
    default_build_config, JobConfig, MigrationConfig, ReconciliationOutcome, WriteSummary,
};
use crate::domain::ports::{
    BuildConfigRepository, DashboardFile, DashboardRepository, JobConfigFile, JobConfigRepository,
    StoredBuildConfig,
};
use crate::services::dashboard_rewriter::JobNameRewriter;

/// A build configuration with its new tests and images merged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedBuildConfig {
    /// File name, the key tests were staged under.
    pub basename: String,
    /// Location relative to the build-config directory.
    pub relative_path: PathBuf,
    /// Serialized document.
    pub contents: String,
    /// The file did not exist before this run.
    pub created: bool,
}

/// A job-config file with migrated periodics removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedJobConfig {
    /// Location relative to the job-config directory.
    pub path: PathBuf,
    /// Display name of the file.
    pub filename: String,
    /// Serialized replacement document.
    pub contents: String,
    /// Number of periodics removed.
    pub pruned: usize,
}

/// A dashboard with job names substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDashboard {
    /// Location relative to the dashboard directory.
    pub path: PathBuf,
    /// Display name of the file.
    pub filename: String,
    /// Rewritten bytes.
    pub contents: Vec<u8>,
}

/// Every write a migration run will perform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WritePlan {
    /// Written first.
    pub build_configs: Vec<PlannedBuildConfig>,
    /// Written after build configurations.
    pub job_configs: Vec<PlannedJobConfig>,
    /// Written last.
    pub dashboards: Vec<PlannedDashboard>,
}

impl WritePlan {
    /// Names of the files the plan writes.
    pub fn summary(&self) -> WriteSummary {
        WriteSummary {
            build_configs: self
                .build_configs
                .iter()
                .map(|planned| planned.relative_path.display().to_string())
                .collect(),
            job_configs: self
                .job_configs
                .iter()
                .map(|planned| planned.filename.clone())
                .collect(),
            dashboard_configs: self
                .dashboards
                .iter()
                .map(|planned| planned.filename.clone())
                .collect(),
        }
    }
}

/// Turns a reconciliation outcome into a write plan and applies it.
pub struct StoreRewriter<'a> {
    settings: &'a MigrationConfig,
}

impl<'a> StoreRewriter<'a> {
    /// Rewriter using `settings` for new file locations and name patterns.
    pub const fn new(settings: &'a MigrationConfig) -> Self {
        Self { settings }
    }

    /// Serialize every changed document. Nothing is written.
    pub fn plan(
        &self,
        existing: &BTreeMap<String, StoredBuildConfig>,
        job_files: &[JobConfigFile],
        dashboards: &[DashboardFile],
        outcome: &ReconciliationOutcome,
    ) -> DomainResult<WritePlan> {
        Ok(WritePlan {
            build_configs: self.plan_build_configs(existing, outcome)?,
            job_configs: plan_job_configs(job_files, outcome)?,
            dashboards: self.plan_dashboards(dashboards, outcome)?,
        })
    }

    fn plan_build_configs(
        &self,
        existing: &BTreeMap<String, StoredBuildConfig>,
        outcome: &ReconciliationOutcome,
    ) -> DomainResult<Vec<PlannedBuildConfig>> {
        let mut planned = Vec::new();
        for (basename, record) in &outcome.replacements {
            if record.is_empty() {
                continue;
            }
            let (mut config, relative_path, created) = match existing.get(basename) {
                Some(stored) => (stored.config.clone(), stored.relative_path.clone(), false),
                None => (
                    default_build_config(basename, self.settings)?,
                    PathBuf::from(&self.settings.org)
                        .join(&self.settings.repo)
                        .join(basename),
                    true,
                ),
            };

            config.tests.extend(record.tests.iter().cloned());
            for (name, image) in &record.base_images {
                match config.base_images.get(name) {
                    Some(present) if present != image => {
                        return Err(MigrationError::BaseImageConflict {
                            name: name.clone(),
                            existing: present.clone(),
                            new: image.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        config.base_images.insert(name.clone(), image.clone());
                    }
                }
            }

            let contents =
                serde_yaml::to_string(&config).map_err(|source| MigrationError::Serialize {
                    file: basename.clone(),
                    source,
                })?;
            debug!(file = %basename, created, tests = record.tests.len(), "planned build config");
            planned.push(PlannedBuildConfig {
                basename: basename.clone(),
                relative_path,
                contents,
                created,
            });
        }
        Ok(planned)
    }

    fn plan_dashboards(
        &self,
        dashboards: &[DashboardFile],
        outcome: &ReconciliationOutcome,
    ) -> DomainResult<Vec<PlannedDashboard>> {
        let rewriter =
            JobNameRewriter::new(&outcome.replaced_jobs, self.settings.dashboard_substitution)?;
        Ok(dashboards
            .iter()
            .filter_map(|file| {
                let rewritten = rewriter.rewrite(&file.contents);
                (*rewritten != *file.contents).then(|| PlannedDashboard {
                    path: file.path.clone(),
                    filename: file.filename.clone(),
                    contents: rewritten.into_owned(),
                })
            })
            .collect())
    }

    /// Perform every planned write: build configs, then job configs, then dashboards.
    pub async fn apply(
        plan: &WritePlan,
        build_configs: &dyn BuildConfigRepository,
        job_configs: &dyn JobConfigRepository,
        dashboards: &dyn DashboardRepository,
    ) -> DomainResult<()> {
        for planned in &plan.build_configs {
            build_configs
                .write(&planned.relative_path, &planned.contents)
                .await?;
            info!(
                file = %planned.relative_path.display(),
                created = planned.created,
                "wrote build config"
            );
        }
        for planned in &plan.job_configs {
            job_configs.write(&planned.path, &planned.contents).await?;
            info!(file = %planned.filename, pruned = planned.pruned, "wrote job config");
        }
        for planned in &plan.dashboards {
            dashboards
                .write(&planned.path, &planned.contents)
                .await?;
            info!(file = %planned.filename, "wrote release-controller config");
        }
        Ok(())
    }
}

fn plan_job_configs(
    job_files: &[JobConfigFile],
    outcome: &ReconciliationOutcome,
) -> DomainResult<Vec<PlannedJobConfig>> {
    let mut planned = Vec::new();
    for file in job_files {
        let (kept, pruned): (Vec<_>, Vec<_>) = file
            .config
            .periodics
            .iter()
            .partition(|periodic| !outcome.replaced_jobs.contains_key(&periodic.name));
        if pruned.is_empty() {
            continue;
        }
        let config = JobConfig {
            periodics: kept.into_iter().cloned().collect(),
            extra: file.config.extra.clone(),
        };
        let contents =
            serde_yaml::to_string(&config).map_err(|source| MigrationError::Serialize {
                file: file.filename.clone(),
                source,
            })?;
        planned.push(PlannedJobConfig {
            path: file.path.clone(),
            filename: file.filename.clone(),
            contents,
            pruned: pruned.len(),
        });
    }
    Ok(planned)
}
