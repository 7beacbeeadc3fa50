//! Reconciliation of release jobs against existing build configurations.
//!
//! Every candidate job is routed to the build configuration of its variant.
//! The engine stages the job's test and base images on a per-file record and
//! refuses anything that would overwrite or duplicate existing state.

use std::collections::BTreeMap;

use tracing::{debug, info, instrument};

use crate::domain::errors::{DomainResult, MigrationError};
use crate::domain::models::{
    default_build_config, ConfiglessSet, GeneratorConfig, ImageStreamTagReference, JobIdentity,
    JobNameMapping, MigrationConfig, Periodic, ReconciliationOutcome, ReleaseBuildConfiguration,
    ReplacementRecord,
};
use crate::domain::ports::{JobConfigFile, StoredBuildConfig};
use crate::services::test_resolver::{Resolution, TestDefinitionResolver};

/// What happened to a single periodic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobDisposition {
    /// The name does not follow the release job pattern.
    NotCandidate,
    /// The job does not run the dispatcher command.
    NonStandardCommand,
    /// No generator entry for the test.
    Configless,
    /// The job's test was staged.
    Migrated {
        /// Target build configuration.
        basename: String,
        /// Name of the generated job.
        new_name: String,
    },
}

/// Merge `new_images` into `staged`.
///
/// An image already staged, or already present in `existing`, must match the
/// new one exactly. Images seen for the first time are staged.
pub fn merge_base_images(
    new_images: &BTreeMap<String, ImageStreamTagReference>,
    existing: Option<&BTreeMap<String, ImageStreamTagReference>>,
    staged: &mut BTreeMap<String, ImageStreamTagReference>,
) -> DomainResult<()> {
    for (name, image) in new_images {
        let known = staged
            .get(name)
            .or_else(|| existing.and_then(|images| images.get(name)));
        match known {
            Some(known) if known != image => {
                return Err(MigrationError::BaseImageConflict {
                    name: name.clone(),
                    existing: known.clone(),
                    new: image.clone(),
                });
            }
            Some(_) => {}
            None => {
                staged.insert(name.clone(), image.clone());
            }
        }
    }
    Ok(())
}

/// Stages migrated tests and accumulates the job name mapping for one run.
pub struct ReconciliationEngine<'a> {
    settings: &'a MigrationConfig,
    existing: &'a BTreeMap<String, StoredBuildConfig>,
    resolver: TestDefinitionResolver<'a>,
    /// Default configurations for basenames with no existing file.
    synthesized: BTreeMap<String, ReleaseBuildConfiguration>,
    replacements: BTreeMap<String, ReplacementRecord>,
    replaced_jobs: JobNameMapping,
    configless_tests: ConfiglessSet,
}

impl<'a> ReconciliationEngine<'a> {
    /// Engine over the loaded generator table and build configurations.
    pub fn new(
        settings: &'a MigrationConfig,
        generator: &'a GeneratorConfig,
        existing: &'a BTreeMap<String, StoredBuildConfig>,
    ) -> Self {
        Self {
            settings,
            existing,
            resolver: TestDefinitionResolver::new(settings, generator),
            synthesized: BTreeMap::new(),
            replacements: BTreeMap::new(),
            replaced_jobs: JobNameMapping::new(),
            configless_tests: ConfiglessSet::new(),
        }
    }

    /// Process every periodic of every file, in order.
    pub fn process_files(&mut self, files: &[JobConfigFile]) -> DomainResult<()> {
        for file in files {
            debug!(
                file = %file.filename,
                periodics = file.config.periodics.len(),
                "reconciling job file"
            );
            for periodic in &file.config.periodics {
                self.process_job(periodic)?;
            }
        }
        Ok(())
    }

    /// Route one periodic to its target configuration and stage its test.
    ///
    /// Fails when the test already exists in the target or a base image
    /// conflicts with one already known for it.
    #[instrument(skip_all, fields(job = %job.name))]
    pub fn process_job(&mut self, job: &Periodic) -> DomainResult<JobDisposition> {
        let Some(identity) = JobIdentity::parse(&job.name, &self.settings.job_prefix) else {
            debug!("not a release job");
            return Ok(JobDisposition::NotCandidate);
        };

        let definition = match self.resolver.resolve(&identity, job)? {
            Resolution::Resolved(definition) => definition,
            Resolution::NonStandardCommand { .. } => return Ok(JobDisposition::NonStandardCommand),
            Resolution::Configless => {
                self.configless_tests.insert(identity.test_name);
                return Ok(JobDisposition::Configless);
            }
        };

        let basename = identity.target_basename(self.settings);
        let stored: &'a BTreeMap<String, StoredBuildConfig> = self.existing;
        let target = if let Some(stored) = stored.get(&basename) {
            &stored.config
        } else {
            if !self.synthesized.contains_key(&basename) {
                let config = default_build_config(&basename, self.settings)?;
                self.synthesized.insert(basename.clone(), config);
            }
            &self.synthesized[&basename]
        };
        let record = self.replacements.entry(basename.clone()).or_default();

        merge_base_images(
            &definition.base_images,
            Some(&target.base_images),
            &mut record.base_images,
        )?;

        if record.has_test(&definition.test_name) || target.test(&definition.test_name).is_some() {
            return Err(MigrationError::DuplicateTest {
                job: job.name.clone(),
                test: definition.test_name,
                file: basename,
            });
        }

        record.tests.push(definition.to_test_step());
        let new_name = identity.new_job_name(self.settings);
        info!(
            file = %basename,
            test = %definition.test_name,
            new_job = %new_name,
            source = ?definition.provenance,
            "staged migrated test"
        );
        self.replaced_jobs.insert(job.name.clone(), new_name.clone());
        Ok(JobDisposition::Migrated { basename, new_name })
    }

    /// Consume the engine, yielding everything staged.
    pub fn finish(self) -> ReconciliationOutcome {
        ReconciliationOutcome {
            replacements: self.replacements,
            replaced_jobs: self.replaced_jobs,
            configless_tests: self.configless_tests,
        }
    }
}
