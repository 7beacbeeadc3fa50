//! Resolves the test a release job should be migrated into.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::errors::{DomainResult, MigrationError};
use crate::domain::models::{
    EffectiveTestDefinition, GeneratorConfig, ImageStreamTagReference, JobIdentity,
    MigrationConfig, MultiStageTestConfiguration, Periodic, TestProvenance,
};
use crate::services::substitution::{substitute, target_from_args};

/// What resolving a single job produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The job maps onto a test definition.
    Resolved(EffectiveTestDefinition),
    /// The job runs something other than the dispatcher command.
    NonStandardCommand { command: Option<String> },
    /// No generator table entry for the job's test name.
    Configless,
}

/// The part of an embedded build configuration the resolver consumes.
#[derive(Debug, Default, Deserialize)]
struct EmbeddedBuildConfig {
    #[serde(default)]
    base_images: BTreeMap<String, ImageStreamTagReference>,
    #[serde(default)]
    tests: Vec<EmbeddedTest>,
}

#[derive(Debug, Deserialize)]
struct EmbeddedTest {
    #[serde(rename = "as")]
    name: String,
    #[serde(default)]
    steps: Option<MultiStageTestConfiguration>,
}

/// Finds the effective test definition for a periodic job, either in the
/// generator table or in the build configuration embedded in its environment.
pub struct TestDefinitionResolver<'a> {
    settings: &'a MigrationConfig,
    generator: &'a GeneratorConfig,
}

impl<'a> TestDefinitionResolver<'a> {
    /// Resolver over `generator`.
    pub const fn new(settings: &'a MigrationConfig, generator: &'a GeneratorConfig) -> Self {
        Self {
            settings,
            generator,
        }
    }

    /// Resolve the test for `job`, with image defaults applied.
    pub fn resolve(&self, identity: &JobIdentity, job: &Periodic) -> DomainResult<Resolution> {
        let command = job.command();
        if command != Some(self.settings.dispatcher_command.as_str()) {
            warn!(
                job = %job.name,
                command = command.unwrap_or_default(),
                expected = %self.settings.dispatcher_command,
                "periodic job does not run the dispatcher command, ignoring"
            );
            return Ok(Resolution::NonStandardCommand {
                command: command.map(str::to_string),
            });
        }

        let (steps, base_images, provenance) =
            if job.declares_env(&self.settings.embedded_config_env) {
                let (steps, images) = self.from_embedded_config(job)?;
                (steps, images, TestProvenance::EmbeddedConfig)
            } else {
                let Some(entry) = self.generator.get(&identity.test_name) else {
                    debug!(job = %job.name, test = %identity.test_name, "no generator entry");
                    return Ok(Resolution::Configless);
                };
                (
                    entry.steps.clone(),
                    entry.base_images.clone(),
                    TestProvenance::GeneratorTable,
                )
            };

        let base_images = base_images
            .into_iter()
            .map(|(name, image)| {
                let namespace = &self.settings.default_namespace;
                (name, image.with_defaults(namespace, &identity.version))
            })
            .collect();

        Ok(Resolution::Resolved(EffectiveTestDefinition {
            test_name: identity.test_name.clone(),
            steps,
            base_images,
            schedule: job.schedule(),
            provenance,
        }))
    }

    fn from_embedded_config(
        &self,
        job: &Periodic,
    ) -> DomainResult<(
        MultiStageTestConfiguration,
        BTreeMap<String, ImageStreamTagReference>,
    )> {
        let env = job.environment();
        let args = job
            .container()
            .map(|container| container.args.as_slice())
            .unwrap_or_default();
        let target = target_from_args(args, &env).ok_or_else(|| MigrationError::MissingTarget {
            job: job.name.clone(),
            env: self.settings.embedded_config_env.clone(),
        })?;

        let raw = env
            .get(&self.settings.embedded_config_env)
            .map(|blob| substitute(blob, &env))
            .unwrap_or_default();
        let embedded: EmbeddedBuildConfig =
            serde_yaml::from_str(&raw).map_err(|source| MigrationError::EmbeddedConfigParse {
                job: job.name.clone(),
                source,
            })?;

        // Later entries win.
        let steps = embedded
            .tests
            .into_iter()
            .rev()
            .find(|test| test.name == target)
            .and_then(|test| test.steps)
            .ok_or_else(|| MigrationError::MissingEmbeddedTest {
                job: job.name.clone(),
                target,
            })?;
        Ok((steps, embedded.base_images))
    }
}
