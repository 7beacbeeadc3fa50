//! Accumulators built up while reconciling release jobs.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::build_config::{
    ImageStreamTagReference, MultiStageTestConfiguration, TestStepConfiguration,
};

/// Where an effective test definition came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestProvenance {
    /// Found in the generator table.
    GeneratorTable,
    /// Read from the configuration embedded in the job environment.
    EmbeddedConfig,
}

/// The test a release job is migrated into.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveTestDefinition {
    /// Name of the test entry, taken from the job name.
    pub test_name: String,
    /// Multi-stage definition.
    pub steps: MultiStageTestConfiguration,
    /// Base images with namespace and name defaults already applied.
    pub base_images: BTreeMap<String, ImageStreamTagReference>,
    /// Cron expression.
    pub schedule: String,
    /// Source of the definition.
    pub provenance: TestProvenance,
}

impl EffectiveTestDefinition {
    /// The `tests` entry appended to the target build configuration.
    pub fn to_test_step(&self) -> TestStepConfiguration {
        TestStepConfiguration {
            name: self.test_name.clone(),
            cron: Some(self.schedule.clone()),
            steps: Some(self.steps.clone()),
            ..Default::default()
        }
    }
}

/// New tests and base images staged for one build configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplacementRecord {
    /// Tests to append, in reconciliation order.
    pub tests: Vec<TestStepConfiguration>,
    /// Base images missing from the target file.
    pub base_images: BTreeMap<String, ImageStreamTagReference>,
}

impl ReplacementRecord {
    /// Nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty() && self.base_images.is_empty()
    }

    /// A test with this name is already staged.
    pub fn has_test(&self, name: &str) -> bool {
        self.tests.iter().any(|test| test.name == name)
    }
}

/// Old job name to the name of the job generated in its place.
pub type JobNameMapping = BTreeMap<String, String>;

/// Test names with no generator table entry.
pub type ConfiglessSet = BTreeSet<String>;

/// Everything reconciliation produced, ready for planning writes.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationOutcome {
    /// Keyed by target build configuration basename.
    pub replacements: BTreeMap<String, ReplacementRecord>,
    /// Every migrated job.
    pub replaced_jobs: JobNameMapping,
    /// Tests skipped for lack of a generator entry.
    pub configless_tests: ConfiglessSet,
}
