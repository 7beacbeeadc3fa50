//! Generator lookup table
//!
//! Maps a release test name to the multi-stage configuration it should be
//! migrated to. Parsed strictly: unknown keys are rejected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::build_config::{ImageStreamTagReference, MultiStageTestConfiguration};

/// The generator table: multi-stage definitions for legacy release tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Configuration needed for each test name.
    #[serde(default, rename = "config")]
    pub configs: BTreeMap<String, GeneratorEntry>,
}

/// One row of the generator table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorEntry {
    /// Multi-stage test configuration to use for the job.
    pub steps: MultiStageTestConfiguration,

    /// Images the test relies on. An omitted `name` or `namespace` is filled
    /// in from the job name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub base_images: BTreeMap<String, ImageStreamTagReference>,
}

impl GeneratorConfig {
    /// Entry for a test name.
    pub fn get(&self, test_name: &str) -> Option<&GeneratorEntry> {
        self.configs.get(test_name)
    }
}
