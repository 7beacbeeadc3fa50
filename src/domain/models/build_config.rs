//! ci-operator build configuration model
//!
//! Only the parts of a `ReleaseBuildConfiguration` the migrator reads or
//! writes are typed. Everything else is carried in `extra` maps so a file
//! loaded and written back keeps the keys it had.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Reference to an image stream tag, used for `base_images` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageStreamTagReference {
    /// Image stream namespace, e.g. `ocp`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    /// Image stream name, usually the release version.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Tag within the image stream.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,

    /// Optional `as` alias.
    #[serde(default, rename = "as", skip_serializing_if = "String::is_empty")]
    pub alias: String,
}

impl ImageStreamTagReference {
    /// Fill in an empty namespace and name.
    ///
    /// Generator entries may omit both; they are resolved against the
    /// canonical namespace and the version parsed from the job name.
    #[must_use]
    pub fn with_defaults(mut self, namespace: &str, version: &str) -> Self {
        if self.namespace.is_empty() {
            self.namespace = namespace.to_string();
        }
        if self.name.is_empty() {
            self.name = version.to_string();
        }
        self
    }
}

impl fmt::Display for ImageStreamTagReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.namespace, self.name, self.tag)?;
        if !self.alias.is_empty() {
            write!(f, " as {}", self.alias)?;
        }
        Ok(())
    }
}

/// Multi-stage test definition. Step entries stay opaque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiStageTestConfiguration {
    /// Cluster profile the test provisions against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_profile: Option<String>,

    /// Named workflow supplying the default steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<String>,

    /// Parameters passed to the steps.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    /// Setup steps.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre: Vec<Value>,

    /// Test steps.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub test: Vec<Value>,

    /// Teardown steps.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post: Vec<Value>,

    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Mapping,
}

/// One entry of a build configuration's `tests` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestStepConfiguration {
    /// Test name, serialized as `as`.
    #[serde(rename = "as")]
    pub name: String,

    /// Cron schedule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron: Option<String>,

    /// Interval schedule, used when there is no cron.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,

    /// Multi-stage definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<MultiStageTestConfiguration>,

    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A release candidate a configuration resolves its payload from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// `ocp` or `okd`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub product: String,

    /// Release stream, e.g. `nightly`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub stream: String,

    /// Release version, e.g. `4.8`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,

    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A named entry under `releases`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnresolvedRelease {
    /// Candidate release, when the entry is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<Candidate>,

    /// Other release sources.
    #[serde(flatten)]
    pub extra: Mapping,
}

/// Resource requests and limits for a step or container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequirements {
    /// Requested quantities by resource name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub requests: BTreeMap<String, String>,

    /// Limits by resource name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub limits: BTreeMap<String, String>,
}

/// Identifies the repository, branch, and variant a configuration is for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// GitHub organization.
    pub org: String,
    /// Repository name.
    pub repo: String,
    /// Branch the configuration builds.
    pub branch: String,

    /// Variant suffix, empty for the main configuration.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub variant: String,
}

impl Metadata {
    /// File name of the configuration this metadata describes.
    pub fn basename(&self) -> String {
        let variant = if self.variant.is_empty() {
            String::new()
        } else {
            format!("__{}", self.variant)
        };
        format!("{}-{}-{}{}.yaml", self.org, self.repo, self.branch, variant)
    }

    /// Full name of a generated job, e.g. `periodic-ci-openshift-release-master-ocp-4.8-e2e-aws`.
    pub fn job_name(&self, prefix: &str, test: &str) -> String {
        let variant = if self.variant.is_empty() {
            String::new()
        } else {
            format!("-{}", self.variant)
        };
        format!(
            "{prefix}-ci-{}-{}-{}{variant}-{test}",
            self.org, self.repo, self.branch
        )
    }
}

/// A ci-operator configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseBuildConfiguration {
    /// Images imported into the test namespace, by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub base_images: BTreeMap<String, ImageStreamTagReference>,

    /// Release payloads, by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub releases: BTreeMap<String, UnresolvedRelease>,

    /// Resource requirements, by step name or `*`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, ResourceRequirements>,

    /// Test entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tests: Vec<TestStepConfiguration>,

    /// Identity of the file, filled in by the config tooling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zz_generated_metadata: Option<Metadata>,

    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Mapping,
}

impl ReleaseBuildConfiguration {
    /// Look up a test entry by its `as` name.
    pub fn test(&self, name: &str) -> Option<&TestStepConfiguration> {
        self.tests.iter().find(|test| test.name == name)
    }
}
