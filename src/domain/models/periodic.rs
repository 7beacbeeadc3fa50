//! Prow periodic job definitions
//!
//! Narrow model of a `*-periodics.yaml` job-config file. The migrator reads
//! the name, schedule, and first container of each periodic; all other
//! fields ride along in `extra` so that kept jobs are written back verbatim.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

/// Name/value pair from a container's `env` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvVar {
    /// Variable name.
    pub name: String,

    /// Literal value. Empty for `valueFrom` entries.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,

    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A container in the job's pod spec.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Entrypoint.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,

    /// Arguments to the entrypoint.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Environment, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,

    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Mapping,
}

/// Pod template of a periodic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodSpec {
    /// Containers; only the first is inspected.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub containers: Vec<Container>,

    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A single periodic job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Periodic {
    /// Job name.
    pub name: String,

    /// Cron schedule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron: Option<String>,

    /// Interval schedule, e.g. `24h`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,

    /// Pod template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<PodSpec>,

    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Mapping,
}

impl Periodic {
    /// The container that runs the job, if any.
    pub fn container(&self) -> Option<&Container> {
        self.spec.as_ref().and_then(|spec| spec.containers.first())
    }

    /// First element of the container command.
    pub fn command(&self) -> Option<&str> {
        self.container()
            .and_then(|container| container.command.first())
            .map(String::as_str)
    }

    /// Container environment as a lookup table. Later entries win.
    pub fn environment(&self) -> BTreeMap<String, String> {
        self.container()
            .map(|container| {
                container
                    .env
                    .iter()
                    .map(|env| (env.name.clone(), env.value.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the container declares the named environment variable.
    pub fn declares_env(&self, name: &str) -> bool {
        self.container()
            .is_some_and(|container| container.env.iter().any(|env| env.name == name))
    }

    /// Cron expression for the migrated test: the cron if set, otherwise `@every <interval>`.
    pub fn schedule(&self) -> String {
        match self.cron.as_deref() {
            Some(cron) if !cron.is_empty() => cron.to_string(),
            _ => format!("@every {}", self.interval.as_deref().unwrap_or_default()),
        }
    }
}

/// Contents of one job-config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobConfig {
    /// Periodic jobs, in file order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub periodics: Vec<Periodic>,

    /// Presubmits, postsubmits and any other top-level keys.
    #[serde(flatten)]
    pub extra: Mapping,
}
