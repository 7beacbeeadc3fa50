//! Migrator settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for the migrator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Naming conventions and store layout
    #[serde(default)]
    pub migration: MigrationConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for an additional JSON log file
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}

/// How old job names are replaced inside dashboard configs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionMode {
    /// Replace every occurrence, longest name first
    #[default]
    Literal,
    /// Replace only occurrences not adjacent to other job-name characters
    TokenBoundary,
}

/// Conventions of the release repository being migrated
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MigrationConfig {
    /// Organization of the generated build configurations
    #[serde(default = "default_org")]
    pub org: String,

    /// Repository of the generated build configurations
    #[serde(default = "default_repo")]
    pub repo: String,

    /// Branch of the generated build configurations
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Name prefix identifying legacy release jobs
    #[serde(default = "default_job_prefix")]
    pub job_prefix: String,

    /// Prefix of generated periodic job names
    #[serde(default = "default_periodic_prefix")]
    pub periodic_prefix: String,

    /// The only command a migratable job may run
    #[serde(default = "default_dispatcher_command")]
    pub dispatcher_command: String,

    /// Environment variable holding an embedded build configuration
    #[serde(default = "default_embedded_config_env")]
    pub embedded_config_env: String,

    /// File name suffix of periodic job-config files
    #[serde(default = "default_periodic_suffix")]
    pub periodic_suffix: String,

    /// Namespace for base images that do not name one
    #[serde(default = "default_namespace")]
    pub default_namespace: String,

    /// Dashboard rewrite strategy
    #[serde(default)]
    pub dashboard_substitution: SubstitutionMode,
}

fn default_org() -> String {
    "openshift".to_string()
}

fn default_repo() -> String {
    "release".to_string()
}

fn default_branch() -> String {
    "master".to_string()
}

fn default_job_prefix() -> String {
    "release-openshift-".to_string()
}

fn default_periodic_prefix() -> String {
    "periodic".to_string()
}

fn default_dispatcher_command() -> String {
    "ci-operator".to_string()
}

fn default_embedded_config_env() -> String {
    "UNRESOLVED_CONFIG".to_string()
}

fn default_periodic_suffix() -> String {
    "-periodics.yaml".to_string()
}

fn default_namespace() -> String {
    "ocp".to_string()
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            org: default_org(),
            repo: default_repo(),
            branch: default_branch(),
            job_prefix: default_job_prefix(),
            periodic_prefix: default_periodic_prefix(),
            dispatcher_command: default_dispatcher_command(),
            embedded_config_env: default_embedded_config_env(),
            periodic_suffix: default_periodic_suffix(),
            default_namespace: default_namespace(),
            dashboard_substitution: SubstitutionMode::default(),
        }
    }
}
