//! Settings loading and validation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use thiserror::Error;

use crate::domain::models::config::Config;

/// Prefix for environment overrides, e.g. `MIGRATOR_MIGRATION__ORG`.
pub const ENV_PREFIX: &str = "MIGRATOR_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `logging.level` is not a known level.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// `logging.format` is neither `json` nor `pretty`.
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    /// A required `migration` setting is empty.
    #[error("Setting migration.{0} cannot be empty")]
    EmptySetting(&'static str),

    /// `migration.job_prefix` does not end with `-`.
    #[error("Invalid job_prefix: {0}. Must end with '-'")]
    InvalidJobPrefix(String),

    /// The `--settings` path does not exist.
    #[error("Settings file not found: {0}")]
    MissingSettingsFile(PathBuf),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. The settings file, when one is given
    /// 3. Environment variables (MIGRATOR_* prefix, `__` separates sections)
    pub fn load(settings: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(path) = settings {
            if !path.is_file() {
                return Err(ConfigError::MissingSettingsFile(path.to_path_buf()).into());
            }
            figment = figment.merge(Yaml::file(path));
        }

        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let migration = &config.migration;
        let required = [
            ("org", &migration.org),
            ("repo", &migration.repo),
            ("branch", &migration.branch),
            ("job_prefix", &migration.job_prefix),
            ("periodic_prefix", &migration.periodic_prefix),
            ("dispatcher_command", &migration.dispatcher_command),
            ("embedded_config_env", &migration.embedded_config_env),
            ("periodic_suffix", &migration.periodic_suffix),
            ("default_namespace", &migration.default_namespace),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(ConfigError::EmptySetting(*name));
        }

        if !migration.job_prefix.ends_with('-') {
            return Err(ConfigError::InvalidJobPrefix(migration.job_prefix.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::SubstitutionMode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn settings_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write settings");
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.migration.job_prefix, "release-openshift-");
        assert_eq!(config.migration.dispatcher_command, "ci-operator");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
logging:
  level: debug
migration:
  branch: main
  dashboard_substitution: token_boundary
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.migration.branch, "main");
        assert_eq!(config.migration.org, "openshift");
        assert_eq!(
            config.migration.dashboard_substitution,
            SubstitutionMode::TokenBoundary
        );
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(level)) if level == "verbose"
        ));
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn test_validate_empty_setting() {
        let mut config = Config::default();
        config.migration.embedded_config_env = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptySetting("embedded_config_env"))
        ));
    }

    #[test]
    fn test_validate_job_prefix_separator() {
        let mut config = Config::default();
        config.migration.job_prefix = "release-openshift".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidJobPrefix(_))
        ));
    }

    #[test]
    fn test_missing_settings_file() {
        let err = ConfigLoader::load(Some(Path::new("/nonexistent/settings.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Settings file not found"));
    }

    #[test]
    fn test_settings_file_and_env_override() {
        let file = settings_file("migration:\n  org: my-org\n  repo: my-repo\n");

        temp_env::with_vars(
            [
                ("MIGRATOR_MIGRATION__REPO", Some("env-repo")),
                ("MIGRATOR_LOGGING__LEVEL", Some("warn")),
            ],
            || {
                let config = ConfigLoader::load(Some(file.path())).expect("config should load");
                assert_eq!(config.migration.org, "my-org");
                assert_eq!(config.migration.repo, "env-repo");
                assert_eq!(config.logging.level, "warn");
            },
        );
    }

    #[test]
    fn test_invalid_settings_file_fails_validation() {
        let file = settings_file("migration:\n  job_prefix: release\n");
        temp_env::with_vars_unset(["MIGRATOR_MIGRATION__JOB_PREFIX"], || {
            assert!(ConfigLoader::load(Some(file.path())).is_err());
        });
    }
}
