//! release-job-migrator - move legacy release periodics into ci-operator configs
//!
//! Legacy release-controller periodics are matched by name, resolved to a
//! multi-stage test definition, and appended as tests to the build
//! configuration of their variant. The periodic is then removed from its
//! job-config file and renamed in every release-controller config.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, errors, and store ports
//! - **Service Layer** (`services`): Resolution, reconciliation, and rewriting
//! - **Application Layer** (`application`): The migration run
//! - **Adapters** (`adapters`): Filesystem implementations of the ports
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::MigrationRunner;
pub use domain::errors::{DomainResult, MigrationError};
pub use domain::models::{Config, JobIdentity, LoggingConfig, MigrationConfig, MigrationReport};
pub use infrastructure::config::{ConfigError, ConfigLoader};
