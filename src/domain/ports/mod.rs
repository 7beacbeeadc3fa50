//! Port trait definitions (Hexagonal Architecture)
//!
//! Interfaces over the stores the migrator reads and rewrites:
//! - BuildConfigRepository: ci-operator build configurations keyed by basename
//! - JobConfigRepository: prow periodic job-config files
//! - DashboardRepository: release-controller configuration files
//! - GeneratorTableSource: the generator lookup table

pub mod build_config_repository;
pub mod dashboard_repository;
pub mod generator_source;
pub mod job_config_repository;

pub use build_config_repository::{BuildConfigRepository, StoredBuildConfig};
pub use dashboard_repository::{DashboardFile, DashboardRepository};
pub use generator_source::GeneratorTableSource;
pub use job_config_repository::{JobConfigFile, JobConfigRepository};
