//! Domain models: store documents, settings, and run results.

pub mod build_config;
pub mod config;
pub mod generator;
pub mod job_identity;
pub mod periodic;
pub mod replacement;
pub mod report;
pub mod variant_defaults;

pub use build_config::{
    Candidate, ImageStreamTagReference, Metadata, MultiStageTestConfiguration,
    ReleaseBuildConfiguration, ResourceRequirements, TestStepConfiguration, UnresolvedRelease,
};
pub use config::{Config, LoggingConfig, MigrationConfig, SubstitutionMode};
pub use generator::{GeneratorConfig, GeneratorEntry};
pub use job_identity::JobIdentity;
pub use periodic::{Container, EnvVar, JobConfig, Periodic, PodSpec};
pub use replacement::{
    ConfiglessSet, EffectiveTestDefinition, JobNameMapping, ReconciliationOutcome,
    ReplacementRecord, TestProvenance,
};
pub use report::{MigrationReport, ReplacedJob, WriteSummary};
pub use variant_defaults::{default_build_config, ReleaseProduct, ReleaseStream, VariantDefaults};
