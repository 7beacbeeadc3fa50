//! Domain errors for the release job migrator.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::models::ImageStreamTagReference;

/// Errors that abort a migration run before anything is written.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A file or directory could not be read or written.
    #[error("failed to access {path}: {source}")]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A store file is not valid YAML for its model.
    #[error("failed to unmarshal file {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },

    /// An updated document could not be serialized.
    #[error("failed to marshal updated config for file {file}: {source}")]
    Serialize {
        /// File the document was destined for.
        file: String,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },

    /// Two build configurations share a file name.
    #[error("build configuration {basename} found at both {first} and {second}")]
    DuplicateBasename {
        /// The repeated file name.
        basename: String,
        /// First location, relative to the build-config directory.
        first: PathBuf,
        /// Second location.
        second: PathBuf,
    },

    /// A job with an embedded configuration has no resolvable `--target`.
    #[error("found {env} for job {job} but could not identify target job")]
    MissingTarget {
        /// Job name.
        job: String,
        /// Name of the embedded configuration variable.
        env: String,
    },

    /// The embedded configuration is not valid YAML.
    #[error("failed to unmarshal embedded config for periodic {job}: {source}")]
    EmbeddedConfigParse {
        /// Job name.
        job: String,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The embedded configuration has no multi-stage test for the target.
    #[error("failed to identify multi-stage test configuration `{target}` for job {job}")]
    MissingEmbeddedTest {
        /// Job name.
        job: String,
        /// Test name the job's `--target` resolved to.
        target: String,
    },

    /// The target build configuration already has the test.
    #[error("error adding periodic {job}: test name {test} already exists in {file}")]
    DuplicateTest {
        /// Job being migrated.
        job: String,
        /// Test name that already exists.
        test: String,
        /// Target build configuration basename.
        file: String,
    },

    /// Two different images were requested under the same base image name.
    #[error("2 different images detected for base image {name}: ({existing}) and ({new})")]
    BaseImageConflict {
        /// Base image name.
        name: String,
        /// Image already present or staged.
        existing: ImageStreamTagReference,
        /// Image the current job requires.
        new: ImageStreamTagReference,
    },

    /// The dashboard name pattern failed to compile.
    #[error("failed to compile job name pattern: {0}")]
    NamePattern(#[from] regex::Error),

    /// A build configuration basename carries no `__variant` suffix.
    #[error("cannot derive a variant from build configuration file name {0}")]
    InvalidBasename(String),

    /// No release defaults exist for the variant identifier.
    #[error("no release defaults known for identifier `{identifier}` (file {basename})")]
    UnknownVariantIdentifier {
        /// Build configuration basename.
        basename: String,
        /// Identifier parsed from the variant.
        identifier: String,
    },
}

/// Result alias used across the domain and service layers.
pub type DomainResult<T> = Result<T, MigrationError>;

impl MigrationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
