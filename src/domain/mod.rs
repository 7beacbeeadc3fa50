//! Domain layer for the release job migrator
//!
//! Configuration documents, the identity of legacy release jobs, and the
//! accumulators reconciliation produces. Nothing here touches the filesystem.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainResult, MigrationError};
