//! Application layer: use cases composed from services and ports.

pub mod migration_runner;

pub use migration_runner::MigrationRunner;
