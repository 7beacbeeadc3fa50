//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - Programmatic defaults
//! - Optional YAML settings file
//! - Environment variable overrides
//! - Validation after extraction

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
