//! Infrastructure adapters for the configuration stores.

pub mod filesystem;
