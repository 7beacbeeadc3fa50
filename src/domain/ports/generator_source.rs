//! Generator table port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::GeneratorConfig;

/// Source of the generator table.
#[async_trait]
pub trait GeneratorTableSource: Send + Sync {
    /// Read and parse the table.
    async fn load(&self) -> DomainResult<GeneratorConfig>;
}
