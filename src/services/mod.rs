//! Migration services
//!
//! The pure parts of a migration run: placeholder substitution, test
//! resolution, reconciliation, and planning the rewrite of every store.

pub mod dashboard_rewriter;
pub mod reconciliation;
pub mod store_rewriter;
pub mod substitution;
pub mod test_resolver;

pub use dashboard_rewriter::JobNameRewriter;
pub use reconciliation::{merge_base_images, JobDisposition, ReconciliationEngine};
pub use store_rewriter::{StoreRewriter, WritePlan};
pub use test_resolver::{Resolution, TestDefinitionResolver};
