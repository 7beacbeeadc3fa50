//! The migration use case.

use crate::domain::models::{MigrationConfig, MigrationReport};
use crate::domain::ports::{
    BuildConfigRepository, DashboardRepository, GeneratorTableSource, JobConfigRepository,
};
use crate::services::{ReconciliationEngine, StoreRewriter};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, instrument};

/// Drives one migration run over the four stores.
///
/// Every input is loaded before anything is validated, and the full write
/// plan is built before anything is written. A failure at any point before
/// the apply phase leaves all stores untouched.
pub struct MigrationRunner {
    settings: MigrationConfig,
    generator: Arc<dyn GeneratorTableSource>,
    build_configs: Arc<dyn BuildConfigRepository>,
    job_configs: Arc<dyn JobConfigRepository>,
    dashboards: Arc<dyn DashboardRepository>,
}

impl MigrationRunner {
    /// Wire a runner to its stores.
    pub fn new(
        settings: MigrationConfig,
        generator: Arc<dyn GeneratorTableSource>,
        build_configs: Arc<dyn BuildConfigRepository>,
        job_configs: Arc<dyn JobConfigRepository>,
        dashboards: Arc<dyn DashboardRepository>,
    ) -> Self {
        Self {
            settings,
            generator,
            build_configs,
            job_configs,
            dashboards,
        }
    }

    /// Load, reconcile, plan, and unless `dry_run` is set, apply.
    #[instrument(skip(self))]
    pub async fn run(&self, dry_run: bool) -> Result<MigrationReport> {
        let generator = self
            .generator
            .load()
            .await
            .context("Failed to load generator config")?;
        let existing = self
            .build_configs
            .load_all()
            .await
            .context("Failed to load ci-operator configs")?;
        let job_files = self
            .job_configs
            .load_periodics()
            .await
            .context("Failed to load periodic job configs")?;
        let dashboards = self
            .dashboards
            .load_all()
            .await
            .context("Failed to load release-controller configs")?;
        info!(
            build_configs = existing.len(),
            job_files = job_files.len(),
            dashboards = dashboards.len(),
            "loaded stores"
        );

        let mut engine = ReconciliationEngine::new(&self.settings, &generator, &existing);
        engine.process_files(&job_files)?;
        let outcome = engine.finish();

        let plan = StoreRewriter::new(&self.settings)
            .plan(&existing, &job_files, &dashboards, &outcome)
            .context("Failed to prepare updated configs")?;

        if dry_run {
            info!("dry run, skipping writes");
        } else {
            StoreRewriter::apply(
                &plan,
                self.build_configs.as_ref(),
                self.job_configs.as_ref(),
                self.dashboards.as_ref(),
            )
            .await
            .context("Failed to write updated configs")?;
        }

        Ok(MigrationReport::new(
            &outcome.replaced_jobs,
            &outcome.configless_tests,
            plan.summary(),
            dry_run,
        ))
    }
}
