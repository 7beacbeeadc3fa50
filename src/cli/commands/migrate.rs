//! Implementation of the migration command.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::filesystem::{
    FsBuildConfigRepository, FsDashboardRepository, FsGeneratorTable, FsJobConfigRepository,
};
use crate::application::MigrationRunner;
use crate::cli::output::output;
use crate::domain::models::MigrationConfig;

/// Locations of the four stores.
#[derive(Args, Debug, Clone)]
pub struct MigrateArgs {
    /// Generator config mapping test names to multi-stage steps
    #[arg(long, value_name = "PATH")]
    pub config: PathBuf,

    /// Directory of ci-operator configs, searched recursively
    #[arg(long, value_name = "DIR")]
    pub ci_op_configs: PathBuf,

    /// Directory of prow job configs containing the periodics to migrate
    #[arg(long, value_name = "DIR")]
    pub jobs: PathBuf,

    /// Directory of release-controller configs
    #[arg(long, value_name = "DIR")]
    pub rc_configs: PathBuf,

    /// Validate and report without writing any file
    #[arg(long)]
    pub dry_run: bool,
}

/// Run one migration over the stores named on the command line and print the report.
pub async fn execute(
    args: MigrateArgs,
    settings: MigrationConfig,
    json_mode: bool,
) -> Result<()> {
    let job_configs = FsJobConfigRepository::new(&args.jobs, settings.periodic_suffix.clone());
    let runner = MigrationRunner::new(
        settings,
        Arc::new(FsGeneratorTable::new(&args.config)),
        Arc::new(FsBuildConfigRepository::new(&args.ci_op_configs)),
        Arc::new(job_configs),
        Arc::new(FsDashboardRepository::new(&args.rc_configs)),
    );

    let report = runner.run(args.dry_run).await?;
    output(&report, json_mode);
    Ok(())
}
