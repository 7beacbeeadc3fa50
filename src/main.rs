//! release-job-migrator CLI entry point.

use clap::Parser;

use release_job_migrator::cli::{commands, handle_error, report_error, Cli};
use release_job_migrator::infrastructure::config::ConfigLoader;
use release_job_migrator::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(cli.settings.as_deref()) {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };
    let logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let result = commands::migrate::execute(cli.migrate, config.migration, cli.json).await;

    if let Err(err) = result {
        report_error(&err, cli.json);
        // Flush the log file before exiting.
        drop(logger);
        std::process::exit(1);
    }
}
