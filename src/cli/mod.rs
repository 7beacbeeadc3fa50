//! Command-line interface.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::cli::commands::migrate::MigrateArgs;

/// Move legacy release-controller periodics into generated ci-operator tests.
#[derive(Parser, Debug)]
#[command(name = "release-job-migrator", version, about)]
pub struct Cli {
    /// Store locations and run mode.
    #[command(flatten)]
    pub migrate: MigrateArgs,

    /// Optional migrator settings file (YAML)
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Log a fatal error and print it to stderr.
pub fn report_error(err: &anyhow::Error, json_mode: bool) {
    let message = format!("{err:#}");
    tracing::error!(error = %message, "migration failed");
    if json_mode {
        let body = serde_json::json!({ "success": false, "error": message });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {message}");
    }
}

/// Report a fatal error and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    report_error(&err, json_mode);
    std::process::exit(1);
}
