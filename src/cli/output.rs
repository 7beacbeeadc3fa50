//! Output formatting utilities for the CLI.

use serde::Serialize;

use crate::domain::models::MigrationReport;

const REGENERATE_HINT: &str = concat!(
    "Please run `make update` to regenerate job configs ",
    "using the updated ci-operator configs."
);

/// A command result that renders for humans or as JSON.
pub trait CommandOutput: Serialize {
    /// Plain-text rendering.
    fn to_human(&self) -> String;
    /// Machine-readable rendering.
    fn to_json(&self) -> serde_json::Value;
}

/// Print a command result to stdout in the selected mode.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        let rendered = serde_json::to_string_pretty(&result.to_json()).unwrap_or_default();
        println!("{rendered}");
    } else {
        println!("{}", result.to_human());
    }
}

impl CommandOutput for MigrationReport {
    fn to_human(&self) -> String {
        if self.is_noop() {
            return "No non-generated release-controller jobs detected.".to_string();
        }

        let mut lines = Vec::new();
        if self.replaced_jobs.is_empty() {
            lines.push("No jobs detected with matching config.".to_string());
        } else {
            lines.push("The following jobs have been replaced:".to_string());
            for job in &self.replaced_jobs {
                lines.push(format!("{} -> {}", job.old_name, job.new_name));
            }
        }

        if !self.configless_tests.is_empty() {
            lines.push(String::new());
            lines.push(
                "The following tests do not have entries in the generator config:".to_string(),
            );
            lines.push(format!("[{}]", self.configless_tests.join(" ")));
        }

        if !self.replaced_jobs.is_empty() {
            lines.push(String::new());
            lines.push(REGENERATE_HINT.to_string());
        }

        if self.dry_run {
            lines.push(String::new());
            lines.push("Dry run: no files were written.".to_string());
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
