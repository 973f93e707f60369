//! Export command implementation
//!
//! This module implements the `export` command: read one deck request from
//! a JSON file and write its three CSV tables for an owner.

use super::{exit_code_for, resolve_owner, EXIT_CONFIG, EXIT_FATAL, EXIT_SINK};
use crate::config::load_config;
use crate::core::export::{ExportCoordinator, ExportOutcome};
use crate::domain::{Dataset, ExportRequest, GranthaError};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// JSON file with the deck request (camelCase payload)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Owner key for the artifact set (defaults to export.default_owner)
    #[arg(long)]
    pub owner: Option<String>,

    /// Dry run mode - render tables in memory without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Print only the result envelope as JSON
    #[arg(long)]
    pub json: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Starting export command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let owner = match resolve_owner(self.owner.as_deref(), &config) {
            Ok(o) => o,
            Err(e) => {
                eprintln!("Invalid owner: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let payload = match tokio::fs::read_to_string(&self.input).await {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, input = %self.input.display(), "Failed to read input");
                eprintln!("Failed to read {}: {e}", self.input.display());
                return Ok(EXIT_CONFIG);
            }
        };

        let request = match ExportRequest::from_json(&payload) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("{e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let dry_run = self.dry_run || config.application.dry_run;
        if dry_run && !self.json {
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        let coordinator = match ExportCoordinator::from_config(&config, dry_run).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(EXIT_SINK);
            }
        };

        let outcome = match coordinator.export(&owner, &request).await {
            Ok(o) => o,
            Err(e) => {
                report_failure(&e);
                return Ok(exit_code_for(&e));
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&outcome.envelope)?);
        } else {
            print_outcome(&outcome);
        }

        Ok(0)
    }
}

fn report_failure(error: &GranthaError) {
    tracing::error!(error = %error, "Export failed");
    eprintln!("❌ Export failed: {error}");

    if let GranthaError::Sink(sink_error) = error {
        let failed = sink_error.failed_datasets();
        if !failed.is_empty() {
            eprintln!("   Not written:");
            for dataset in failed {
                eprintln!("     - {} ({})", dataset, dataset.table_name());
            }
        }
    }

    if exit_code_for(error) == EXIT_FATAL {
        eprintln!("   {}", error.public_message());
    }
}

fn print_outcome(outcome: &ExportOutcome) {
    let summary = &outcome.summary;

    println!("✅ {}", outcome.envelope.message);
    println!();
    println!("📊 Export Summary:");
    println!("  Deck: {}", summary.deck_id);
    println!("  Owner: {}", summary.owner);
    for dataset in Dataset::ALL {
        if let Some(table) = summary.table(dataset) {
            println!(
                "  {}: {} rows, {} bytes",
                dataset.table_name(),
                table.rows,
                table.bytes
            );
            println!("    → {}", outcome.envelope.files.get(dataset));
            println!("    sha256 {}", table.checksum);
        }
    }
    println!("  Duration: {:.3}s", summary.duration.as_secs_f64());
    println!();
}
