//! Inspect command implementation
//!
//! Reads back an owner's stored tables and reports rows, size and checksum.

use super::{exit_code_for, resolve_owner, EXIT_CONFIG};
use crate::adapters::sink::FilesystemSink;
use crate::config::load_config;
use crate::core::export::{ExportCoordinator, ExportOptions};
use clap::Args;
use std::sync::Arc;

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Owner key (defaults to export.default_owner)
    #[arg(long)]
    pub owner: Option<String>,
}

impl InspectArgs {
    /// Execute the inspect command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let owner = match resolve_owner(self.owner.as_deref(), &config) {
            Ok(o) => o,
            Err(e) => {
                println!("❌ Invalid owner: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let sink = FilesystemSink::new(&config.output.directory);
        let coordinator =
            ExportCoordinator::new(Arc::new(sink.clone()), ExportOptions::from_config(&config));

        tracing::info!(owner = %owner, directory = %sink.directory().display(), "Inspecting tables");

        let stored = match coordinator.inspect(&owner).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Inspect failed");
                println!("❌ Failed to read tables: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        println!("📊 Tables for {owner} in {}", sink.directory().display());
        println!();
        for (dataset, report) in &stored {
            match report {
                Some(table) => {
                    println!(
                        "  {}: {} rows, {} bytes",
                        dataset.table_name(),
                        table.rows,
                        table.bytes
                    );
                    println!("    sha256 {}", table.checksum);
                }
                None => println!("  {}: not found", dataset.table_name()),
            }
        }
        println!();

        Ok(0)
    }
}
