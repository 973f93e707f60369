//! Clear command implementation
//!
//! Deletes an owner's stored tables, typically after they were imported.

use super::{exit_code_for, resolve_owner, EXIT_CONFIG};
use crate::adapters::sink::FilesystemSink;
use crate::config::load_config;
use crate::core::export::{ExportCoordinator, ExportOptions};
use clap::Args;
use std::sync::Arc;

/// Arguments for the clear command
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Owner key (defaults to export.default_owner)
    #[arg(long)]
    pub owner: Option<String>,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl ClearArgs {
    /// Execute the clear command
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

        if !self.yes {
            print!(
                "Delete all tables for {owner} in {}? [y/N]: ",
                config.output.directory.display()
            );
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Clear cancelled.");
                return Ok(0);
            }
        }

        // dry_run does not apply: clearing always targets the output directory
        let coordinator = ExportCoordinator::new(
            Arc::new(FilesystemSink::new(&config.output.directory)),
            ExportOptions::from_config(&config),
        );

        match coordinator.clear(&owner).await {
            Ok(removed) if removed.is_empty() => {
                println!("Nothing to clear for {owner}");
                Ok(0)
            }
            Ok(removed) => {
                for dataset in &removed {
                    println!("🗑️  Removed {}", dataset.artifact_name(&owner));
                }
                println!("✅ Cleared {} table(s)", removed.len());
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, owner = %owner, "Clear failed");
                println!("❌ Failed to clear tables: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}
