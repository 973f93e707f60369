//! Init command implementation
//!
//! This module implements the `init` command for generating a starter
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "grantha.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing grantha configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, Self::starter_config()) {
            Ok(()) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} and set output.directory", self.output);
                println!("  2. Validate configuration: grantha validate-config");
                println!("  3. Run export: grantha export --input deck.json --owner <user>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Starter configuration with every setting at its default
    pub fn starter_config() -> &'static str {
        r#"# Grantha export configuration
#
# Values may reference environment variables as ${VAR_NAME}.
# Any setting can be overridden with GRANTHA_<SECTION>_<KEY>,
# e.g. GRANTHA_OUTPUT_DIRECTORY=/srv/csv

[application]
# trace | debug | info | warn | error
log_level = "info"

# Render tables in memory only
dry_run = false

[output]
# Directory receiving GranthaDeck_<owner>.csv, Grantha_<owner>.csv
# and ScannedImageAndProperties_<owner>.csv
directory = "./public/csv"

# Deadline for each table write
write_timeout_secs = 30

# Run exports for the same owner one at a time
serialize_per_owner = true

[export]
# Reject requests in which two manuscripts share an id
reject_duplicate_ids = true

# Owner used when --owner is not given
default_owner = "local"

[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "./logs"
# daily | hourly | never
local_rotation = "daily"
"#
    }
}
