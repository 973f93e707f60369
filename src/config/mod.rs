//! Configuration management
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Configuration files support:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `GRANTHA_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use grantha_export::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("grantha.toml")?;
//!
//! println!("Output directory: {}", config.output.directory.display());
//! println!("Default owner: {}", config.export.default_owner);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level, dry run
//! - [`OutputConfig`] - output directory, write deadline, per-owner serialization
//! - [`ExportConfig`] - duplicate id policy, default owner
//! - [`LoggingConfig`] - local JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [output]
//! directory = "${GRANTHA_CSV_DIR}"
//! write_timeout_secs = 30
//!
//! [export]
//! reject_duplicate_ids = true
//! default_owner = "local"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{ApplicationConfig, ExportConfig, GranthaConfig, LoggingConfig, OutputConfig};
