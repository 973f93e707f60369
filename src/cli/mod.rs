//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Grantha Export - palm-leaf manuscript deck CSV exporter
#[derive(Parser, Debug)]
#[command(name = "grantha")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "grantha.toml", env = "GRANTHA_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GRANTHA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export one deck as three CSV tables
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Show the tables currently stored for an owner
    Inspect(commands::inspect::InspectArgs),

    /// Delete the tables stored for an owner
    Clear(commands::clear::ClearArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["grantha", "export", "--input", "deck.json"]);
        assert_eq!(cli.config, "grantha.toml");
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.input.to_str(), Some("deck.json"));
                assert!(args.owner.is_none());
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_export_requires_input() {
        assert!(Cli::try_parse_from(["grantha", "export"]).is_err());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["grantha", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["grantha", "--log-level", "debug", "inspect"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::Inspect(_)));
    }

    #[test]
    fn test_cli_parse_clear() {
        let cli = Cli::parse_from(["grantha", "clear", "--owner", "u42", "--yes"]);
        match cli.command {
            Commands::Clear(args) => {
                assert_eq!(args.owner.as_deref(), Some("u42"));
                assert!(args.yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["grantha", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
