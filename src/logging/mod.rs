//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels (overridable through `RUST_LOG`)
//! - Human-readable console output
//! - JSON log files with rotation
//!
//! # Example
//!
//! ```no_run
//! use grantha_export::logging::init_logging;
//! use grantha_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(deck_id = "D1", "Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export operation
///
/// # Example
///
/// ```no_run
/// use grantha_export::log_export_start;
/// use grantha_export::domain::{DeckId, OwnerKey};
///
/// let deck_id = DeckId::new("D1").unwrap();
/// let owner = OwnerKey::new("u42").unwrap();
/// log_export_start!(&deck_id, &owner);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($deck_id:expr, $owner:expr) => {
        tracing::info!(
            deck_id = %$deck_id,
            owner = %$owner,
            "Starting export"
        );
    };
}

/// Log the completion of an export operation
///
/// # Example
///
/// ```no_run
/// use grantha_export::log_export_complete;
/// use std::time::Duration;
///
/// let rows = 42;
/// let duration = Duration::from_millis(15);
/// log_export_complete!(rows, duration);
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($rows:expr, $duration:expr) => {
        tracing::info!(
            rows = $rows,
            duration_ms = $duration.as_millis() as u64,
            "Export tables written"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use grantha_export::log_error_with_context;
/// use grantha_export::domain::GranthaError;
///
/// let error = GranthaError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}
