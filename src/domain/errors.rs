//! Domain error types
//!
//! This module defines the error hierarchy for the export pipeline.
//! All errors are domain-specific and don't expose third-party types.

use super::ids::Dataset;
use thiserror::Error;

/// Main error type
///
/// This is the primary error type used throughout the crate.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum GranthaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input failed validation (missing deck id, malformed image or sub-manuscript)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Output sink errors
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of a [`GranthaError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller's input or configuration was rejected
    Validation,
    /// The output sink could not persist one or more tables
    Sink,
    /// Unexpected failure during normalization or serialization
    Internal,
}

impl GranthaError {
    /// Returns the coarse error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            GranthaError::Validation(_) | GranthaError::Configuration(_) => ErrorKind::Validation,
            GranthaError::Sink(_) => ErrorKind::Sink,
            GranthaError::Serialization(_) | GranthaError::Io(_) | GranthaError::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Message that is safe to hand to an untrusted client
    ///
    /// Validation messages are returned verbatim. Sink and internal causes are
    /// replaced with a generic text; log the full error instead.
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Validation => self.to_string(),
            ErrorKind::Sink => "Failed to store exported CSV files".to_string(),
            ErrorKind::Internal => "Internal error while exporting records".to_string(),
        }
    }
}

/// Output sink errors
///
/// Errors that occur while persisting serialized tables.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Destination cannot be used (missing directory, bad permissions)
    #[error("Destination unavailable: {0}")]
    Unavailable(String),

    /// A single dataset failed to persist
    #[error("Failed to write {dataset}: {reason}")]
    WriteFailed { dataset: Dataset, reason: String },

    /// Failed to read or remove a stored dataset
    #[error("Failed to access {dataset}: {reason}")]
    AccessFailed { dataset: Dataset, reason: String },

    /// The write did not complete within the configured deadline
    #[error("Writing {dataset} timed out after {seconds}s")]
    Timeout { dataset: Dataset, seconds: u64 },

    /// Some of the tables of one export were written, others were not
    #[error("Export incomplete: {written:?} written, {} failed", failures.len())]
    Incomplete {
        written: Vec<Dataset>,
        failures: Vec<SinkFailure>,
    },
}

impl SinkError {
    /// Datasets this error reports as not persisted
    pub fn failed_datasets(&self) -> Vec<Dataset> {
        match self {
            SinkError::Unavailable(_) => Dataset::ALL.to_vec(),
            SinkError::WriteFailed { dataset, .. }
            | SinkError::AccessFailed { dataset, .. }
            | SinkError::Timeout { dataset, .. } => vec![*dataset],
            SinkError::Incomplete { failures, .. } => {
                failures.iter().map(|f| f.dataset).collect()
            }
        }
    }
}

/// One failed dataset write inside [`SinkError::Incomplete`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkFailure {
    /// Dataset that was not written
    pub dataset: Dataset,

    /// Error message
    pub message: String,
}

impl SinkFailure {
    /// Creates a new failure record
    pub fn new(dataset: Dataset, message: impl Into<String>) -> Self {
        Self {
            dataset,
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for GranthaError {
    fn from(err: std::io::Error) -> Self {
        GranthaError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GranthaError {
    fn from(err: serde_json::Error) -> Self {
        GranthaError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for GranthaError {
    fn from(err: csv::Error) -> Self {
        GranthaError::Serialization(format!("CSV error: {err}"))
    }
}

impl From<toml::de::Error> for GranthaError {
    fn from(err: toml::de::Error) -> Self {
        GranthaError::Configuration(format!("TOML parse error: {err}"))
    }
}
