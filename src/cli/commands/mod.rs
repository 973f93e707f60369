//! CLI command implementations
//!
//! Every command returns a process exit code:
//! - `0` success
//! - `2` configuration or validation error
//! - `4` output sink error
//! - `5` fatal error

pub mod clear;
pub mod export;
pub mod init;
pub mod inspect;
pub mod validate;

use crate::config::GranthaConfig;
use crate::domain::{ErrorKind, GranthaError, OwnerKey};

/// Exit code for configuration and validation errors
pub const EXIT_CONFIG: i32 = 2;

/// Exit code for output sink errors
pub const EXIT_SINK: i32 = 4;

/// Exit code for anything else
pub const EXIT_FATAL: i32 = 5;

/// Exit code matching an error's kind
pub fn exit_code_for(error: &GranthaError) -> i32 {
    match error.kind() {
        ErrorKind::Validation => EXIT_CONFIG,
        ErrorKind::Sink => EXIT_SINK,
        ErrorKind::Internal => EXIT_FATAL,
    }
}

/// The `--owner` argument, or `export.default_owner` when absent
pub fn resolve_owner(arg: Option<&str>, config: &GranthaConfig) -> Result<OwnerKey, String> {
    OwnerKey::new(arg.unwrap_or(&config.export.default_owner))
}
