//! Field normalization
//!
//! Pure helpers used by the record builders:
//!
//! - [`scalar`] - sentinel filling and enum token formatting
//! - [`image`] - image name, file format and resolution derivation

pub mod image;
pub mod scalar;

pub use image::{file_format, resolution_dpi, strip_extension};
pub use scalar::{normalize_enum_token, not_yet_known, unknown_if_blank, unknown_if_missing};
