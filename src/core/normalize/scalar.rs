//! Scalar normalization
//!
//! Pure functions that turn raw, possibly missing field values into
//! presentation-safe cells. Each field type gets its own function: free text
//! goes through [`unknown_if_blank`], counts through [`unknown_if_missing`],
//! and enum-like tokens through [`normalize_enum_token`] first.

use crate::domain::known::{Known, UNKNOWN};

/// Turns a hyphenated enum token into readable text
///
/// Hyphens become spaces, whitespace runs collapse to one space and the first
/// character is uppercased. All other characters are left untouched.
/// Missing or blank input yields an empty string; callers apply
/// [`unknown_if_blank`] afterwards.
///
/// # Examples
///
/// ```
/// use grantha_export::core::normalize::normalize_enum_token;
///
/// assert_eq!(normalize_enum_token(Some("non-stitch")), "Non stitch");
/// assert_eq!(normalize_enum_token(Some("stitch")), "Stitch");
/// assert_eq!(normalize_enum_token(None), "");
/// ```
pub fn normalize_enum_token(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let spaced = raw.replace('-', " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    capitalize_first(&joined)
}

/// Replaces a missing or whitespace-only value with `"Unknown"`
///
/// A present value is returned exactly as given, without trimming.
///
/// # Examples
///
/// ```
/// use grantha_export::core::normalize::unknown_if_blank;
///
/// assert_eq!(unknown_if_blank(None), "Unknown");
/// assert_eq!(unknown_if_blank(Some("   ")), "Unknown");
/// assert_eq!(unknown_if_blank(Some(" good ")), " good ");
/// ```
pub fn unknown_if_blank(raw: Option<&str>) -> String {
    match raw {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

/// Wraps an optional typed value, keeping its type
pub fn unknown_if_missing<T>(raw: Option<T>) -> Known<T> {
    Known::from(raw)
}

/// Placeholder for a column whose value is filled in by a later editing step
pub fn not_yet_known() -> String {
    unknown_if_blank(None)
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
