//! Cells that may hold the "Unknown" sentinel
//!
//! A [`Known<T>`] keeps a typed value when one was supplied and serializes to
//! the literal `"Unknown"` otherwise, so numeric columns are never turned into
//! strings before they reach the CSV writer.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical placeholder for a value that is not available at export time
pub const UNKNOWN: &str = "Unknown";

/// A value or the "Unknown" sentinel
///
/// # Examples
///
/// ```
/// use grantha_export::domain::Known;
///
/// let leaves: Known<u32> = Some(20).into();
/// assert_eq!(leaves.to_string(), "20");
///
/// let images: Known<u32> = None.into();
/// assert_eq!(images.to_string(), "Unknown");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Known<T> {
    /// A supplied value
    Value(T),
    /// No value was supplied
    Unknown,
}

impl<T> From<Option<T>> for Known<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Known::Value(v),
            None => Known::Unknown,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Known<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Known::Value(v) => v.fmt(f),
            Known::Unknown => f.write_str(UNKNOWN),
        }
    }
}

impl<T: Serialize> Serialize for Known<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Known::Value(v) => v.serialize(serializer),
            Known::Unknown => serializer.serialize_str(UNKNOWN),
        }
    }
}

impl<'de, T> Deserialize<'de> for Known<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == UNKNOWN {
            return Ok(Known::Unknown);
        }
        trimmed
            .parse::<T>()
            .map(Known::Value)
            .map_err(|e| de::Error::custom(format!("invalid value {trimmed:?}: {e}")))
    }
}
