//! Deck counts exactly as the client supplied them
//!
//! Leaf and image counts are typed by hand on the upload form. Whatever
//! arrives is exported unchanged: numbers stay numbers (fractional, negative
//! or larger than any machine word included) and text stays text. Only a
//! missing, null or blank count becomes `"Unknown"`.

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A count cell holding a JSON number or free text
///
/// # Examples
///
/// ```
/// use grantha_export::domain::CountCell;
///
/// let leaves: CountCell = serde_json::from_str("2.5").unwrap();
/// assert_eq!(leaves.to_string(), "2.5");
///
/// let images: CountCell = serde_json::from_str("\"approx 20\"").unwrap();
/// assert_eq!(images, CountCell::from("approx 20"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountCell {
    /// A JSON number, kept with its original integer or float representation
    Number(Number),
    /// Anything else, verbatim
    Text(String),
}

impl CountCell {
    /// True for text that is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        matches!(self, CountCell::Text(s) if s.trim().is_empty())
    }
}

impl From<i32> for CountCell {
    fn from(value: i32) -> Self {
        CountCell::Number(i64::from(value).into())
    }
}

impl From<u32> for CountCell {
    fn from(value: u32) -> Self {
        CountCell::Number(value.into())
    }
}

impl From<u64> for CountCell {
    fn from(value: u64) -> Self {
        CountCell::Number(value.into())
    }
}

impl From<i64> for CountCell {
    fn from(value: i64) -> Self {
        CountCell::Number(value.into())
    }
}

impl From<&str> for CountCell {
    fn from(value: &str) -> Self {
        CountCell::Text(value.to_string())
    }
}

impl From<String> for CountCell {
    fn from(value: String) -> Self {
        CountCell::Text(value)
    }
}

impl fmt::Display for CountCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountCell::Number(n) => n.fmt(f),
            CountCell::Text(s) => f.write_str(s),
        }
    }
}

/// Text that reads as a JSON number comes back as a number
impl FromStr for CountCell {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match serde_json::from_str::<Number>(s) {
            Ok(n) => CountCell::Number(n),
            Err(_) => CountCell::Text(s.to_string()),
        })
    }
}

impl Serialize for CountCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CountCell::Number(n) => n.serialize(serializer),
            CountCell::Text(s) => serializer.serialize_str(s),
        }
    }
}

struct CountCellVisitor;

impl<'de> Visitor<'de> for CountCellVisitor {
    type Value = CountCell;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<CountCell, E> {
        Ok(CountCell::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<CountCell, E> {
        Ok(CountCell::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<CountCell, E> {
        Number::from_f64(v)
            .map(CountCell::Number)
            .ok_or_else(|| E::custom(format!("count is not a finite number: {v}")))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<CountCell, E> {
        Ok(CountCell::Text(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<CountCell, E> {
        Ok(CountCell::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<CountCell, E> {
        Ok(CountCell::Text(v))
    }
}

impl<'de> Deserialize<'de> for CountCell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CountCellVisitor)
    }
}
