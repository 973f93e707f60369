//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers that flow through an export. Each type
//! guards its own format so the builders and the sink never see an empty id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Suffix appended to the deck id to name the main manuscript
pub const MAIN_GRANTHA_SUFFIX: &str = "_main_grantha";

/// Grantha deck identifier
///
/// Caller-supplied id of a scan batch. Seeds every derived manuscript id.
///
/// # Examples
///
/// ```
/// use grantha_export::domain::ids::DeckId;
/// use std::str::FromStr;
///
/// let deck_id = DeckId::from_str("D1").unwrap();
/// assert_eq!(deck_id.as_str(), "D1");
/// assert!(DeckId::from_str("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckId(String);

impl DeckId {
    /// Creates a new DeckId, rejecting blank input
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("granthaDeckId cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the deck ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier of this deck's main manuscript
    pub fn main_grantha_id(&self) -> GranthaId {
        GranthaId(format!("{}{MAIN_GRANTHA_SUFFIX}", self.0))
    }
}

impl fmt::Display for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DeckId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for DeckId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Manuscript (grantha) identifier
///
/// Either the derived main id `"{deckId}_main_grantha"` or a sub-manuscript's
/// name used verbatim. This is a naming convention, not a content hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GranthaId(String);

impl GranthaId {
    /// Creates a sub-manuscript identifier from its name
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("subgranthaName cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the manuscript ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for GranthaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GranthaId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Key identifying whose artifact set a table belongs to
///
/// In the web application this is the authenticated user's id. It becomes part
/// of a file name, so only ASCII letters, digits, `-`, `_` and `.` are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerKey(String);

impl OwnerKey {
    /// Creates a new OwnerKey
    pub fn new(key: impl Into<String>) -> Result<Self, String> {
        let key = key.into();
        if key.is_empty() {
            return Err("Owner key cannot be empty".to_string());
        }
        if key == "." || key == ".." {
            return Err(format!("Invalid owner key: {key}"));
        }
        if let Some(bad) = key
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(format!("Invalid character {bad:?} in owner key: {key}"));
        }
        Ok(Self(key))
    }

    /// Returns the owner key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OwnerKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// The three tables produced by one export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    /// GranthaDeck table
    Deck,
    /// Grantha table
    Manuscripts,
    /// ScannedImageAndProperties table
    Images,
}

impl Dataset {
    /// All datasets in write order
    pub const ALL: [Dataset; 3] = [Dataset::Deck, Dataset::Manuscripts, Dataset::Images];

    /// Table name used for the artifact file
    pub fn table_name(&self) -> &'static str {
        match self {
            Dataset::Deck => "GranthaDeck",
            Dataset::Manuscripts => "Grantha",
            Dataset::Images => "ScannedImageAndProperties",
        }
    }

    /// Artifact file name for an owner, e.g. `GranthaDeck_u42.csv`
    pub fn artifact_name(&self, owner: &OwnerKey) -> String {
        format!("{}_{}.csv", self.table_name(), owner.as_str())
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dataset::Deck => "deck",
            Dataset::Manuscripts => "manuscripts",
            Dataset::Images => "images",
        };
        f.write_str(name)
    }
}

/// Reference to a persisted table, as returned by an output sink
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// Wraps a sink-specific reference
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the artifact reference as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
