//! CSV rendering of record sets
//!
//! Tables are comma-delimited with `\n` after every record, header included.
//! Fields containing a comma, quote or line break are quoted and embedded
//! quotes are doubled.

use crate::core::records::{RecordTables, TabularRecord};
use crate::domain::errors::GranthaError;
use crate::domain::ids::Dataset;
use crate::domain::Result;
use csv::{ReaderBuilder, Terminator, WriterBuilder};

/// CSV text of the three tables of one export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTables {
    pub deck: String,
    pub manuscripts: String,
    pub images: String,
}

impl RenderedTables {
    /// Serializes each record set independently
    pub fn render(tables: &RecordTables) -> Result<Self> {
        Ok(Self {
            deck: to_csv(&tables.deck)?,
            manuscripts: to_csv(&tables.manuscripts)?,
            images: to_csv(&tables.images)?,
        })
    }

    /// CSV text for a dataset
    pub fn get(&self, dataset: Dataset) -> &str {
        match dataset {
            Dataset::Deck => &self.deck,
            Dataset::Manuscripts => &self.manuscripts,
            Dataset::Images => &self.images,
        }
    }
}

/// Renders rows as CSV text, header first
///
/// The header is taken from [`TabularRecord::COLUMNS`], so an empty slice
/// still produces a one-line table.
pub fn to_csv<R: TabularRecord>(rows: &[R]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(R::COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| GranthaError::Serialization(format!("CSV flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| GranthaError::Serialization(e.to_string()))
}

/// Parses CSV text produced by [`to_csv`] back into rows
///
/// # Errors
///
/// Returns a serialization error if the header differs from
/// [`TabularRecord::COLUMNS`] or a row does not parse.
pub fn read_csv<R: TabularRecord>(text: &str) -> Result<Vec<R>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?;
    if !headers.iter().eq(R::COLUMNS.iter().copied()) {
        return Err(GranthaError::Serialization(format!(
            "Unexpected {} header: {}",
            R::DATASET,
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    reader
        .deserialize()
        .map(|row| row.map_err(GranthaError::from))
        .collect()
}
