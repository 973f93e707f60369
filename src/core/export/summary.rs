//! Export summary and reporting
//!
//! This module defines the completion report of one export and the result
//! envelope returned to callers.

use crate::domain::ids::{ArtifactId, Dataset, DeckId, OwnerKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::Duration;

/// Success message carried in the result envelope
pub const EXPORT_MESSAGE: &str = "CSV files created successfully";

/// Artifact ids of the three tables, keyed the way the web client expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedFiles {
    pub grantha_deck: ArtifactId,
    pub grantha: ArtifactId,
    pub scanned_image: ArtifactId,
}

impl ExportedFiles {
    /// Artifact id for a dataset
    pub fn get(&self, dataset: Dataset) -> &ArtifactId {
        match dataset {
            Dataset::Deck => &self.grantha_deck,
            Dataset::Manuscripts => &self.grantha,
            Dataset::Images => &self.scanned_image,
        }
    }
}

/// Result envelope: `{message, files: {granthaDeck, grantha, scannedImage}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEnvelope {
    pub message: String,
    pub files: ExportedFiles,
}

impl ExportEnvelope {
    /// Wraps the artifact ids with the standard success message
    pub fn new(files: ExportedFiles) -> Self {
        Self {
            message: EXPORT_MESSAGE.to_string(),
            files,
        }
    }
}

/// Per-table figures of one export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    /// Which table
    pub dataset: Dataset,

    /// Data rows, header excluded
    pub rows: usize,

    /// Hex SHA-256 of the CSV text
    pub checksum: String,

    /// Size of the CSV text in bytes
    pub bytes: usize,
}

impl TableReport {
    /// Builds the report for one rendered table
    pub fn new(dataset: Dataset, rows: usize, text: &str) -> Self {
        Self {
            dataset,
            rows,
            checksum: calculate_checksum(text.as_bytes()),
            bytes: text.len(),
        }
    }
}

/// Summary of an export operation
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    /// Exported deck
    pub deck_id: DeckId,

    /// Owner whose artifact set was written
    pub owner: OwnerKey,

    /// One entry per table, in write order
    pub tables: Vec<TableReport>,

    /// When the export started
    pub started_at: DateTime<Utc>,

    /// Duration of the export
    #[serde(with = "duration_millis")]
    pub duration: Duration,

    /// Whether the tables went to an in-memory sink
    pub dry_run: bool,
}

impl ExportSummary {
    /// Create a new summary with no tables
    pub fn new(deck_id: DeckId, owner: OwnerKey, dry_run: bool) -> Self {
        Self {
            deck_id,
            owner,
            tables: Vec::with_capacity(Dataset::ALL.len()),
            started_at: Utc::now(),
            duration: Duration::from_secs(0),
            dry_run,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a rendered table
    pub fn add_table(&mut self, report: TableReport) {
        self.tables.push(report);
    }

    /// Report for a dataset, if recorded
    pub fn table(&self, dataset: Dataset) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.dataset == dataset)
    }

    /// Row count for a dataset, zero if not recorded
    pub fn rows(&self, dataset: Dataset) -> usize {
        self.table(dataset).map_or(0, |t| t.rows)
    }

    /// Total data rows across all tables
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            deck_id = %self.deck_id,
            owner = %self.owner,
            deck_rows = self.rows(Dataset::Deck),
            manuscript_rows = self.rows(Dataset::Manuscripts),
            image_rows = self.rows(Dataset::Images),
            duration_ms = self.duration.as_millis() as u64,
            dry_run = self.dry_run,
            "Export completed"
        );

        for table in &self.tables {
            tracing::debug!(
                dataset = %table.dataset,
                rows = table.rows,
                bytes = table.bytes,
                checksum = %table.checksum,
                "Table written"
            );
        }
    }
}

/// Outcome of a successful export
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub envelope: ExportEnvelope,
    pub summary: ExportSummary,
}

/// Calculate SHA-256 checksum of raw bytes as lowercase hex
pub fn calculate_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{result:x}")
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary() -> ExportSummary {
        ExportSummary::new(
            DeckId::new("D1").unwrap(),
            OwnerKey::new("u1").unwrap(),
            false,
        )
    }

    #[test]
    fn test_summary_creation() {
        let summary = summary();
        assert!(summary.tables.is_empty());
        assert_eq!(summary.total_rows(), 0);
        assert_eq!(summary.rows(Dataset::Images), 0);
        assert_eq!(summary.duration, Duration::from_secs(0));
    }

    #[test]
    fn test_summary_tables() {
        let mut summary = summary().with_duration(Duration::from_millis(42));
        summary.add_table(TableReport::new(Dataset::Deck, 1, "a\n1\n"));
        summary.add_table(TableReport::new(Dataset::Images, 3, "a\n1\n2\n3\n"));

        assert_eq!(summary.rows(Dataset::Deck), 1);
        assert_eq!(summary.rows(Dataset::Manuscripts), 0);
        assert_eq!(summary.total_rows(), 4);
        assert_eq!(summary.table(Dataset::Images).unwrap().bytes, 8);

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["duration"], json!(42));
        assert_eq!(value["tables"][1]["dataset"], json!("images"));
    }

    #[test]
    fn test_checksum_known_value() {
        assert_eq!(
            calculate_checksum(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(calculate_checksum(b"x").len(), 64);
    }

    #[test]
    fn test_envelope_shape() {
        let envelope = ExportEnvelope::new(ExportedFiles {
            grantha_deck: ArtifactId::new("GranthaDeck_u1.csv"),
            grantha: ArtifactId::new("Grantha_u1.csv"),
            scanned_image: ArtifactId::new("ScannedImageAndProperties_u1.csv"),
        });

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "message": "CSV files created successfully",
                "files": {
                    "granthaDeck": "GranthaDeck_u1.csv",
                    "grantha": "Grantha_u1.csv",
                    "scannedImage": "ScannedImageAndProperties_u1.csv"
                }
            })
        );
        assert_eq!(envelope.files.get(Dataset::Manuscripts).as_str(), "Grantha_u1.csv");
    }
}
