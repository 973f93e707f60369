//! Grantha record builder

use super::TabularRecord;
use crate::core::normalize::not_yet_known;
use crate::domain::graph::{DeckGraph, ManuscriptUnit};
use crate::domain::ids::Dataset;
use serde::{Deserialize, Serialize};

/// One row of the Grantha table
///
/// Content columns are populated later by the manuscript editing flow, so an
/// export only fixes the structure: one row per manuscript unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManuscriptRecord {
    pub grantha_id: String,
    pub grantha_name: String,
    pub language: String,
    pub author: String,
    pub remarks: String,
    pub description: String,
}

impl TabularRecord for ManuscriptRecord {
    const DATASET: Dataset = Dataset::Manuscripts;
    const COLUMNS: &'static [&'static str] = &[
        "grantha_id",
        "grantha_name",
        "language",
        "author",
        "remarks",
        "description",
    ];
}

impl ManuscriptRecord {
    fn placeholder(unit: &ManuscriptUnit<'_>) -> Self {
        Self {
            grantha_id: unit.id.as_str().to_string(),
            grantha_name: not_yet_known(),
            language: not_yet_known(),
            author: not_yet_known(),
            remarks: not_yet_known(),
            description: not_yet_known(),
        }
    }
}

/// Builds the main manuscript row followed by one row per sub-manuscript
pub fn build_manuscript_records(graph: &DeckGraph<'_>) -> Vec<ManuscriptRecord> {
    graph.units().map(ManuscriptRecord::placeholder).collect()
}
