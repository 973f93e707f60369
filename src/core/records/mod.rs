//! Record builders
//!
//! Each builder takes a validated [`DeckGraph`] and produces flat rows for one
//! table. Builders are pure; they never fail once the graph is validated.

pub mod deck;
pub mod image;
pub mod manuscript;

pub use deck::{build_deck_record, DeckRecord};
pub use image::{build_image_records, ImageRecord};
pub use manuscript::{build_manuscript_records, ManuscriptRecord};

use crate::domain::graph::DeckGraph;
use crate::domain::ids::Dataset;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A row type with a fixed column schema
///
/// `COLUMNS` lists the header in output order and must match the field order
/// of the serialized struct.
pub trait TabularRecord: Serialize + DeserializeOwned {
    /// Dataset this row type belongs to
    const DATASET: Dataset;

    /// Column names in output order
    const COLUMNS: &'static [&'static str];
}

/// The three record sets of one export
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTables {
    pub deck: Vec<DeckRecord>,
    pub manuscripts: Vec<ManuscriptRecord>,
    pub images: Vec<ImageRecord>,
}

impl RecordTables {
    /// Runs the deck, manuscript and image builders in that order
    pub fn build(graph: &DeckGraph<'_>) -> Self {
        let deck = vec![build_deck_record(graph)];
        let manuscripts = build_manuscript_records(graph);
        let images = build_image_records(graph);
        debug_assert_eq!(manuscripts.len(), graph.manuscript_count());
        debug_assert_eq!(images.len(), graph.image_count());

        Self {
            deck,
            manuscripts,
            images,
        }
    }

    /// Row count for a dataset
    pub fn row_count(&self, dataset: Dataset) -> usize {
        match dataset {
            Dataset::Deck => self.deck.len(),
            Dataset::Manuscripts => self.manuscripts.len(),
            Dataset::Images => self.images.len(),
        }
    }
}
