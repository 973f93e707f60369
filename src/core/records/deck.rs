//! GranthaDeck record builder

use super::TabularRecord;
use crate::core::normalize::{
    normalize_enum_token, not_yet_known, unknown_if_blank, unknown_if_missing,
};
use crate::domain::count::CountCell;
use crate::domain::graph::DeckGraph;
use crate::domain::ids::Dataset;
use crate::domain::known::Known;
use serde::{Deserialize, Serialize};

/// One row of the GranthaDeck table
///
/// Name, owner, source address and dimensions are not known when a deck is
/// first uploaded and are always exported as `"Unknown"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRecord {
    pub grantha_deck_id: String,
    pub total_leaves: Known<CountCell>,
    pub total_images: Known<CountCell>,
    pub stitch_or_nonstitch: String,
    pub physical_condition: String,
    pub grantha_deck_name: String,
    pub grantha_owner_name: String,
    pub grantha_source_address: String,
    pub length_in_cms: String,
    pub width_in_cms: String,
}

impl TabularRecord for DeckRecord {
    const DATASET: Dataset = Dataset::Deck;
    const COLUMNS: &'static [&'static str] = &[
        "grantha_deck_id",
        "total_leaves",
        "total_images",
        "stitch_or_nonstitch",
        "physical_condition",
        "grantha_deck_name",
        "grantha_owner_name",
        "grantha_source_address",
        "length_in_cms",
        "width_in_cms",
    ];
}

/// Builds the single deck row for a validated graph
pub fn build_deck_record(graph: &DeckGraph<'_>) -> DeckRecord {
    let deck = graph.deck;
    let stitch = normalize_enum_token(deck.stitch_type.as_deref());

    DeckRecord {
        grantha_deck_id: graph.deck_id.as_str().to_string(),
        total_leaves: unknown_if_missing(deck.total_leaves.clone()),
        total_images: unknown_if_missing(deck.total_images.clone()),
        stitch_or_nonstitch: unknown_if_blank(Some(&stitch)),
        physical_condition: unknown_if_blank(deck.physical_condition.as_deref()),
        grantha_deck_name: not_yet_known(),
        grantha_owner_name: not_yet_known(),
        grantha_source_address: not_yet_known(),
        length_in_cms: not_yet_known(),
        width_in_cms: not_yet_known(),
    }
}
