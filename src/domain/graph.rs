//! Validated deck graph
//!
//! [`DeckGraph`] is the checked view of an [`ExportRequest`]: deck id parsed,
//! every image known to carry a name and a path, every manuscript unit tagged
//! with its [`GranthaId`]. Record builders only ever see this view.

use super::errors::GranthaError;
use super::ids::{DeckId, GranthaId};
use super::input::{DeckInput, ExportRequest, ImageDescriptor};
use super::Result;
use std::collections::HashSet;

/// An image whose required fields are present
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageRef<'a> {
    /// File name including extension
    pub name: &'a str,
    /// Storage path or URL
    pub path: &'a str,
    /// Declared extension, if any
    pub extension: Option<&'a str>,
    /// Resolution pair, if computed
    pub dpi: Option<&'a [f64]>,
}

/// A manuscript (main or sub) and its images
#[derive(Debug, Clone, PartialEq)]
pub struct ManuscriptUnit<'a> {
    /// Manuscript identifier
    pub id: GranthaId,
    /// Images in upload order
    pub images: Vec<ImageRef<'a>>,
}

/// Validated input graph for one export
#[derive(Debug, Clone, PartialEq)]
pub struct DeckGraph<'a> {
    /// Parsed deck id
    pub deck_id: DeckId,
    /// Deck-level metadata
    pub deck: &'a DeckInput,
    /// Main manuscript, always present
    pub main: ManuscriptUnit<'a>,
    /// Sub-manuscripts in input order
    pub subs: Vec<ManuscriptUnit<'a>>,
}

impl<'a> DeckGraph<'a> {
    /// Main manuscript followed by every sub-manuscript
    pub fn units(&self) -> impl Iterator<Item = &ManuscriptUnit<'a>> {
        std::iter::once(&self.main).chain(self.subs.iter())
    }

    /// Number of manuscript records this graph produces
    pub fn manuscript_count(&self) -> usize {
        1 + self.subs.len()
    }

    /// Number of image records this graph produces
    pub fn image_count(&self) -> usize {
        self.units().map(|unit| unit.images.len()).sum()
    }
}

impl ExportRequest {
    /// Checks the request shape and builds the validated graph
    ///
    /// # Arguments
    ///
    /// * `reject_duplicate_ids` - Fail when two manuscripts would share an id
    ///
    /// # Errors
    ///
    /// Returns [`GranthaError::Validation`] when the deck id is missing, an
    /// image lacks a name or path, a sub-manuscript lacks a name, or (if
    /// requested) manuscript ids collide.
    pub fn validate(&self, reject_duplicate_ids: bool) -> Result<DeckGraph<'_>> {
        let deck_id = self
            .deck
            .grantha_deck_id
            .as_deref()
            .ok_or_else(|| GranthaError::Validation("granthaDeckId is required".to_string()))
            .and_then(|id| DeckId::new(id).map_err(GranthaError::Validation))?;

        let main_id = deck_id.main_grantha_id();
        let main = ManuscriptUnit {
            images: image_refs(&self.main_grantha_images_and_details, main_id.as_str())?,
            id: main_id,
        };

        let mut subs = Vec::with_capacity(self.sub_granthas.len());
        for (index, sub) in self.sub_granthas.iter().enumerate() {
            let id = sub
                .subgrantha_name
                .as_deref()
                .ok_or_else(|| {
                    GranthaError::Validation(format!("subGranthas[{index}] has no subgranthaName"))
                })
                .and_then(|name| {
                    GranthaId::new(name).map_err(|e| {
                        GranthaError::Validation(format!("subGranthas[{index}]: {e}"))
                    })
                })?;
            subs.push(ManuscriptUnit {
                images: image_refs(&sub.images, id.as_str())?,
                id,
            });
        }

        if reject_duplicate_ids {
            let mut seen = HashSet::with_capacity(subs.len() + 1);
            seen.insert(main.id.as_str());
            for sub in &subs {
                if !seen.insert(sub.id.as_str()) {
                    return Err(GranthaError::Validation(format!(
                        "Duplicate manuscript id: {}",
                        sub.id
                    )));
                }
            }
        }

        Ok(DeckGraph {
            deck_id,
            deck: &self.deck,
            main,
            subs,
        })
    }
}

fn image_refs<'a>(images: &'a [ImageDescriptor], owner: &str) -> Result<Vec<ImageRef<'a>>> {
    images
        .iter()
        .enumerate()
        .map(|(index, image)| {
            let name = required(image.name.as_deref(), "name", owner, index)?;
            let path = required(image.path.as_deref(), "path", owner, index)?;
            Ok(ImageRef {
                name,
                path,
                extension: image.extension.as_deref(),
                dpi: image.dpi.as_deref(),
            })
        })
        .collect()
}

fn required<'a>(value: Option<&'a str>, field: &str, owner: &str, index: usize) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(GranthaError::Validation(format!(
            "Image {index} of {owner} is missing '{field}'"
        ))),
    }
}
