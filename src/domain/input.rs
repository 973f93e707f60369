//! Export request model
//!
//! The object graph a caller hands to one export: deck-level scan metadata,
//! the main manuscript's images and any sub-manuscripts with their own images.
//! Field names follow the JSON payload posted by the web client (camelCase).
//!
//! Every field is optional at this layer. Shape problems (missing deck id,
//! images without a name or path) are reported by `ExportRequest::validate`
//! (see [`crate::domain::graph`]) as validation errors rather than as opaque
//! deserialization failures.

use super::count::CountCell;
use super::errors::GranthaError;
use super::Result;
use serde::{Deserialize, Deserializer, Serialize};

/// Deck-level metadata supplied once per export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckInput {
    /// Caller-supplied deck id; must be non-blank
    #[serde(default)]
    pub grantha_deck_id: Option<String>,

    /// Number of images in the deck
    #[serde(default, deserialize_with = "present_count")]
    pub total_images: Option<CountCell>,

    /// Number of palm leaves in the deck
    #[serde(default, deserialize_with = "present_count")]
    pub total_leaves: Option<CountCell>,

    /// Scan orientation ("horizontal" / "vertical")
    #[serde(default)]
    pub scan_type: Option<String>,

    /// Binding token such as "stitch" or "non-stitch"
    #[serde(default)]
    pub stitch_type: Option<String>,

    /// Free-text physical condition
    #[serde(default)]
    pub physical_condition: Option<String>,

    /// Scanner model used for the whole deck
    #[serde(default)]
    pub scanner_model: Option<String>,
}

/// One scanned page image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// File name including extension, e.g. `page01.tif`
    #[serde(default)]
    pub name: Option<String>,

    /// Storage path or URL of the image
    #[serde(default)]
    pub path: Option<String>,

    /// Extension with leading dot, e.g. `.tif`
    #[serde(default)]
    pub extension: Option<String>,

    /// Horizontal and vertical resolution, computed by the uploader
    #[serde(default)]
    pub dpi: Option<Vec<f64>>,
}

impl ImageDescriptor {
    /// Creates a descriptor with name, path and extension
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            path: Some(path.into()),
            extension: Some(extension.into()),
            dpi: None,
        }
    }

    /// Sets the resolution pair
    pub fn with_dpi(mut self, horizontal: f64, vertical: f64) -> Self {
        self.dpi = Some(vec![horizontal, vertical]);
        self
    }
}

/// A sub-manuscript bound into the same deck
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubManuscript {
    /// Name used verbatim as the manuscript id
    #[serde(default, alias = "subgrantha_name")]
    pub subgrantha_name: Option<String>,

    /// Images belonging to this sub-manuscript
    #[serde(default)]
    pub images: Vec<ImageDescriptor>,
}

impl SubManuscript {
    /// Creates a sub-manuscript with its images
    pub fn new(name: impl Into<String>, images: Vec<ImageDescriptor>) -> Self {
        Self {
            subgrantha_name: Some(name.into()),
            images,
        }
    }
}

/// Everything one export call needs
///
/// # Examples
///
/// ```
/// use grantha_export::domain::{ExportRequest, ImageDescriptor};
///
/// let request = ExportRequest::builder("D1")
///     .total_leaves(20)
///     .scan_type("horizontal")
///     .main_image(ImageDescriptor::new("a.jpg", "/x/a.jpg", ".jpg").with_dpi(600.0, 600.0))
///     .build();
///
/// assert_eq!(request.deck.grantha_deck_id.as_deref(), Some("D1"));
/// assert_eq!(request.main_grantha_images_and_details.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Deck-level fields, flattened into the top-level payload
    #[serde(flatten)]
    pub deck: DeckInput,

    /// Images of the main manuscript
    #[serde(default)]
    pub main_grantha_images_and_details: Vec<ImageDescriptor>,

    /// Sub-manuscripts in display order
    #[serde(default)]
    pub sub_granthas: Vec<SubManuscript>,
}

impl ExportRequest {
    /// Creates a new builder seeded with a deck id
    pub fn builder(deck_id: impl Into<String>) -> ExportRequestBuilder {
        ExportRequestBuilder::new(deck_id)
    }

    /// Parses the JSON payload posted by the client
    ///
    /// # Errors
    ///
    /// Returns a validation error if the payload is not a well-formed request.
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload)
            .map_err(|e| GranthaError::Validation(format!("Invalid export request: {e}")))
    }
}

/// Builder for [`ExportRequest`]
#[derive(Debug, Default)]
pub struct ExportRequestBuilder {
    request: ExportRequest,
}

impl ExportRequestBuilder {
    /// Creates a builder for the given deck id
    pub fn new(deck_id: impl Into<String>) -> Self {
        let mut request = ExportRequest::default();
        request.deck.grantha_deck_id = Some(deck_id.into());
        Self { request }
    }

    /// Sets the total image count
    pub fn total_images(mut self, count: impl Into<CountCell>) -> Self {
        self.request.deck.total_images = Some(count.into());
        self
    }

    /// Sets the total leaf count
    pub fn total_leaves(mut self, count: impl Into<CountCell>) -> Self {
        self.request.deck.total_leaves = Some(count.into());
        self
    }

    /// Sets the scan orientation
    pub fn scan_type(mut self, value: impl Into<String>) -> Self {
        self.request.deck.scan_type = Some(value.into());
        self
    }

    /// Sets the stitch token
    pub fn stitch_type(mut self, value: impl Into<String>) -> Self {
        self.request.deck.stitch_type = Some(value.into());
        self
    }

    /// Sets the physical condition
    pub fn physical_condition(mut self, value: impl Into<String>) -> Self {
        self.request.deck.physical_condition = Some(value.into());
        self
    }

    /// Sets the scanner model
    pub fn scanner_model(mut self, value: impl Into<String>) -> Self {
        self.request.deck.scanner_model = Some(value.into());
        self
    }

    /// Appends an image to the main manuscript
    pub fn main_image(mut self, image: ImageDescriptor) -> Self {
        self.request.main_grantha_images_and_details.push(image);
        self
    }

    /// Appends a sub-manuscript
    pub fn sub_manuscript(mut self, sub: SubManuscript) -> Self {
        self.request.sub_granthas.push(sub);
        self
    }

    /// Builds the request
    pub fn build(self) -> ExportRequest {
        self.request
    }
}

/// Reads a count as given; null and blank text become `None`
fn present_count<'de, D>(deserializer: D) -> std::result::Result<Option<CountCell>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<CountCell>::deserialize(deserializer)?.filter(|count| !count.is_blank()))
}
