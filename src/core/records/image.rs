//! ScannedImageAndProperties record builder

use super::TabularRecord;
use crate::core::normalize::{
    file_format, not_yet_known, resolution_dpi, strip_extension, unknown_if_blank,
};
use crate::domain::graph::{DeckGraph, ImageRef};
use crate::domain::ids::{Dataset, GranthaId};
use serde::{Deserialize, Serialize};

/// One row of the ScannedImageAndProperties table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub image_id: String,
    pub image_name: String,
    pub image_url: String,
    pub grantha_id: String,
    pub worked_by: String,
    pub file_format: String,
    pub scanner_model: String,
    pub resolution_dpi: String,
    pub lighting_conditions: String,
    pub color_depth: String,
    pub scanning_start_date: String,
    pub scanning_completed_date: String,
    pub post_scanning_completed_date: String,
    pub horizontal_or_vertical_scan: String,
}

impl TabularRecord for ImageRecord {
    const DATASET: Dataset = Dataset::Images;
    const COLUMNS: &'static [&'static str] = &[
        "image_id",
        "image_name",
        "image_url",
        "grantha_id",
        "worked_by",
        "file_format",
        "scanner_model",
        "resolution_dpi",
        "lighting_conditions",
        "color_depth",
        "scanning_start_date",
        "scanning_completed_date",
        "post_scanning_completed_date",
        "horizontal_or_vertical_scan",
    ];
}

/// Deck-wide scan settings shared by every image row
#[derive(Debug, Clone)]
struct ScanSettings {
    orientation: String,
    scanner_model: String,
}

impl ScanSettings {
    fn from_graph(graph: &DeckGraph<'_>) -> Self {
        Self {
            orientation: unknown_if_blank(graph.deck.scan_type.as_deref()),
            scanner_model: unknown_if_blank(graph.deck.scanner_model.as_deref()),
        }
    }

    fn record(&self, image: &ImageRef<'_>, owner: &GranthaId) -> ImageRecord {
        let name = strip_extension(image.name).to_string();

        ImageRecord {
            image_id: name.clone(),
            image_name: name,
            image_url: image.path.to_string(),
            grantha_id: owner.as_str().to_string(),
            worked_by: not_yet_known(),
            file_format: file_format(image.extension, image.name),
            scanner_model: self.scanner_model.clone(),
            resolution_dpi: resolution_dpi(image.dpi),
            lighting_conditions: not_yet_known(),
            color_depth: not_yet_known(),
            scanning_start_date: not_yet_known(),
            scanning_completed_date: not_yet_known(),
            post_scanning_completed_date: not_yet_known(),
            horizontal_or_vertical_scan: self.orientation.clone(),
        }
    }
}

/// Builds one row per image, main manuscript first, then each sub-manuscript
///
/// Main and sub-manuscript images get the same treatment: deck scan settings
/// are copied onto every row and operational columns stay `"Unknown"`.
pub fn build_image_records(graph: &DeckGraph<'_>) -> Vec<ImageRecord> {
    let settings = ScanSettings::from_graph(graph);

    graph
        .units()
        .flat_map(|unit| {
            let settings = &settings;
            unit.images
                .iter()
                .map(move |image| settings.record(image, &unit.id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::input::{ExportRequest, ImageDescriptor, SubManuscript};

    #[test]
    fn test_main_image_row() {
        let request = ExportRequest::builder("D1")
            .scan_type("horizontal")
            .scanner_model("Epson")
            .main_image(ImageDescriptor::new("a.jpg", "/x/a.jpg", ".jpg").with_dpi(600.0, 600.0))
            .build();
        let records = build_image_records(&request.validate(true).unwrap());

        assert_eq!(records.len(), 1);
        let row = &records[0];
        assert_eq!(row.image_id, "a");
        assert_eq!(row.image_name, "a");
        assert_eq!(row.image_url, "/x/a.jpg");
        assert_eq!(row.grantha_id, "D1_main_grantha");
        assert_eq!(row.file_format, "JPG");
        assert_eq!(row.resolution_dpi, "600x600");
        assert_eq!(row.scanner_model, "Epson");
        assert_eq!(row.horizontal_or_vertical_scan, "horizontal");
        assert_eq!(row.worked_by, "Unknown");
        assert_eq!(row.post_scanning_completed_date, "Unknown");
    }

    #[test]
    fn test_sub_images_use_deck_settings() {
        let request = ExportRequest::builder("D1")
            .scan_type("vertical")
            .sub_manuscript(SubManuscript::new(
                "s1",
                vec![ImageDescriptor::new("leaf.01.tif", "/s1/leaf.01.tif", ".tif")],
            ))
            .build();
        let records = build_image_records(&request.validate(true).unwrap());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].grantha_id, "s1");
        assert_eq!(records[0].image_name, "leaf.01");
        assert_eq!(records[0].horizontal_or_vertical_scan, "vertical");
        assert_eq!(records[0].scanner_model, "Unknown");
        assert_eq!(records[0].resolution_dpi, "Unknown");
    }

    #[test]
    fn test_order_follows_units() {
        let img = |n: &str| ImageDescriptor::new(n, format!("/p/{n}"), ".png");
        let request = ExportRequest::builder("D1")
            .main_image(img("m1.png"))
            .main_image(img("m2.png"))
            .sub_manuscript(SubManuscript::new("s1", vec![img("x.png")]))
            .sub_manuscript(SubManuscript::new("s2", vec![]))
            .sub_manuscript(SubManuscript::new("s3", vec![img("y.png")]))
            .build();
        let records = build_image_records(&request.validate(true).unwrap());

        let pairs: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.grantha_id.as_str(), r.image_name.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("D1_main_grantha", "m1"),
                ("D1_main_grantha", "m2"),
                ("s1", "x"),
                ("s3", "y"),
            ]
        );
    }
}
