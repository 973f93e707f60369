//! Integration tests for the export pipeline
//!
//! Exports go through the real filesystem sink in a temporary directory, or
//! through purpose-built sinks that fail or stall on one table.

use async_trait::async_trait;
use grantha_export::adapters::sink::{FilesystemSink, MemorySink, OutputSink, SinkResult};
use grantha_export::core::export::{read_csv, ExportCoordinator, ExportOptions, EXPORT_MESSAGE};
use grantha_export::core::records::{DeckRecord, ImageRecord, ManuscriptRecord, TabularRecord};
use grantha_export::domain::{
    ArtifactId, CountCell, Dataset, ErrorKind, ExportRequest, GranthaError, Known, OwnerKey, SinkError,
};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const D1_PAYLOAD: &str = r#"{
    "granthaDeckId": "D1",
    "totalImages": null,
    "totalLeaves": 20,
    "scanType": "horizontal",
    "stitchType": "non-stitch",
    "physicalCondition": "good",
    "scannerModel": "Epson",
    "mainGranthaImagesAndDetails": [
        {"name": "a.jpg", "path": "/x/a.jpg", "extension": ".jpg", "dpi": [600, 600]}
    ],
    "subGranthas": []
}"#;

fn owner(key: &str) -> OwnerKey {
    OwnerKey::new(key).unwrap()
}

async fn filesystem_coordinator() -> (ExportCoordinator, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let sink = FilesystemSink::new(temp_dir.path().join("csv"));
    sink.prepare().await.unwrap();
    let coordinator = ExportCoordinator::new(Arc::new(sink), ExportOptions::default());
    (coordinator, temp_dir)
}

fn read_table(dir: &TempDir, dataset: Dataset, owner: &OwnerKey) -> String {
    let path = dir.path().join("csv").join(dataset.artifact_name(owner));
    std::fs::read_to_string(path).unwrap()
}

#[tokio::test]
async fn test_end_to_end_d1() {
    let (coordinator, dir) = filesystem_coordinator().await;
    let user = owner("u42");
    let request = ExportRequest::from_json(D1_PAYLOAD).unwrap();

    let outcome = coordinator.export(&user, &request).await.unwrap();
    assert_eq!(outcome.envelope.message, EXPORT_MESSAGE);

    let decks: Vec<DeckRecord> = read_csv(&read_table(&dir, Dataset::Deck, &user)).unwrap();
    assert_eq!(
        decks,
        vec![DeckRecord {
            grantha_deck_id: "D1".to_string(),
            total_leaves: Known::Value(CountCell::from(20)),
            total_images: Known::Unknown,
            stitch_or_nonstitch: "Non stitch".to_string(),
            physical_condition: "good".to_string(),
            grantha_deck_name: "Unknown".to_string(),
            grantha_owner_name: "Unknown".to_string(),
            grantha_source_address: "Unknown".to_string(),
            length_in_cms: "Unknown".to_string(),
            width_in_cms: "Unknown".to_string(),
        }]
    );

    let manuscripts: Vec<ManuscriptRecord> =
        read_csv(&read_table(&dir, Dataset::Manuscripts, &user)).unwrap();
    assert_eq!(manuscripts.len(), 1);
    assert_eq!(manuscripts[0].grantha_id, "D1_main_grantha");

    let images: Vec<ImageRecord> = read_csv(&read_table(&dir, Dataset::Images, &user)).unwrap();
    assert_eq!(images.len(), 1);
    let image = &images[0];
    assert_eq!(image.image_name, "a");
    assert_eq!(image.image_url, "/x/a.jpg");
    assert_eq!(image.grantha_id, "D1_main_grantha");
    assert_eq!(image.file_format, "JPG");
    assert_eq!(image.resolution_dpi, "600x600");
    assert_eq!(image.horizontal_or_vertical_scan, "horizontal");
    assert_eq!(image.scanner_model, "Epson");
}

#[tokio::test]
async fn test_envelope_names_written_files() {
    let (coordinator, dir) = filesystem_coordinator().await;
    let user = owner("u42");
    let request = ExportRequest::from_json(D1_PAYLOAD).unwrap();

    let outcome = coordinator.export(&user, &request).await.unwrap();
    for dataset in Dataset::ALL {
        let expected = dir.path().join("csv").join(dataset.artifact_name(&user));
        assert_eq!(
            outcome.envelope.files.get(dataset).as_str(),
            expected.to_string_lossy()
        );
        assert!(expected.is_file());
    }

    let json = serde_json::to_value(&outcome.envelope).unwrap();
    assert_eq!(json["message"], "CSV files created successfully");
    assert!(json["files"]["granthaDeck"]
        .as_str()
        .unwrap()
        .ends_with("GranthaDeck_u42.csv"));
    assert!(json["files"]["scannedImage"]
        .as_str()
        .unwrap()
        .ends_with("ScannedImageAndProperties_u42.csv"));
}

#[tokio::test]
async fn test_headers_match_columns_for_empty_tables() {
    let (coordinator, dir) = filesystem_coordinator().await;
    let user = owner("u1");
    let request = ExportRequest::builder("EMPTY").build();

    coordinator.export(&user, &request).await.unwrap();

    let images = read_table(&dir, Dataset::Images, &user);
    assert_eq!(images, format!("{}\n", ImageRecord::COLUMNS.join(",")));

    let deck = read_table(&dir, Dataset::Deck, &user);
    assert_eq!(deck.lines().next(), Some(DeckRecord::COLUMNS.join(",").as_str()));

    let manuscripts = read_table(&dir, Dataset::Manuscripts, &user);
    assert_eq!(
        manuscripts.lines().next(),
        Some(ManuscriptRecord::COLUMNS.join(",").as_str())
    );
}

#[tokio::test]
async fn test_sub_manuscripts_in_order() {
    let (coordinator, dir) = filesystem_coordinator().await;
    let user = owner("u1");
    let payload = r#"{
        "granthaDeckId": "D7",
        "scanType": "vertical",
        "mainGranthaImagesAndDetails": [
            {"name": "m1.png", "path": "/d7/m1.png", "extension": ".png"}
        ],
        "subGranthas": [
            {"subgranthaName": "s1", "images": [
                {"name": "page01.tif", "path": "/d7/s1/page01.tif", "extension": ".tif", "dpi": [300.4, 300.6]}
            ]},
            {"subgranthaName": "s2", "images": []}
        ]
    }"#;
    let request = ExportRequest::from_json(payload).unwrap();

    let outcome = coordinator.export(&user, &request).await.unwrap();
    assert_eq!(outcome.summary.rows(Dataset::Manuscripts), 3);
    assert_eq!(outcome.summary.rows(Dataset::Images), 2);

    let manuscripts: Vec<ManuscriptRecord> =
        read_csv(&read_table(&dir, Dataset::Manuscripts, &user)).unwrap();
    let ids: Vec<&str> = manuscripts.iter().map(|m| m.grantha_id.as_str()).collect();
    assert_eq!(ids, vec!["D7_main_grantha", "s1", "s2"]);

    let images: Vec<ImageRecord> = read_csv(&read_table(&dir, Dataset::Images, &user)).unwrap();
    assert_eq!(images[0].grantha_id, "D7_main_grantha");
    assert_eq!(images[0].resolution_dpi, "Unknown");
    assert_eq!(images[1].grantha_id, "s1");
    assert_eq!(images[1].image_name, "page01");
    assert_eq!(images[1].file_format, "TIF");
    assert_eq!(images[1].resolution_dpi, "300x301");
    assert!(images.iter().all(|i| i.horizontal_or_vertical_scan == "vertical"));
}

#[tokio::test]
async fn test_reexport_overwrites_and_owners_stay_separate() {
    let (coordinator, dir) = filesystem_coordinator().await;
    let alice = owner("alice");
    let bob = owner("bob");

    let first = ExportRequest::builder("FIRST").build();
    let second = ExportRequest::builder("SECOND").build();

    coordinator.export(&alice, &first).await.unwrap();
    coordinator.export(&bob, &first).await.unwrap();
    coordinator.export(&alice, &second).await.unwrap();

    let alice_deck: Vec<DeckRecord> = read_csv(&read_table(&dir, Dataset::Deck, &alice)).unwrap();
    assert_eq!(alice_deck.len(), 1);
    assert_eq!(alice_deck[0].grantha_deck_id, "SECOND");

    let bob_deck: Vec<DeckRecord> = read_csv(&read_table(&dir, Dataset::Deck, &bob)).unwrap();
    assert_eq!(bob_deck[0].grantha_deck_id, "FIRST");

    let entries = std::fs::read_dir(dir.path().join("csv")).unwrap().count();
    assert_eq!(entries, 6);
}

#[tokio::test]
async fn test_concurrent_exports_same_owner_leave_consistent_tables() {
    let temp_dir = TempDir::new().unwrap();
    let sink = FilesystemSink::new(temp_dir.path());
    sink.prepare().await.unwrap();
    let coordinator = Arc::new(ExportCoordinator::new(Arc::new(sink), ExportOptions::default()));
    let user = owner("u1");

    let mut handles = Vec::new();
    for n in 0..8 {
        let coordinator = Arc::clone(&coordinator);
        let user = user.clone();
        handles.push(tokio::spawn(async move {
            let request = ExportRequest::builder(format!("DECK{n}")).build();
            coordinator.export(&user, &request).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let deck_text = std::fs::read_to_string(temp_dir.path().join("GranthaDeck_u1.csv")).unwrap();
    let decks: Vec<DeckRecord> = read_csv(&deck_text).unwrap();
    let manuscript_text = std::fs::read_to_string(temp_dir.path().join("Grantha_u1.csv")).unwrap();
    let manuscripts: Vec<ManuscriptRecord> = read_csv(&manuscript_text).unwrap();

    assert_eq!(decks.len(), 1);
    assert_eq!(
        manuscripts[0].grantha_id,
        format!("{}_main_grantha", decks[0].grantha_deck_id)
    );
}

#[tokio::test]
async fn test_duplicate_ids_rejected_before_writing() {
    let sink = Arc::new(MemorySink::new());
    let coordinator = ExportCoordinator::new(sink.clone(), ExportOptions::default());
    let payload = r#"{
        "granthaDeckId": "D1",
        "subGranthas": [
            {"subgranthaName": "dup", "images": []},
            {"subgranthaName": "dup", "images": []}
        ]
    }"#;
    let request = ExportRequest::from_json(payload).unwrap();

    let err = coordinator.export(&owner("u1"), &request).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(sink.is_empty());

    let lenient = ExportCoordinator::new(
        sink.clone(),
        ExportOptions {
            reject_duplicate_ids: false,
            ..ExportOptions::default()
        },
    );
    let outcome = lenient.export(&owner("u1"), &request).await.unwrap();
    assert_eq!(outcome.summary.rows(Dataset::Manuscripts), 3);
}

#[tokio::test]
async fn test_missing_deck_id_is_validation_error() {
    let sink = Arc::new(MemorySink::new());
    let coordinator = ExportCoordinator::new(sink.clone(), ExportOptions::default());
    let request = ExportRequest::from_json(r#"{"granthaDeckId": "   "}"#).unwrap();

    let err = coordinator.export(&owner("u1"), &request).await.unwrap_err();
    assert!(matches!(err, GranthaError::Validation(_)));
    assert!(sink.is_empty());
}

/// Stores tables in memory but refuses one dataset
struct FailingSink {
    inner: MemorySink,
    failing: Dataset,
}

#[async_trait]
impl OutputSink for FailingSink {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn write(&self, dataset: Dataset, owner: &OwnerKey, content: &str) -> SinkResult<ArtifactId> {
        if dataset == self.failing {
            return Err(SinkError::WriteFailed {
                dataset,
                reason: "permission denied".to_string(),
            });
        }
        self.inner.write(dataset, owner, content).await
    }

    async fn read(&self, dataset: Dataset, owner: &OwnerKey) -> SinkResult<Option<String>> {
        self.inner.read(dataset, owner).await
    }

    async fn remove(&self, dataset: Dataset, owner: &OwnerKey) -> SinkResult<bool> {
        self.inner.remove(dataset, owner).await
    }
}

#[tokio::test]
async fn test_partial_failure_reports_incomplete() {
    let sink = Arc::new(FailingSink {
        inner: MemorySink::new(),
        failing: Dataset::Manuscripts,
    });
    let coordinator = ExportCoordinator::new(sink.clone(), ExportOptions::default());
    let user = owner("u1");
    let request = ExportRequest::from_json(D1_PAYLOAD).unwrap();

    let err = coordinator.export(&user, &request).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Sink);

    match err {
        GranthaError::Sink(SinkError::Incomplete { written, failures }) => {
            assert_eq!(written, vec![Dataset::Deck, Dataset::Images]);
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].dataset, Dataset::Manuscripts);
        }
        other => panic!("expected incomplete export, got {other:?}"),
    }

    assert!(sink.read(Dataset::Deck, &user).await.unwrap().is_some());
    assert!(sink.read(Dataset::Images, &user).await.unwrap().is_some());
    assert!(sink.read(Dataset::Manuscripts, &user).await.unwrap().is_none());
}

/// Never finishes writing the image table
struct StallingSink {
    inner: MemorySink,
}

#[async_trait]
impl OutputSink for StallingSink {
    fn name(&self) -> &'static str {
        "stalling"
    }

    async fn write(&self, dataset: Dataset, owner: &OwnerKey, content: &str) -> SinkResult<ArtifactId> {
        if dataset == Dataset::Images {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        self.inner.write(dataset, owner, content).await
    }

    async fn read(&self, dataset: Dataset, owner: &OwnerKey) -> SinkResult<Option<String>> {
        self.inner.read(dataset, owner).await
    }

    async fn remove(&self, dataset: Dataset, owner: &OwnerKey) -> SinkResult<bool> {
        self.inner.remove(dataset, owner).await
    }
}

#[tokio::test]
async fn test_stalled_write_times_out() {
    let sink = Arc::new(StallingSink {
        inner: MemorySink::new(),
    });
    let options = ExportOptions {
        write_timeout: Duration::from_secs(1),
        ..ExportOptions::default()
    };
    let coordinator = ExportCoordinator::new(sink, options);
    let request = ExportRequest::from_json(D1_PAYLOAD).unwrap();

    let err = coordinator.export(&owner("u1"), &request).await.unwrap_err();
    match err {
        GranthaError::Sink(ref sink_err @ SinkError::Incomplete { ref failures, .. }) => {
            assert_eq!(sink_err.failed_datasets(), vec![Dataset::Images]);
            assert!(failures[0].message.contains("timed out after 1s"));
        }
        other => panic!("expected incomplete export, got {other:?}"),
    }
}
