//! Export orchestration
//!
//! This module provides the export pipeline, including:
//! - CSV rendering of record sets
//! - Export coordination and per-owner serialization
//! - Summary and result envelope

pub mod coordinator;
pub mod locks;
pub mod summary;
pub mod tabular;

pub use coordinator::{ExportCoordinator, ExportOptions};
pub use summary::{
    calculate_checksum, ExportEnvelope, ExportOutcome, ExportSummary, ExportedFiles, TableReport,
    EXPORT_MESSAGE,
};
pub use tabular::{read_csv, to_csv, RenderedTables};
