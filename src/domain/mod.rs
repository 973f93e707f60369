//! Domain models and types.
//!
//! This module contains the input model, validated graph, identifiers and
//! error types shared by every stage of an export.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Input model** ([`ExportRequest`], [`DeckInput`], [`ImageDescriptor`], [`SubManuscript`])
//! - **Validated graph** ([`DeckGraph`], [`ManuscriptUnit`], [`ImageRef`])
//! - **Strongly-typed identifiers** ([`DeckId`], [`GranthaId`], [`OwnerKey`], [`Dataset`])
//! - **Sentinel cells** ([`Known`], [`UNKNOWN`]) and as-given counts ([`CountCell`])
//! - **Error types** ([`GranthaError`], [`SinkError`]) and the [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use grantha_export::domain::{ExportRequest, SubManuscript};
//!
//! # fn example() -> grantha_export::domain::Result<()> {
//! let request = ExportRequest::builder("D1")
//!     .sub_manuscript(SubManuscript::new("s1", vec![]))
//!     .build();
//!
//! let graph = request.validate(true)?;
//! assert_eq!(graph.manuscript_count(), 2);
//! # Ok(())
//! # }
//! ```

pub mod count;
pub mod errors;
pub mod graph;
pub mod ids;
pub mod input;
pub mod known;
pub mod result;

pub use count::CountCell;
pub use errors::{ErrorKind, GranthaError, SinkError, SinkFailure};
pub use graph::{DeckGraph, ImageRef, ManuscriptUnit};
pub use ids::{ArtifactId, Dataset, DeckId, GranthaId, OwnerKey};
pub use input::{DeckInput, ExportRequest, ExportRequestBuilder, ImageDescriptor, SubManuscript};
pub use known::{Known, UNKNOWN};
pub use result::Result;
