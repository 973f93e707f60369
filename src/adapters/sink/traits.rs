//! Output sink abstraction
//!
//! This module defines the trait that destinations for exported tables must
//! implement.

use crate::domain::errors::SinkError;
use crate::domain::ids::{ArtifactId, Dataset, OwnerKey};
use async_trait::async_trait;

/// Result type for sink operations
pub type SinkResult<T> = std::result::Result<T, SinkError>;

/// Destination for serialized tables, keyed by owner and dataset
///
/// Each owner has at most one artifact per dataset. Writing again replaces it.
#[async_trait]
pub trait OutputSink: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Store a table, replacing any previous one for the same owner and dataset
    ///
    /// The coordinator drops this future when a write deadline passes. A write
    /// dropped before it completes must not store the table afterwards, or it
    /// could replace a newer table written by a later export.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::WriteFailed`] if the content could not be persisted.
    async fn write(
        &self,
        dataset: Dataset,
        owner: &OwnerKey,
        content: &str,
    ) -> SinkResult<ArtifactId>;

    /// Fetch a previously stored table
    ///
    /// Returns `Ok(None)` when nothing is stored for the owner and dataset.
    async fn read(&self, dataset: Dataset, owner: &OwnerKey) -> SinkResult<Option<String>>;

    /// Delete a stored table
    ///
    /// Returns `Ok(false)` when there was nothing to delete.
    async fn remove(&self, dataset: Dataset, owner: &OwnerKey) -> SinkResult<bool>;
}
