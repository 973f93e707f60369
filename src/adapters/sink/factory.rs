//! Output sink factory
//!
//! This module creates the sink selected by configuration.

use super::filesystem::FilesystemSink;
use super::memory::MemorySink;
use super::traits::OutputSink;
use crate::config::GranthaConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Create an output sink based on the configuration
///
/// Dry runs (from `application.dry_run` or the `dry_run` argument) get a
/// [`MemorySink`]. Otherwise a [`FilesystemSink`] rooted at
/// `output.directory` is created and prepared.
///
/// # Errors
///
/// Returns an error if the output directory cannot be prepared
pub async fn create_sink(config: &GranthaConfig, dry_run: bool) -> Result<Arc<dyn OutputSink>> {
    if dry_run || config.application.dry_run {
        tracing::info!("Dry run: tables are kept in memory");
        return Ok(Arc::new(MemorySink::new()));
    }

    let sink = FilesystemSink::new(&config.output.directory);
    sink.prepare().await?;
    tracing::info!(directory = %sink.directory().display(), "Creating filesystem sink");

    Ok(Arc::new(sink))
}
