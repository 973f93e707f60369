//! Export coordinator - orchestrates one deck export
//!
//! Validation, record building and CSV rendering are synchronous. The three
//! table writes are then issued concurrently, each under its own deadline.

use crate::adapters::sink::{create_sink, OutputSink, SinkResult};
use crate::config::GranthaConfig;
use crate::core::export::locks::OwnerLocks;
use crate::core::export::summary::{
    ExportEnvelope, ExportOutcome, ExportSummary, ExportedFiles, TableReport,
};
use crate::core::export::tabular::{read_csv, RenderedTables};
use crate::core::records::{DeckRecord, ImageRecord, ManuscriptRecord, RecordTables};
use crate::domain::errors::{SinkError, SinkFailure};
use crate::domain::ids::{ArtifactId, Dataset, OwnerKey};
use crate::domain::input::ExportRequest;
use crate::domain::Result;
use crate::{log_error_with_context, log_export_complete, log_export_start};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Behavior switches for an [`ExportCoordinator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Fail when two manuscripts would share an id
    pub reject_duplicate_ids: bool,

    /// Deadline for each table write
    pub write_timeout: Duration,

    /// Run exports for the same owner one at a time
    pub serialize_per_owner: bool,

    /// Reported in the summary; the sink decides where tables go
    pub dry_run: bool,
}

impl ExportOptions {
    /// Options from the `[output]`, `[export]` and `[application]` sections
    pub fn from_config(config: &GranthaConfig) -> Self {
        Self {
            reject_duplicate_ids: config.export.reject_duplicate_ids,
            write_timeout: Duration::from_secs(config.output.write_timeout_secs),
            serialize_per_owner: config.output.serialize_per_owner,
            dry_run: config.application.dry_run,
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from_config(&GranthaConfig::default())
    }
}

/// Export coordinator
pub struct ExportCoordinator {
    sink: Arc<dyn OutputSink>,
    options: ExportOptions,
    locks: OwnerLocks,
}

impl ExportCoordinator {
    /// Create a coordinator writing to `sink`
    pub fn new(sink: Arc<dyn OutputSink>, options: ExportOptions) -> Self {
        Self {
            sink,
            options,
            locks: OwnerLocks::new(),
        }
    }

    /// Create a coordinator and its sink from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be prepared
    pub async fn from_config(config: &GranthaConfig, dry_run: bool) -> Result<Self> {
        let sink = create_sink(config, dry_run).await?;
        let mut options = ExportOptions::from_config(config);
        options.dry_run |= dry_run;
        Ok(Self::new(sink, options))
    }

    /// The sink tables are written to
    pub fn sink(&self) -> &Arc<dyn OutputSink> {
        &self.sink
    }

    /// Active options
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export one deck for `owner`
    ///
    /// This is the main entry point. It:
    /// 1. Validates the request into a deck graph
    /// 2. Builds deck, manuscript and image records, in that order
    /// 3. Renders each record set to CSV
    /// 4. Writes the three tables concurrently
    ///
    /// # Errors
    ///
    /// - [`GranthaError::Validation`](crate::domain::GranthaError::Validation)
    ///   if the request is malformed; nothing is written.
    /// - [`GranthaError::Sink`](crate::domain::GranthaError::Sink) if any table
    ///   write failed. Tables that were written are left in place; see
    ///   [`SinkError::Incomplete`].
    pub async fn export(&self, owner: &OwnerKey, request: &ExportRequest) -> Result<ExportOutcome> {
        let start_time = Instant::now();

        let graph = request
            .validate(self.options.reject_duplicate_ids)
            .inspect_err(|e| {
                log_error_with_context!(e, "Export request rejected");
            })?;

        log_export_start!(&graph.deck_id, owner);
        tracing::debug!(
            manuscripts = graph.manuscript_count(),
            images = graph.image_count(),
            "Export request validated"
        );
        let mut summary =
            ExportSummary::new(graph.deck_id.clone(), owner.clone(), self.options.dry_run);

        let tables = RecordTables::build(&graph);
        let rendered = RenderedTables::render(&tables)
            .inspect_err(|e| {
                log_error_with_context!(e, "Failed to render tables");
            })?;

        for dataset in Dataset::ALL {
            summary.add_table(TableReport::new(
                dataset,
                tables.row_count(dataset),
                rendered.get(dataset),
            ));
        }

        let files = {
            let _guard = if self.options.serialize_per_owner {
                Some(self.locks.acquire(owner).await)
            } else {
                None
            };
            self.write_tables(owner, &rendered).await?
        };

        let summary = summary.with_duration(start_time.elapsed());
        log_export_complete!(summary.total_rows(), summary.duration);
        summary.log_summary();

        Ok(ExportOutcome {
            envelope: ExportEnvelope::new(files),
            summary,
        })
    }

    /// Remove the owner's three tables
    ///
    /// Returns the datasets that were actually present.
    ///
    /// # Errors
    ///
    /// Returns a sink error if a table exists but cannot be removed
    pub async fn clear(&self, owner: &OwnerKey) -> Result<Vec<Dataset>> {
        let _guard = self.locks.acquire(owner).await;

        let mut removed = Vec::new();
        for dataset in Dataset::ALL {
            if self.sink.remove(dataset, owner).await? {
                removed.push(dataset);
            }
        }

        tracing::info!(owner = %owner, removed = removed.len(), "Cleared exported tables");
        Ok(removed)
    }

    /// Read back the owner's tables and report what is stored
    ///
    /// Each stored table is parsed with its record schema, so a table that no
    /// longer matches its columns is reported as an error.
    ///
    /// # Errors
    ///
    /// Returns a sink error if a table cannot be read, or a serialization
    /// error if its contents do not parse.
    pub async fn inspect(&self, owner: &OwnerKey) -> Result<Vec<(Dataset, Option<TableReport>)>> {
        let mut stored = Vec::with_capacity(Dataset::ALL.len());
        for dataset in Dataset::ALL {
            let report = match self.sink.read(dataset, owner).await? {
                Some(text) => {
                    let rows = match dataset {
                        Dataset::Deck => read_csv::<DeckRecord>(&text)?.len(),
                        Dataset::Manuscripts => read_csv::<ManuscriptRecord>(&text)?.len(),
                        Dataset::Images => read_csv::<ImageRecord>(&text)?.len(),
                    };
                    Some(TableReport::new(dataset, rows, &text))
                }
                None => None,
            };
            stored.push((dataset, report));
        }
        Ok(stored)
    }

    /// Issue all three writes and wait for every one of them
    async fn write_tables(
        &self,
        owner: &OwnerKey,
        rendered: &RenderedTables,
    ) -> std::result::Result<ExportedFiles, SinkError> {
        let (deck, manuscripts, images) = futures::join!(
            self.write_one(Dataset::Deck, owner, rendered.get(Dataset::Deck)),
            self.write_one(Dataset::Manuscripts, owner, rendered.get(Dataset::Manuscripts)),
            self.write_one(Dataset::Images, owner, rendered.get(Dataset::Images)),
        );

        let mut written = Vec::new();
        let mut failures = Vec::new();
        for (dataset, result) in [
            (Dataset::Deck, &deck),
            (Dataset::Manuscripts, &manuscripts),
            (Dataset::Images, &images),
        ] {
            match result {
                Ok(_) => written.push(dataset),
                Err(e) => {
                    log_error_with_context!(e, format!("Failed to write {dataset} table"));
                    failures.push(SinkFailure::new(dataset, e.to_string()));
                }
            }
        }

        match (deck, manuscripts, images) {
            (Ok(grantha_deck), Ok(grantha), Ok(scanned_image)) => Ok(ExportedFiles {
                grantha_deck,
                grantha,
                scanned_image,
            }),
            _ => {
                tracing::warn!(
                    owner = %owner,
                    written = ?written,
                    failed = failures.len(),
                    "Export incomplete"
                );
                Err(SinkError::Incomplete { written, failures })
            }
        }
    }

    async fn write_one(
        &self,
        dataset: Dataset,
        owner: &OwnerKey,
        content: &str,
    ) -> SinkResult<ArtifactId> {
        let deadline = self.options.write_timeout;
        match tokio::time::timeout(deadline, self.sink.write(dataset, owner, content)).await {
            Ok(result) => result,
            Err(_) => Err(SinkError::Timeout {
                dataset,
                seconds: deadline.as_secs(),
            }),
        }
    }
}
