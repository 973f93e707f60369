//! Directory-backed output sink
//!
//! Tables land in a single directory as `{Table}_{owner}.csv`. Every write
//! goes to a temporary file in the same directory which is then renamed over
//! the target, so readers never observe a half-written table.
//!
//! The file I/O runs on the blocking pool and is not interrupted when the
//! caller stops waiting. A write whose future is dropped (for example by a
//! deadline) is marked abandoned, and the blocking task then discards its
//! temporary file instead of renaming it. The check and the rename happen
//! under one lock, so an abandoned write never lands.

use super::traits::{OutputSink, SinkResult};
use crate::domain::errors::SinkError;
use crate::domain::ids::{ArtifactId, Dataset, OwnerKey};
use async_trait::async_trait;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// Writes tables as CSV files under one directory
#[derive(Debug, Clone)]
pub struct FilesystemSink {
    directory: PathBuf,
    #[cfg(test)]
    stage_delay: Option<std::time::Duration>,
}

impl FilesystemSink {
    /// Creates a sink rooted at `directory`
    ///
    /// Nothing is touched on disk until [`FilesystemSink::prepare`] or the
    /// first write.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            #[cfg(test)]
            stage_delay: None,
        }
    }

    /// Stalls every write before its rename
    #[cfg(test)]
    fn with_stage_delay(mut self, delay: std::time::Duration) -> Self {
        self.stage_delay = Some(delay);
        self
    }

    #[cfg(test)]
    fn stage_delay(&self) -> Option<std::time::Duration> {
        self.stage_delay
    }

    #[cfg(not(test))]
    fn stage_delay(&self) -> Option<std::time::Duration> {
        None
    }

    /// Output directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Full path of the artifact for an owner and dataset
    pub fn path_for(&self, dataset: Dataset, owner: &OwnerKey) -> PathBuf {
        self.directory.join(dataset.artifact_name(owner))
    }

    /// Creates the output directory if needed and checks that it is a directory
    ///
    /// Run once at startup.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Unavailable`] if the directory cannot be created
    /// or the path exists but is not a directory.
    pub async fn prepare(&self) -> SinkResult<()> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| {
                SinkError::Unavailable(format!(
                    "cannot create {}: {e}",
                    self.directory.display()
                ))
            })?;

        let metadata = tokio::fs::metadata(&self.directory).await.map_err(|e| {
            SinkError::Unavailable(format!("cannot stat {}: {e}", self.directory.display()))
        })?;
        if !metadata.is_dir() {
            return Err(SinkError::Unavailable(format!(
                "{} is not a directory",
                self.directory.display()
            )));
        }

        tracing::debug!(directory = %self.directory.display(), "Output directory ready");
        Ok(())
    }
}

/// Abandonment state shared by a write future and its blocking task
#[derive(Debug, Default)]
struct WriteTicket {
    abandoned: Mutex<bool>,
}

impl WriteTicket {
    fn abandon(&self) {
        *self.abandoned.lock().unwrap_or_else(|e| e.into_inner()) = true;
    }
}

/// Abandons the ticket unless disarmed before it is dropped
struct AbandonOnDrop {
    ticket: Arc<WriteTicket>,
    armed: bool,
}

impl AbandonOnDrop {
    fn new(ticket: Arc<WriteTicket>) -> Self {
        Self {
            ticket,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for AbandonOnDrop {
    fn drop(&mut self) {
        if self.armed {
            self.ticket.abandon();
        }
    }
}

/// How a staged write ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Landing {
    Persisted,
    Discarded,
}

/// Writes `content` to `target` via a temporary sibling file and a rename
///
/// The rename is skipped if `ticket` was abandoned while the content was
/// being staged; the temporary file is then removed on drop.
fn write_atomic(
    directory: &Path,
    target: &Path,
    content: &[u8],
    ticket: &WriteTicket,
) -> std::io::Result<Landing> {
    let mut temp = NamedTempFile::new_in(directory)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;

    let abandoned = ticket.abandoned.lock().unwrap_or_else(|e| e.into_inner());
    if *abandoned {
        return Ok(Landing::Discarded);
    }
    temp.persist(target).map_err(|e| e.error)?;
    Ok(Landing::Persisted)
}

#[async_trait]
impl OutputSink for FilesystemSink {
    fn name(&self) -> &'static str {
        "filesystem"
    }

    async fn write(
        &self,
        dataset: Dataset,
        owner: &OwnerKey,
        content: &str,
    ) -> SinkResult<ArtifactId> {
        let directory = self.directory.clone();
        let target = self.path_for(dataset, owner);
        let bytes = content.as_bytes().to_vec();

        let ticket = Arc::new(WriteTicket::default());
        let abandon_guard = AbandonOnDrop::new(Arc::clone(&ticket));
        let stage_delay = self.stage_delay();

        let path = target.clone();
        let task = tokio::task::spawn_blocking(move || {
            if let Some(delay) = stage_delay {
                std::thread::sleep(delay);
            }
            write_atomic(&directory, &path, &bytes, &ticket)
        });

        let landing = task
            .await
            .map_err(|e| SinkError::WriteFailed {
                dataset,
                reason: format!("write task failed: {e}"),
            })?
            .map_err(|e| SinkError::WriteFailed {
                dataset,
                reason: format!("{}: {e}", target.display()),
            })?;
        abandon_guard.disarm();

        if landing == Landing::Discarded {
            return Err(SinkError::WriteFailed {
                dataset,
                reason: format!("{}: write abandoned", target.display()),
            });
        }

        tracing::debug!(
            dataset = %dataset,
            owner = %owner,
            path = %target.display(),
            bytes = content.len(),
            "Table written"
        );

        Ok(ArtifactId::new(target.display().to_string()))
    }

    async fn read(&self, dataset: Dataset, owner: &OwnerKey) -> SinkResult<Option<String>> {
        let path = self.path_for(dataset, owner);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SinkError::AccessFailed {
                dataset,
                reason: format!("{}: {e}", path.display()),
            }),
        }
    }

    async fn remove(&self, dataset: Dataset, owner: &OwnerKey) -> SinkResult<bool> {
        let path = self.path_for(dataset, owner);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SinkError::AccessFailed {
                dataset,
                reason: format!("{}: {e}", path.display()),
            }),
        }
    }
}
