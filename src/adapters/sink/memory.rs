//! In-process output sink for dry runs and tests

use super::traits::{OutputSink, SinkResult};
use crate::domain::errors::SinkError;
use crate::domain::ids::{ArtifactId, Dataset, OwnerKey};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

type Tables = HashMap<(Dataset, OwnerKey), String>;

/// Keeps tables in a map instead of writing them anywhere
#[derive(Debug, Default)]
pub struct MemorySink {
    tables: Mutex<Tables>,
}

impl MemorySink {
    /// Creates an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tables
    pub fn len(&self) -> usize {
        self.lock().map(|t| t.len()).unwrap_or(0)
    }

    /// Whether no table is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> SinkResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| SinkError::Unavailable("memory sink lock poisoned".to_string()))
    }

    fn artifact_id(dataset: Dataset, owner: &OwnerKey) -> ArtifactId {
        ArtifactId::new(format!("memory://{}", dataset.artifact_name(owner)))
    }
}

#[async_trait]
impl OutputSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn write(
        &self,
        dataset: Dataset,
        owner: &OwnerKey,
        content: &str,
    ) -> SinkResult<ArtifactId> {
        self.lock()?
            .insert((dataset, owner.clone()), content.to_string());
        Ok(Self::artifact_id(dataset, owner))
    }

    async fn read(&self, dataset: Dataset, owner: &OwnerKey) -> SinkResult<Option<String>> {
        Ok(self.lock()?.get(&(dataset, owner.clone())).cloned())
    }

    async fn remove(&self, dataset: Dataset, owner: &OwnerKey) -> SinkResult<bool> {
        Ok(self.lock()?.remove(&(dataset, owner.clone())).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_sink_roundtrip() {
        let sink = MemorySink::new();
        let owner = OwnerKey::new("u1").unwrap();
        assert!(sink.is_empty());

        let id = sink.write(Dataset::Manuscripts, &owner, "h\n").await.unwrap();
        assert_eq!(id.as_str(), "memory://Grantha_u1.csv");
        assert_eq!(sink.len(), 1);

        sink.write(Dataset::Manuscripts, &owner, "h2\n").await.unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(
            sink.read(Dataset::Manuscripts, &owner).await.unwrap().as_deref(),
            Some("h2\n")
        );

        assert!(sink.remove(Dataset::Manuscripts, &owner).await.unwrap());
        assert!(sink.read(Dataset::Manuscripts, &owner).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_owners_are_separate() {
        let sink = MemorySink::new();
        let a = OwnerKey::new("a").unwrap();
        let b = OwnerKey::new("b").unwrap();

        sink.write(Dataset::Deck, &a, "from a\n").await.unwrap();
        sink.write(Dataset::Deck, &b, "from b\n").await.unwrap();

        assert_eq!(sink.read(Dataset::Deck, &a).await.unwrap().as_deref(), Some("from a\n"));
        assert_eq!(sink.read(Dataset::Deck, &b).await.unwrap().as_deref(), Some("from b\n"));
    }
}
