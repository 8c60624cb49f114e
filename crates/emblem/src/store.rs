//! Attribute persistence boundary and the field store
//!
//! [`AttributeStore`] abstracts the host's per-entity document storage:
//! read returns the stored document or absent, write replaces it whole.
//! [`FieldStore`] layers the artifact-pair semantics on top: reads repair
//! malformed documents to the default pair (without writing the repair
//! back), writes are full-document replaces, so every field update is a
//! read-modify-write against the current persisted pair.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use emblem_core::{ArtifactPair, EntityId};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::warn;

use crate::error::{Error, Result};

/// Persistence boundary for per-entity attribute documents
#[async_trait::async_trait]
pub trait AttributeStore: Send + Sync {
    /// Read the stored document for an entity, `None` when absent
    async fn read_attribute(&self, entity: &EntityId) -> Result<Option<Value>>;

    /// Replace the stored document for an entity
    async fn write_attribute(&self, entity: &EntityId, doc: Value) -> Result<()>;
}

/// In-memory attribute store for tests and single-process hosts
#[derive(Debug, Default)]
pub struct MemoryAttributeStore {
    docs: Mutex<HashMap<EntityId, Value>>,
    fail_writes: Mutex<bool>,
}

impl MemoryAttributeStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail (for failure-path tests)
    pub async fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().await = fail;
    }
}

#[async_trait::async_trait]
impl AttributeStore for MemoryAttributeStore {
    async fn read_attribute(&self, entity: &EntityId) -> Result<Option<Value>> {
        Ok(self.docs.lock().await.get(entity).cloned())
    }

    async fn write_attribute(&self, entity: &EntityId, doc: Value) -> Result<()> {
        if *self.fail_writes.lock().await {
            return Err(Error::WriteFailed {
                entity: entity.to_string(),
                reason: "writes disabled".to_string(),
            });
        }
        self.docs.lock().await.insert(entity.clone(), doc);
        Ok(())
    }
}

/// File-backed attribute store: one JSON document per entity under a root
/// directory. Entity IDs are percent-free opaque strings; path separators
/// are flattened so an ID can never escape the root.
#[derive(Debug, Clone)]
pub struct FileAttributeStore {
    root: PathBuf,
}

impl FileAttributeStore {
    /// Create a store rooted at a directory (created lazily on first write)
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, entity: &EntityId) -> PathBuf {
        let name: String = entity
            .as_str()
            .chars()
            .map(|c| if c == '/' || c == '\\' || c == '.' { '_' } else { c })
            .collect();
        self.root.join(format!("{name}.json"))
    }
}

#[async_trait::async_trait]
impl AttributeStore for FileAttributeStore {
    async fn read_attribute(&self, entity: &EntityId) -> Result<Option<Value>> {
        let path = self.path_for(entity);
        match tokio::fs::read(&path).await {
            // Unparseable bytes count as a malformed document, not an I/O
            // failure: treat them as absent so readers repair to defaults.
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(doc) => Ok(Some(doc)),
                Err(err) => {
                    warn!(entity = %entity, error = %err, "stored document is not JSON, treating as absent");
                    Ok(None)
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::ReadFailed {
                entity: entity.to_string(),
                reason: err.to_string(),
            }),
        }
    }

    async fn write_attribute(&self, entity: &EntityId, doc: Value) -> Result<()> {
        let write_failed = |err: String| Error::WriteFailed {
            entity: entity.to_string(),
            reason: err,
        };

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|err| write_failed(err.to_string()))?;
        let bytes = serde_json::to_vec(&doc).map_err(|err| write_failed(err.to_string()))?;
        tokio::fs::write(self.path_for(entity), bytes)
            .await
            .map_err(|err| write_failed(err.to_string()))
    }
}

/// Artifact-pair persistence over an [`AttributeStore`]
#[derive(Clone)]
pub struct FieldStore {
    store: Arc<dyn AttributeStore>,
}

impl FieldStore {
    /// Wrap an attribute store
    #[must_use]
    pub fn new(store: Arc<dyn AttributeStore>) -> Self {
        Self { store }
    }

    /// Read the entity's artifact pair.
    ///
    /// A malformed stored document is repaired to the default pair; the
    /// repair is NOT written back. Only the underlying read itself can fail.
    pub async fn read(&self, entity: &EntityId) -> Result<ArtifactPair> {
        let doc = self.store.read_attribute(entity).await?;
        match doc {
            None => Ok(ArtifactPair::default()),
            Some(value) => match serde_json::from_value(value) {
                Ok(pair) => Ok(pair),
                Err(err) => {
                    warn!(entity = %entity, error = %err, "repairing malformed artifact document");
                    Ok(ArtifactPair::default())
                }
            },
        }
    }

    /// Replace the entity's artifact pair whole.
    ///
    /// Callers must read-modify-write: there is no per-field patching.
    pub async fn write(&self, entity: &EntityId, pair: &ArtifactPair) -> Result<()> {
        self.store.write_attribute(entity, pair.encode()).await
    }
}
