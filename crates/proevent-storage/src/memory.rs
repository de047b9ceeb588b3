//! In-memory storage backend.
//!
//! Keeps all data in a `BTreeMap` behind an async `RwLock`. Nothing is
//! persisted — data is gone when the process exits. Intended for unit
//! tests and local development where a real backend without disk access
//! is wanted.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{KeyValueStore, StorageError};

/// An in-memory backend backed by a `BTreeMap`.
///
/// Thread-safe and cheap to clone — clones share the same map. Keys are
/// held sorted, so prefix listing is a range scan.
///
/// # Examples
///
/// ```
/// # use proevent_storage::{KeyValueStore, MemoryBackend};
/// # #[tokio::main]
/// # async fn main() {
/// let backend = MemoryBackend::new();
/// backend.put("proevent_leads", b"[]").await.unwrap();
/// assert!(backend.exists("proevent_leads").await.unwrap());
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryBackend {
    /// Create a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let entries = self.entries.read().await;
        let keys = entries
            .range(prefix.to_owned()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect();
        Ok(keys)
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let entries = self.entries.read().await;
        Ok(entries.contains_key(key))
    }
}
