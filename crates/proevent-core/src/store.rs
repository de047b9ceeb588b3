//! Local lead store — fallback persistence for leads the remote endpoint
//! never acknowledged.
//!
//! The whole captured sequence lives under one well-known key as a JSON
//! array. `append` reads the full sequence, pushes the new record, and
//! rewrites the full sequence; there is no partial-update path. Appends
//! within one process are serialized by an async mutex, so the
//! read-modify-rewrite is atomic from the caller's point of view.
//! Writers in other processes are last-writer-wins — an accepted property
//! of the medium, not something this store defends against.
//!
//! The store is created implicitly on the first append and is never
//! pruned: records are immutable and stay for the lifetime of the medium.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use proevent_storage::KeyValueStore;

use crate::error::StoreError;
use crate::lead::LeadRecord;

/// The well-known key the lead sequence is stored under.
pub const LEADS_KEY: &str = "proevent_leads";

/// Append-only store of captured leads over a key-value medium.
#[derive(Clone)]
pub struct LeadStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    append_lock: Arc<Mutex<()>>,
}

impl LeadStore {
    /// Create a store over the given medium using [`LEADS_KEY`].
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(backend, LEADS_KEY)
    }

    /// Create a store over the given medium with a custom key.
    #[must_use]
    pub fn with_key(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            append_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Read the full captured sequence, oldest first.
    ///
    /// An absent key reads as the empty sequence.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unavailable`] if the medium cannot be read,
    /// [`StoreError::Corrupt`] if the stored sequence does not decode.
    pub async fn read_all(&self) -> Result<Vec<LeadRecord>, StoreError> {
        match self.backend.get(&self.key).await? {
            None => Ok(Vec::new()),
            Some(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Append one record at the end of the sequence.
    ///
    /// Reads the current sequence in full and rewrites it in full with
    /// the record added. Records are appended in submission order, so
    /// `submitted_at` is non-decreasing across the stored sequence.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unavailable`] if the medium cannot be read or
    /// written, [`StoreError::Corrupt`] if the existing sequence does not
    /// decode. The record is not stored in either case.
    pub async fn append(&self, record: &LeadRecord) -> Result<(), StoreError> {
        let _guard = self.append_lock.lock().await;

        let mut sequence = self.read_all().await?;
        sequence.push(record.clone());

        let bytes = serde_json::to_vec(&sequence).map_err(|e| StoreError::Corrupt {
            reason: format!("sequence serialization failed: {e}"),
        })?;
        self.backend.put(&self.key, &bytes).await?;

        debug!(total = sequence.len(), "lead appended to local store");
        Ok(())
    }
}

impl std::fmt::Debug for LeadStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
