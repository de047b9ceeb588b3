//! JSON-file storage backend.
//!
//! Persists the whole store as one JSON document on disk — a map from key
//! to base64-encoded value. Every write loads the full document and
//! rewrites it in full; there are no partial updates. That is exactly the
//! behavior of the browser persistence object the lead store was designed
//! against, so this backend is the reference medium for single-writer
//! deployments. Concurrent writers from other processes are
//! last-writer-wins.
//!
//! Writes within one process are serialized by an async mutex, so an
//! `append` built on top of this backend observes a consistent
//! read-modify-write.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tokio::sync::Mutex;
use tracing::debug;

use crate::{KeyValueStore, StorageError};

/// Storage backend keeping all keys in a single JSON document.
pub struct JsonFileBackend {
    /// Path of the JSON document.
    path: PathBuf,
    /// Serializes load/modify/rewrite cycles within this process.
    guard: Mutex<()>,
}

impl JsonFileBackend {
    /// Create a backend writing to the given path.
    ///
    /// The document is created lazily on the first write; a missing file
    /// reads as an empty store.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            guard: Mutex::new(()),
        }
    }

    /// Return the filesystem path of the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full document. A missing file is an empty map.
    async fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "storage document absent, starting empty");
                return Ok(BTreeMap::new());
            }
            Err(e) => {
                return Err(StorageError::Open {
                    path: self.path.display().to_string(),
                    reason: e.to_string(),
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| StorageError::Document {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Rewrite the full document.
    async fn save(
        &self,
        key: &str,
        doc: &BTreeMap<String, String>,
    ) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(doc).map_err(|e| StorageError::Write {
            key: key.to_owned(),
            reason: format!("document serialization failed: {e}"),
        })?;

        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| StorageError::Write {
                key: key.to_owned(),
                reason: e.to_string(),
            })
    }
}

#[async_trait::async_trait]
impl KeyValueStore for JsonFileBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let _guard = self.guard.lock().await;
        let doc = self.load().await?;

        match doc.get(key) {
            None => Ok(None),
            Some(encoded) => {
                let value = BASE64.decode(encoded).map_err(|e| StorageError::Document {
                    path: self.path.display().to_string(),
                    reason: format!("value for '{key}' is not valid base64: {e}"),
                })?;
                Ok(Some(value))
            }
        }
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let _guard = self.guard.lock().await;
        let mut doc = self.load().await?;
        doc.insert(key.to_owned(), BASE64.encode(value));
        self.save(key, &doc).await
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let _guard = self.guard.lock().await;
        let doc = self.load().await?;
        // BTreeMap iterates in key order, so the result is already sorted.
        Ok(doc
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let _guard = self.guard.lock().await;
        Ok(self.load().await?.contains_key(key))
    }
}

impl std::fmt::Debug for JsonFileBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileBackend")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn doc_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("store.json")
    }

    #[tokio::test]
    async fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(doc_path(&dir));
        assert_eq!(backend.get("proevent_leads").await.unwrap(), None);
        assert!(backend.list("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn roundtrip_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = doc_path(&dir);

        let backend = JsonFileBackend::new(&path);
        backend.put("proevent_leads", b"[\"r1\"]").await.unwrap();
        drop(backend);

        let reopened = JsonFileBackend::new(&path);
        let val = reopened.get("proevent_leads").await.unwrap();
        assert_eq!(val, Some(b"[\"r1\"]".to_vec()));
    }

    #[tokio::test]
    async fn put_rewrites_full_document() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(doc_path(&dir));
        backend.put("leads/a", b"1").await.unwrap();
        backend.put("leads/b", b"2").await.unwrap();

        let keys = backend.list("leads/").await.unwrap();
        assert_eq!(keys, vec!["leads/a", "leads/b"]);
        assert_eq!(backend.get("leads/a").await.unwrap(), Some(b"1".to_vec()));
    }

    #[tokio::test]
    async fn binary_values_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(doc_path(&dir));
        let value = vec![0_u8, 159, 146, 150];
        backend.put("leads/raw", &value).await.unwrap();
        assert_eq!(backend.get("leads/raw").await.unwrap(), Some(value));
    }

    #[tokio::test]
    async fn garbage_document_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = doc_path(&dir);
        std::fs::write(&path, b"not json at all").unwrap();

        let backend = JsonFileBackend::new(&path);
        let err = backend.get("proevent_leads").await.unwrap_err();
        assert!(matches!(err, StorageError::Document { .. }), "got {err:?}");
    }
}
