//! Storage backend abstraction for ProEvent lead capture.
//!
//! This crate defines the [`KeyValueStore`] trait — a small key-value
//! persistence interface that knows nothing about leads, forms, or HTTP.
//! The lead store in `proevent-core` sits on top of a backend and keeps the
//! whole captured-lead sequence under a single well-known key; the capture
//! server keeps one record per key.
//!
//! Three implementations are provided:
//!
//! - [`RedbBackend`] — production default, pure-Rust embedded B-tree
//!   database (feature `redb-backend`)
//! - [`JsonFileBackend`] — one JSON document on disk, read in full and
//!   rewritten in full on every write
//! - [`MemoryBackend`] — in-memory, for tests and development

mod error;
mod file_backend;
mod memory;
#[cfg(feature = "redb-backend")]
mod redb_backend;

pub use error::StorageError;
pub use file_backend::JsonFileBackend;
pub use memory::MemoryBackend;
#[cfg(feature = "redb-backend")]
pub use redb_backend::RedbBackend;

/// A pluggable key-value persistence medium.
///
/// Keys are UTF-8 strings using `/` as a separator (e.g. `leads/<id>`,
/// `status/<id>`); the single-key lead store uses a bare well-known key.
/// Values are opaque byte arrays — callers decide the encoding.
///
/// There is deliberately no delete operation: captured leads are
/// append-only and are never pruned by this system.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Retrieve a value by key.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the underlying medium fails.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store a key-value pair, overwriting any existing value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the underlying medium fails.
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// List all keys that start with the given prefix, in ascending key
    /// order. Returns keys only, not values.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::List`] if the underlying medium fails.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    /// Check whether a key exists.
    ///
    /// The default implementation calls [`get`](KeyValueStore::get) and
    /// checks for `Some`. Backends may override this with a cheaper check.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the underlying medium fails.
    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get(key).await?.is_some())
    }
}
