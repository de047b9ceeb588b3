//! Shared application state.
//!
//! One [`AppState`] is constructed at startup and shared across all Axum
//! handlers via `Arc`.

use std::sync::Arc;

use proevent_storage::KeyValueStore;

use crate::forward::Forwarder;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Persistence medium for leads and status checks.
    pub storage: Arc<dyn KeyValueStore>,
    /// Best-effort lead forwarding (webhook, email relay).
    pub forwarder: Forwarder,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
