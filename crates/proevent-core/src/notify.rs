//! User-facing notifications.
//!
//! The submission controller reports every terminal outcome through a
//! [`Notifier`], which fans the notice out to registered sinks.
//! Notifications are fire-and-forget: sinks return nothing, must not
//! block, and deal with their own failures. Display and dismissal timing
//! are presentation concerns that live entirely in the sink.
//!
//! The notifier is injected at controller construction — there is no
//! module-level singleton to reach for.

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The lead reached the remote endpoint.
    Success,
    /// The submission was rejected before any attempt was made.
    Error,
    /// Degraded success — the lead was kept locally.
    Info,
}

impl NoticeKind {
    /// Stable tag for structured log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// One transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Human-readable text.
    pub message: String,
}

/// A destination for notices.
///
/// Implementations must be fast and infallible from the caller's point
/// of view — a sink that can fail internally logs and moves on.
pub trait NotificationSink: Send + Sync {
    /// The sink's name (for log lines).
    fn name(&self) -> &str;

    /// Deliver one notice. Fire-and-forget.
    fn notify(&self, notice: &Notice);
}

/// Fans notices out to zero or more sinks.
#[derive(Clone)]
pub struct Notifier {
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl Notifier {
    /// Create a notifier over the given sinks.
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn NotificationSink>>) -> Self {
        Self { sinks }
    }

    /// A notifier that drops every notice. Useful for embedding contexts
    /// that surface outcomes themselves.
    #[must_use]
    pub fn silent() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Deliver a notice to every sink.
    pub fn notify(&self, kind: NoticeKind, message: impl Into<String>) {
        let notice = Notice {
            kind,
            message: message.into(),
        };
        debug!(kind = notice.kind.as_str(), sinks = self.sinks.len(), "notice emitted");
        for sink in &self.sinks {
            sink.notify(&notice);
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("sinks", &self.sinks.len())
            .finish_non_exhaustive()
    }
}

/// Sink that turns notices into structured log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn name(&self) -> &str {
        "tracing"
    }

    fn notify(&self, notice: &Notice) {
        match notice.kind {
            NoticeKind::Success | NoticeKind::Info => {
                info!(kind = notice.kind.as_str(), message = %notice.message, "notice");
            }
            NoticeKind::Error => {
                warn!(kind = notice.kind.as_str(), message = %notice.message, "notice");
            }
        }
    }
}

/// Sink that records every notice in memory.
///
/// Intended for tests and for embedders that render notices themselves.
#[derive(Default)]
pub struct MemorySink {
    notices: Mutex<Vec<Notice>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far, in delivery order.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }
}

impl NotificationSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn notify(&self, notice: &Notice) {
        // A poisoned lock means a test already panicked; dropping the
        // notice is fine for a fire-and-forget sink.
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.clone());
        }
    }
}

impl std::fmt::Debug for MemorySink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySink").finish_non_exhaustive()
    }
}
