//! Error types for `proevent-core`.
//!
//! Three small taxonomies, one per failure site in the submission flow:
//! validation, the remote attempt, and the local fallback store. None of
//! them is fatal to a hosting application — every failure degrades to a
//! user-visible notice and the caller stays interactive.

use proevent_storage::StorageError;

/// A required field was missing from the submitted form.
///
/// Checked after trimming whitespace; no format validation is applied
/// beyond presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The name field was empty.
    #[error("name is required")]
    MissingName,

    /// The email field was empty.
    #[error("email is required")]
    MissingEmail,
}

/// The remote endpoint did not accept the lead.
///
/// Any of these triggers fallback persistence in the controller — the
/// distinction matters for logs and tests, not for control flow.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteFailure {
    /// Transport-level failure: connection refused, DNS, or timeout.
    #[error("network failure: {reason}")]
    Network { reason: String },

    /// The endpoint answered but explicitly declined the lead (non-2xx
    /// status, or a response body without the acceptance flag set).
    #[error("endpoint declined the lead: {reason}")]
    Rejected { reason: String },

    /// The endpoint answered with a success status but the body was not
    /// a recognizable acceptance response.
    #[error("unrecognized endpoint response: {reason}")]
    Malformed { reason: String },
}

impl RemoteFailure {
    /// Stable reason tag for structured log fields.
    #[must_use]
    pub fn reason_tag(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Rejected { .. } => "rejected",
            Self::Malformed { .. } => "malformed",
        }
    }
}

/// Errors from the local lead store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The persistence medium could not be read or written.
    #[error("lead store unavailable: {0}")]
    Unavailable(#[from] StorageError),

    /// The persisted lead sequence could not be decoded.
    #[error("stored lead sequence is not decodable: {reason}")]
    Corrupt { reason: String },
}
