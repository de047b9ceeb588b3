//! Remote transport contract.
//!
//! The submission controller talks to the remote endpoint through
//! [`LeadTransport`] so the HTTP client (and test doubles) plug in behind
//! the same seam. One call means one attempt: retry policy belongs to the
//! caller, and the controller's policy is a single attempt followed by
//! local fallback.

use crate::error::RemoteFailure;
use crate::lead::LeadRecord;

/// Explicit acceptance from the remote endpoint.
///
/// Produced only when the endpoint's response carries the acceptance
/// flag — transport-level success alone never yields an ack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteAck {
    /// Server-assigned lead id, when the endpoint returns one.
    pub id: Option<String>,
}

/// A one-shot carrier of lead records to the remote endpoint.
#[async_trait::async_trait]
pub trait LeadTransport: Send + Sync {
    /// Submit one record. Exactly one remote attempt per call.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteFailure`] tagged `network`, `rejected`, or
    /// `malformed`; the caller decides what failure means.
    async fn send(&self, lead: &LeadRecord) -> Result<RemoteAck, RemoteFailure>;
}
