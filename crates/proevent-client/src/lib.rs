//! HTTP lead transport for ProEvent.
//!
//! [`HttpLeadClient`] implements the core [`LeadTransport`] contract over
//! one `POST /api/leads` request. Acceptance is the endpoint's explicit
//! `{"ok": true}` flag — an HTTP success status alone is never treated as
//! delivery. One call, one request: the controller's fallback, not a
//! retry loop, handles failure.
//!
//! [`LeadTransport`]: proevent_core::transport::LeadTransport
//!
//! # Example
//!
//! ```rust,no_run
//! use proevent_client::{HttpLeadClient, LeadClientConfig};
//!
//! # fn example() -> Result<(), proevent_client::ClientError> {
//! let client = HttpLeadClient::with_config(LeadClientConfig {
//!     base_url: "https://api.proeventdisplay.com".to_owned(),
//!     ..Default::default()
//! })?;
//! # Ok(())
//! # }
//! ```

mod client;
mod wire;

pub use client::HttpLeadClient;

use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = "proevent-client/0.1.0";

/// Configuration for the HTTP lead client.
#[derive(Debug, Clone)]
pub struct LeadClientConfig {
    /// Capture API base URL. Falls back to the `PROEVENT_API_URL`
    /// environment variable, then to `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Request timeout. A timed-out request reports as a network
    /// failure. Default: 10 seconds.
    pub timeout: Duration,
}

impl Default for LeadClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Errors constructing the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Missing or invalid configuration.
    #[error("lead client config error: {0}")]
    Config(String),

    /// The underlying HTTP client could not be built.
    #[error("lead client build failed: {0}")]
    Http(#[from] reqwest::Error),
}
