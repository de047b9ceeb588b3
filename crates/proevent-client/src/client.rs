//! HTTP lead client implementation.

use reqwest::StatusCode;

use proevent_core::error::RemoteFailure;
use proevent_core::lead::LeadRecord;
use proevent_core::transport::{LeadTransport, RemoteAck};

use crate::wire::{AckBody, ErrorBody, LeadPayload};
use crate::{ClientError, LeadClientConfig, DEFAULT_BASE_URL, USER_AGENT};

/// Lead transport over HTTP.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpLeadClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpLeadClient {
    /// Create a client from environment defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ClientError> {
        Self::with_config(LeadClientConfig::default())
    }

    /// Create a client with full configuration.
    ///
    /// The base URL resolves in order: the config value, the
    /// `PROEVENT_API_URL` environment variable, the built-in default.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the resolved base URL is
    /// empty, or [`ClientError::Http`] if the HTTP client cannot be
    /// built.
    #[allow(clippy::needless_pass_by_value)]
    pub fn with_config(cfg: LeadClientConfig) -> Result<Self, ClientError> {
        let base_url = first_non_empty(&[
            &cfg.base_url,
            &std::env::var("PROEVENT_API_URL").unwrap_or_default(),
            DEFAULT_BASE_URL,
        ])
        .trim_end_matches('/')
        .to_owned();

        if base_url.is_empty() {
            return Err(ClientError::Config(
                "missing base URL — set PROEVENT_API_URL or pass base_url in config".to_owned(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { base_url, http })
    }

    /// The resolved capture API base URL (no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl LeadTransport for HttpLeadClient {
    async fn send(&self, lead: &LeadRecord) -> Result<RemoteAck, RemoteFailure> {
        let url = format!("{}/api/leads", self.base_url);
        let payload = LeadPayload::from(lead);

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RemoteFailure::Network {
                reason: if e.is_timeout() {
                    "request timed out".to_owned()
                } else {
                    e.to_string()
                },
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteFailure::Network {
                reason: format!("reading response body: {e}"),
            })?;

        interpret_response(status, &body)
    }
}

/// Decide delivery from the endpoint's status and body.
///
/// Acceptance requires a success status AND a body with `"ok": true` —
/// anything else is a failure: non-success statuses are explicit
/// declines, a success status with an unrecognizable body is malformed,
/// and a recognizable body without the flag set is a decline.
fn interpret_response(status: StatusCode, body: &str) -> Result<RemoteAck, RemoteFailure> {
    if !status.is_success() {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| "no detail".to_owned());
        return Err(RemoteFailure::Rejected {
            reason: format!("HTTP {}: {detail}", status.as_u16()),
        });
    }

    let ack: AckBody = serde_json::from_str(body).map_err(|e| RemoteFailure::Malformed {
        reason: e.to_string(),
    })?;

    match ack.ok {
        Some(true) => Ok(RemoteAck { id: ack.id }),
        Some(false) => Err(RemoteFailure::Rejected {
            reason: "endpoint answered ok=false".to_owned(),
        }),
        None => Err(RemoteFailure::Malformed {
            reason: "acceptance flag missing from response".to_owned(),
        }),
    }
}

fn first_non_empty(vals: &[&str]) -> String {
    for v in vals {
        if !v.is_empty() {
            return (*v).to_owned();
        }
    }
    String::new()
}
