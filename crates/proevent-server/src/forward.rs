//! Best-effort lead forwarding.
//!
//! An accepted lead is posted to a configured webhook and emailed through
//! a SendGrid-style relay. Both are fire-and-forget from the client's
//! point of view: a forwarding failure is logged and reported as a
//! `false` flag in the create response, never as a request failure.

use std::time::Duration;

use tracing::warn;

use crate::config::{EmailRelayConfig, ForwardConfig};
use crate::routes::leads::Lead;

const FORWARD_TIMEOUT: Duration = Duration::from_secs(10);
const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Forwards accepted leads to the configured destinations.
pub struct Forwarder {
    http: reqwest::Client,
    webhook_url: Option<String>,
    email: Option<EmailRelayConfig>,
}

impl Forwarder {
    /// Build a forwarder from configuration.
    ///
    /// # Errors
    ///
    /// Returns the underlying error if the HTTP client cannot be built.
    pub fn new(config: ForwardConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(FORWARD_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            webhook_url: config.webhook_url,
            email: config.email,
        })
    }

    /// Post the full lead to the configured webhook.
    ///
    /// Returns whether the webhook accepted it; `false` when no webhook
    /// is configured.
    pub async fn forward_webhook(&self, lead: &Lead) -> bool {
        let Some(url) = &self.webhook_url else {
            return false;
        };

        match self.http.post(url).json(lead).send().await {
            Ok(resp) if matches!(resp.status().as_u16(), 200 | 201 | 202) => true,
            Ok(resp) => {
                warn!(status = resp.status().as_u16(), "lead webhook declined the forward");
                false
            }
            Err(e) => {
                warn!(error = %e, "lead webhook forward failed");
                false
            }
        }
    }

    /// Email the lead summary through the relay.
    ///
    /// Returns whether the relay accepted it; `false` when no relay is
    /// configured.
    pub async fn send_email(&self, lead: &Lead) -> bool {
        let Some(email) = &self.email else {
            return false;
        };

        let subject = format!("New Lead: {} — {}", lead.name, lead.service);
        let text = format!(
            "New lead details\n\
             Name: {}\n\
             Email: {}\n\
             Phone: {}\n\
             Company: {}\n\
             Service: {}\n\
             Message: {}\n\
             Time: {}\n",
            lead.name,
            lead.email,
            lead.phone,
            lead.company,
            lead.service,
            lead.message,
            lead.created_at.to_rfc3339(),
        );

        let body = serde_json::json!({
            "personalizations": [{
                "to": [{ "email": email.to }],
                "subject": subject,
            }],
            "from": { "email": email.from },
            "content": [{ "type": "text/plain", "value": text }],
        });

        let request = self
            .http
            .post(SENDGRID_SEND_URL)
            .header("Authorization", format!("Bearer {}", email.api_key))
            .json(&body);

        match request.send().await {
            Ok(resp) if matches!(resp.status().as_u16(), 200 | 202) => true,
            Ok(resp) => {
                warn!(status = resp.status().as_u16(), "email relay declined the lead");
                false
            }
            Err(e) => {
                warn!(error = %e, "email relay send failed");
                false
            }
        }
    }
}

impl std::fmt::Debug for Forwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forwarder")
            .field("webhook", &self.webhook_url.is_some())
            .field("email", &self.email.is_some())
            .finish_non_exhaustive()
    }
}
