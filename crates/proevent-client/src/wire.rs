//! Wire types for the capture API.

use serde::{Deserialize, Serialize};

use proevent_core::lead::LeadRecord;

/// Request body for `POST /api/leads`.
///
/// Exactly the contact fields — `submitted_at` is a local bookkeeping
/// value and never goes on the wire; the endpoint stamps its own
/// `created_at`.
#[derive(Debug, Serialize)]
pub(crate) struct LeadPayload<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub company: &'a str,
    pub service: &'a str,
    pub message: &'a str,
}

impl<'a> From<&'a LeadRecord> for LeadPayload<'a> {
    fn from(lead: &'a LeadRecord) -> Self {
        Self {
            name: &lead.name,
            email: &lead.email,
            phone: &lead.phone,
            company: &lead.company,
            service: &lead.service,
            message: &lead.message,
        }
    }
}

/// Success-status response body. Anything that does not decode to this
/// shape is a malformed response.
#[derive(Debug, Deserialize)]
pub(crate) struct AckBody {
    /// The acceptance flag. Absent means the shape is not recognized.
    pub ok: Option<bool>,
    /// Server-assigned lead id.
    pub id: Option<String>,
}

/// Error-status response body, as the capture API shapes it.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use chrono::Utc;

    use super::*;

    #[test]
    fn payload_carries_exactly_the_contact_fields() {
        let lead = LeadRecord {
            name: "Aarav".to_owned(),
            email: "a@x.com".to_owned(),
            phone: String::new(),
            company: String::new(),
            service: "fabrication".to_owned(),
            message: "hello".to_owned(),
            submitted_at: Utc::now(),
        };

        let value = serde_json::to_value(LeadPayload::from(&lead)).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["company", "email", "message", "name", "phone", "service"]
        );
    }
}
