//! Lead records and form validation.
//!
//! A [`LeadForm`] is what the capture surface hands over: raw strings,
//! untrimmed, service possibly unselected. A [`LeadRecord`] is the
//! immutable unit that travels to the remote endpoint or into the local
//! store — required fields verified, service key resolved, submission
//! timestamp stamped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::ServiceCatalog;
use crate::error::ValidationError;

/// Raw form input, exactly as captured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadForm {
    /// Contact name. Required.
    pub name: String,
    /// Contact email. Required; presence only, no format check.
    pub email: String,
    /// Phone number. Optional.
    pub phone: String,
    /// Company name. Optional.
    pub company: String,
    /// Requested service key; `None` means "use the default selection".
    pub service: Option<String>,
    /// Free-form enquiry text. Optional.
    pub message: String,
}

impl LeadForm {
    /// Check that the required fields are present after trimming.
    ///
    /// # Errors
    ///
    /// Returns the first missing required field, name before email.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        Ok(())
    }

    /// Validate and assemble the immutable record for one submission
    /// attempt. `submitted_at` is stamped by the caller at the moment the
    /// attempt is made and never changes afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a required field is empty.
    pub fn into_record(
        self,
        catalog: &ServiceCatalog,
        submitted_at: DateTime<Utc>,
    ) -> Result<LeadRecord, ValidationError> {
        self.validate()?;
        let service = catalog.resolve(self.service.as_deref());
        Ok(LeadRecord {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone,
            company: self.company,
            service,
            message: self.message,
            submitted_at,
        })
    }
}

/// A captured lead — the unit appended to the local store and sent to
/// the remote endpoint.
///
/// Records are immutable once created and are never deduplicated or
/// removed by this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    /// Contact name (trimmed, non-empty).
    pub name: String,
    /// Contact email (trimmed, non-empty).
    pub email: String,
    /// Phone number; empty when not provided.
    pub phone: String,
    /// Company name; empty when not provided.
    pub company: String,
    /// Resolved service catalog key.
    pub service: String,
    /// Free-form enquiry text; empty when not provided.
    pub message: String,
    /// When the submission attempt was made.
    pub submitted_at: DateTime<Utc>,
}
