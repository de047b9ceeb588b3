//! Submission controller — drives one lead capture attempt end-to-end.
//!
//! Per attempt the controller moves through a fixed sequence of phases:
//!
//! ```text
//! Idle -> Validating -> Submitting -> Completed (delivered)
//!              |             |
//!              v             v
//!          Rejected    FallbackPersisting -> Completed (saved locally)
//! ```
//!
//! A validated lead is never silently dropped: it either reaches the
//! remote endpoint or a local append is attempted. The fallback terminal
//! is reached even when the local append itself fails — that failure is
//! logged and recorded on the outcome, but the user-visible message stays
//! the degraded-success notice.
//!
//! At most one attempt is in flight per controller. A second `submit`
//! while one is running returns [`SubmissionOutcome::InFlight`] and has
//! no observable effect. Once an attempt enters Submitting it runs to a
//! terminal outcome; there is no cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::content::ServiceCatalog;
use crate::error::{RemoteFailure, ValidationError};
use crate::lead::LeadForm;
use crate::notify::{NoticeKind, Notifier};
use crate::store::LeadStore;
use crate::transport::{LeadTransport, RemoteAck};

/// Notice shown when validation fails.
pub const VALIDATION_NOTICE: &str = "Please enter name and email";
/// Notice shown on full success.
pub const DELIVERED_NOTICE: &str = "Thanks! We will get back within 24 hours.";
/// Notice shown on degraded success (lead kept locally).
pub const SAVED_LOCALLY_NOTICE: &str =
    "Thanks! We could not reach our team right now, so your enquiry was saved on this device.";

/// Non-terminal phases of one submission attempt, for log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    /// Checking required fields.
    Validating,
    /// Remote attempt in progress.
    Submitting,
    /// Remote attempt failed; appending to the local store.
    FallbackPersisting,
}

impl SubmissionPhase {
    /// Stable tag for structured log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::FallbackPersisting => "fallback_persisting",
        }
    }
}

/// Terminal result of one `submit` call.
#[derive(Debug, Clone)]
pub enum SubmissionOutcome {
    /// A required field was missing. No network call, no append.
    Rejected(ValidationError),
    /// The remote endpoint acknowledged the lead. Nothing stored locally.
    Delivered {
        /// The endpoint's acknowledgment.
        ack: RemoteAck,
    },
    /// The remote attempt failed and the lead went to the local store.
    ///
    /// `persisted` is false when the local append failed too — the user
    /// still sees the degraded-success notice, but callers that care can
    /// tell the difference here.
    SavedLocally {
        /// Why the remote attempt failed.
        failure: RemoteFailure,
        /// Whether the local append succeeded.
        persisted: bool,
    },
    /// Another attempt was already in flight; this trigger was ignored.
    InFlight,
}

/// Orchestrates validation, the remote attempt, fallback persistence,
/// and user feedback for one lead submission at a time.
///
/// All collaborators are injected at construction; the controller holds
/// no ambient state.
pub struct SubmissionController {
    transport: Arc<dyn LeadTransport>,
    store: LeadStore,
    notifier: Notifier,
    catalog: ServiceCatalog,
    in_flight: AtomicBool,
}

impl SubmissionController {
    /// Create a controller over the given collaborators.
    #[must_use]
    pub fn new(
        transport: Arc<dyn LeadTransport>,
        store: LeadStore,
        notifier: Notifier,
        catalog: ServiceCatalog,
    ) -> Self {
        Self {
            transport,
            store,
            notifier,
            catalog,
            in_flight: AtomicBool::new(false),
        }
    }

    /// The local fallback store this controller appends to.
    #[must_use]
    pub fn store(&self) -> &LeadStore {
        &self.store
    }

    /// Run one submission attempt to a terminal outcome.
    ///
    /// If an attempt is already in flight the call returns
    /// [`SubmissionOutcome::InFlight`] immediately, with no side effects.
    pub async fn submit(&self, form: LeadForm) -> SubmissionOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("submission already in flight, trigger ignored");
            return SubmissionOutcome::InFlight;
        }
        let _guard = InFlightGuard {
            flag: &self.in_flight,
        };

        self.run(form).await
    }

    async fn run(&self, form: LeadForm) -> SubmissionOutcome {
        debug!(phase = SubmissionPhase::Validating.as_str(), "submission started");
        let record = match form.into_record(&self.catalog, Utc::now()) {
            Ok(record) => record,
            Err(err) => {
                debug!(error = %err, "lead rejected by validation");
                self.notifier.notify(NoticeKind::Error, VALIDATION_NOTICE);
                return SubmissionOutcome::Rejected(err);
            }
        };

        debug!(
            phase = SubmissionPhase::Submitting.as_str(),
            service = %record.service,
            "sending lead to remote endpoint"
        );
        match self.transport.send(&record).await {
            Ok(ack) => {
                info!(id = ?ack.id, "lead delivered to remote endpoint");
                self.notifier.notify(NoticeKind::Success, DELIVERED_NOTICE);
                SubmissionOutcome::Delivered { ack }
            }
            Err(failure) => {
                info!(
                    phase = SubmissionPhase::FallbackPersisting.as_str(),
                    reason = failure.reason_tag(),
                    "remote submission failed, keeping lead locally"
                );
                let persisted = match self.store.append(&record).await {
                    Ok(()) => true,
                    Err(err) => {
                        // Accepted gap: the user still sees the
                        // degraded-success notice below.
                        warn!(error = %err, "fallback persistence failed, lead not stored");
                        false
                    }
                };
                self.notifier.notify(NoticeKind::Info, SAVED_LOCALLY_NOTICE);
                SubmissionOutcome::SavedLocally { failure, persisted }
            }
        }
    }
}

impl std::fmt::Debug for SubmissionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionController")
            .field("in_flight", &self.in_flight.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Clears the in-flight flag when an attempt finishes, including by
/// panic, so the controller is never wedged shut.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
