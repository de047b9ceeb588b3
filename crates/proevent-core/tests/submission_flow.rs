//! End-to-end tests for the submission controller: validation gating,
//! remote delivery, fallback persistence, notification counts, and
//! reentrancy — exercised against scripted transports, an in-memory
//! medium, and a recording notification sink.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

use proevent_core::content::ServiceCatalog;
use proevent_core::error::{RemoteFailure, StoreError, ValidationError};
use proevent_core::lead::{LeadForm, LeadRecord};
use proevent_core::notify::{MemorySink, NotificationSink, NoticeKind, Notifier};
use proevent_core::store::LeadStore;
use proevent_core::submit::{SubmissionController, SubmissionOutcome};
use proevent_core::transport::{LeadTransport, RemoteAck};
use proevent_storage::{KeyValueStore, MemoryBackend, StorageError};

/// What a scripted transport should answer with.
#[derive(Clone)]
enum Script {
    Ack(Option<String>),
    Fail(RemoteFailure),
}

/// Transport that always answers per its script and counts calls.
struct ScriptedTransport {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl LeadTransport for ScriptedTransport {
    async fn send(&self, _lead: &LeadRecord) -> Result<RemoteAck, RemoteFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Ack(id) => Ok(RemoteAck { id: id.clone() }),
            Script::Fail(failure) => Err(failure.clone()),
        }
    }
}

/// Transport that parks inside `send` until released, to hold an attempt
/// in the Submitting phase.
struct GatedTransport {
    entered: Notify,
    release: Notify,
    calls: AtomicUsize,
}

impl GatedTransport {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            entered: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait::async_trait]
impl LeadTransport for GatedTransport {
    async fn send(&self, _lead: &LeadRecord) -> Result<RemoteAck, RemoteFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(RemoteAck::default())
    }
}

/// Medium whose writes always fail.
#[derive(Debug)]
struct ReadOnlyBackend(MemoryBackend);

#[async_trait::async_trait]
impl KeyValueStore for ReadOnlyBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.0.get(key).await
    }

    async fn put(&self, key: &str, _value: &[u8]) -> Result<(), StorageError> {
        Err(StorageError::Write {
            key: key.to_owned(),
            reason: "quota exceeded".to_owned(),
        })
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        self.0.list(prefix).await
    }
}

struct Harness {
    controller: SubmissionController,
    sink: Arc<MemorySink>,
    store: LeadStore,
}

fn harness_with(transport: Arc<dyn LeadTransport>, backend: Arc<dyn KeyValueStore>) -> Harness {
    let sink = Arc::new(MemorySink::new());
    let store = LeadStore::new(backend);
    let controller = SubmissionController::new(
        transport,
        store.clone(),
        Notifier::new(vec![Arc::clone(&sink) as Arc<dyn NotificationSink>]),
        ServiceCatalog::standard(),
    );
    Harness {
        controller,
        sink,
        store,
    }
}

fn harness(transport: Arc<dyn LeadTransport>) -> Harness {
    harness_with(transport, Arc::new(MemoryBackend::new()))
}

fn valid_form() -> LeadForm {
    LeadForm {
        name: "Aarav".to_owned(),
        email: "a@x.com".to_owned(),
        phone: "7060007626".to_owned(),
        company: "Acme Expo".to_owned(),
        service: Some("printing".to_owned()),
        message: "Need a 3x3 stall in Pragati Maidan".to_owned(),
    }
}

fn network_failure() -> RemoteFailure {
    RemoteFailure::Network {
        reason: "connection refused".to_owned(),
    }
}

// ── Validation gating ────────────────────────────────────────────────

#[tokio::test]
async fn missing_name_is_rejected_with_no_side_effects() {
    let transport = ScriptedTransport::new(Script::Ack(None));
    let h = harness(transport.clone());

    let form = LeadForm {
        name: "   ".to_owned(),
        ..valid_form()
    };
    let outcome = h.controller.submit(form).await;

    assert!(matches!(
        outcome,
        SubmissionOutcome::Rejected(ValidationError::MissingName)
    ));
    assert_eq!(transport.calls(), 0, "no network call on rejection");
    assert!(h.store.read_all().await.unwrap().is_empty(), "no append");

    let notices = h.sink.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Error);
}

#[tokio::test]
async fn missing_email_is_rejected_with_no_side_effects() {
    let transport = ScriptedTransport::new(Script::Ack(None));
    let h = harness(transport.clone());

    let form = LeadForm {
        email: String::new(),
        ..valid_form()
    };
    let outcome = h.controller.submit(form).await;

    assert!(matches!(
        outcome,
        SubmissionOutcome::Rejected(ValidationError::MissingEmail)
    ));
    assert_eq!(transport.calls(), 0);
    assert!(h.store.read_all().await.unwrap().is_empty());
}

// ── Remote delivery ──────────────────────────────────────────────────

#[tokio::test]
async fn acknowledged_lead_is_not_stored_locally() {
    let transport = ScriptedTransport::new(Script::Ack(Some("lead-42".to_owned())));
    let h = harness(transport.clone());

    let outcome = h.controller.submit(valid_form()).await;

    match outcome {
        SubmissionOutcome::Delivered { ack } => {
            assert_eq!(ack.id.as_deref(), Some("lead-42"));
        }
        other => panic!("expected Delivered, got {other:?}"),
    }
    assert_eq!(transport.calls(), 1);
    assert!(h.store.read_all().await.unwrap().is_empty());

    let notices = h.sink.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Success);
}

// ── Fallback persistence ─────────────────────────────────────────────

#[tokio::test]
async fn every_failure_reason_triggers_exactly_one_append() {
    let failures = [
        network_failure(),
        RemoteFailure::Rejected {
            reason: "HTTP 503".to_owned(),
        },
        RemoteFailure::Malformed {
            reason: "body is not JSON".to_owned(),
        },
    ];

    for failure in failures {
        let tag = failure.reason_tag();
        let transport = ScriptedTransport::new(Script::Fail(failure));
        let h = harness(transport.clone());

        let outcome = h.controller.submit(valid_form()).await;

        match outcome {
            SubmissionOutcome::SavedLocally { failure, persisted } => {
                assert_eq!(failure.reason_tag(), tag);
                assert!(persisted);
            }
            other => panic!("expected SavedLocally for {tag}, got {other:?}"),
        }
        assert_eq!(transport.calls(), 1);

        let stored = h.store.read_all().await.unwrap();
        assert_eq!(stored.len(), 1, "exactly one append for {tag}");
        assert_eq!(stored[0].name, "Aarav");
        assert_eq!(stored[0].email, "a@x.com");
        assert_eq!(stored[0].phone, "7060007626");
        assert_eq!(stored[0].company, "Acme Expo");
        assert_eq!(stored[0].service, "printing");

        let notices = h.sink.notices();
        assert_eq!(notices.len(), 1);
        assert_ne!(notices[0].kind, NoticeKind::Error, "degraded success is not an error");
    }
}

#[tokio::test]
async fn fallback_appends_preserve_submission_order() {
    let transport = ScriptedTransport::new(Script::Fail(network_failure()));
    let h = harness(transport);

    let first = LeadForm {
        name: "First".to_owned(),
        ..valid_form()
    };
    let second = LeadForm {
        name: "Second".to_owned(),
        ..valid_form()
    };
    h.controller.submit(first).await;
    h.controller.submit(second).await;

    let stored = h.store.read_all().await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].name, "First");
    assert_eq!(stored[1].name, "Second");
    assert!(stored[0].submitted_at <= stored[1].submitted_at);
}

#[tokio::test]
async fn unselected_service_is_stored_as_default() {
    let transport = ScriptedTransport::new(Script::Fail(network_failure()));
    let h = harness(transport);

    let form = LeadForm {
        service: None,
        ..valid_form()
    };
    h.controller.submit(form).await;

    let stored = h.store.read_all().await.unwrap();
    assert_eq!(stored[0].service, "fabrication");
}

#[tokio::test]
async fn failed_append_still_completes_with_degraded_notice() {
    let transport = ScriptedTransport::new(Script::Fail(network_failure()));
    let backend = Arc::new(ReadOnlyBackend(MemoryBackend::new()));
    let h = harness_with(transport, backend);

    let outcome = h.controller.submit(valid_form()).await;

    match outcome {
        SubmissionOutcome::SavedLocally { persisted, .. } => {
            assert!(!persisted, "append failure must be visible on the outcome");
        }
        other => panic!("expected SavedLocally, got {other:?}"),
    }

    // The user-visible message does not distinguish the storage failure.
    let notices = h.sink.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Info);

    // Sanity: the direct store error is the unavailable condition.
    let err = h
        .store
        .append(&valid_form()
            .into_record(&ServiceCatalog::standard(), chrono::Utc::now())
            .unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
}

// ── Reentrancy ───────────────────────────────────────────────────────

#[tokio::test]
async fn second_submit_while_in_flight_is_ignored() {
    let transport = GatedTransport::new();
    let sink = Arc::new(MemorySink::new());
    let store = LeadStore::new(Arc::new(MemoryBackend::new()));
    let controller = Arc::new(SubmissionController::new(
        transport.clone(),
        store.clone(),
        Notifier::new(vec![Arc::clone(&sink) as Arc<dyn NotificationSink>]),
        ServiceCatalog::standard(),
    ));

    let first = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.submit(valid_form()).await }
    });

    // Wait until the first attempt is parked inside Submitting.
    transport.entered.notified().await;

    let second = controller.submit(valid_form()).await;
    assert!(matches!(second, SubmissionOutcome::InFlight));
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1, "no duplicate call");
    assert!(sink.notices().is_empty(), "ignored trigger emits nothing");

    transport.release.notify_one();
    let outcome = first.await.unwrap();
    assert!(matches!(outcome, SubmissionOutcome::Delivered { .. }));
    assert!(store.read_all().await.unwrap().is_empty(), "no duplicate append");
    assert_eq!(sink.notices().len(), 1);

    // The controller accepts new work after the terminal state.
    let third = controller.submit(LeadForm {
        name: String::new(),
        ..valid_form()
    })
    .await;
    assert!(matches!(third, SubmissionOutcome::Rejected(_)));
}

// ── End-to-end scenarios ─────────────────────────────────────────────

#[tokio::test]
async fn scenario_network_failure_saves_aarav_locally() {
    let transport = ScriptedTransport::new(Script::Fail(network_failure()));
    let h = harness(transport);

    assert!(h.store.read_all().await.unwrap().is_empty());

    let form = LeadForm {
        name: "Aarav".to_owned(),
        email: "a@x.com".to_owned(),
        ..LeadForm::default()
    };
    h.controller.submit(form).await;

    let stored = h.store.read_all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Aarav");

    let notices = h.sink.notices();
    assert_eq!(notices.len(), 1);
    assert_ne!(notices[0].kind, NoticeKind::Error);
}

#[tokio::test]
async fn scenario_empty_name_is_rejected_with_error_notice() {
    let transport = ScriptedTransport::new(Script::Ack(None));
    let h = harness(transport);

    let form = LeadForm {
        name: String::new(),
        email: "a@x.com".to_owned(),
        ..LeadForm::default()
    };
    let outcome = h.controller.submit(form).await;

    assert!(matches!(outcome, SubmissionOutcome::Rejected(_)));
    assert!(h.store.read_all().await.unwrap().is_empty());

    let notices = h.sink.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Error);
}
