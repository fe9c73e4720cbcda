//! Tests for the file chooser broker's pending-request lifecycle:
//! none pending → pending → resolved or cancelled.

use std::path::PathBuf;

use kioskview::services::file_chooser::{FileChooserBroker, FileChooserTrait};
use kioskview::types::errors::FileChooserError;
use kioskview::types::file_chooser::{ChooserId, ChooserMode, ChooserOutcome, FileChooserParams};
use kioskview::types::settings::UploadSettings;

fn params(multiple: bool) -> FileChooserParams {
    FileChooserParams {
        accept_types: vec!["image/*".to_string()],
        mode: if multiple {
            ChooserMode::OpenMultiple
        } else {
            ChooserMode::Open
        },
        capture: None,
    }
}

fn broker() -> FileChooserBroker {
    FileChooserBroker::new(UploadSettings::default())
}

#[test]
fn test_starts_with_nothing_pending() {
    let broker = broker();
    assert!(!broker.is_pending());
    assert!(broker.pending().is_none());
}

#[test]
fn test_open_then_resolve_clears_pending() {
    let mut broker = broker();
    let opened = broker.open("ks-1", params(false)).unwrap();
    assert!(opened.superseded.is_none());
    assert!(broker.is_pending());
    assert_eq!(opened.ticket.input_token, "ks-1");

    let paths = vec![PathBuf::from("/tmp/a.png")];
    let done = broker
        .resolve(&opened.ticket.id, ChooserOutcome::Selected(paths.clone()))
        .unwrap();

    assert_eq!(done.outcome, ChooserOutcome::Selected(paths));
    assert_eq!(done.ticket.input_token, "ks-1");
    assert!(!broker.is_pending());
}

#[test]
fn test_cancelled_result_clears_pending() {
    let mut broker = broker();
    let opened = broker.open("ks-1", params(false)).unwrap();

    let done = broker
        .resolve(&opened.ticket.id, ChooserOutcome::Cancelled)
        .unwrap();
    assert_eq!(done.outcome, ChooserOutcome::Cancelled);
    assert!(!broker.is_pending());
}

#[test]
fn test_empty_selection_counts_as_cancelled() {
    let mut broker = broker();
    let opened = broker.open("ks-1", params(true)).unwrap();

    let done = broker
        .resolve(&opened.ticket.id, ChooserOutcome::Selected(Vec::new()))
        .unwrap();
    assert_eq!(done.outcome, ChooserOutcome::Cancelled);
}

#[test]
fn test_new_request_supersedes_pending_one() {
    let mut broker = broker();
    let first = broker.open("ks-1", params(false)).unwrap();
    let second = broker.open("ks-2", params(false)).unwrap();

    assert_eq!(second.superseded.as_ref(), Some(&first.ticket));
    assert_ne!(first.ticket.id, second.ticket.id);
    assert_eq!(broker.pending().map(|t| t.input_token.as_str()), Some("ks-2"));
}

#[test]
fn test_resolve_without_pending_fails() {
    let mut broker = broker();
    let err = broker
        .resolve(&ChooserId::new(), ChooserOutcome::Cancelled)
        .unwrap_err();
    assert!(matches!(err, FileChooserError::NoPendingRequest));
}

#[test]
fn test_second_resolve_of_same_ticket_fails() {
    let mut broker = broker();
    let opened = broker.open("ks-1", params(false)).unwrap();
    broker
        .resolve(&opened.ticket.id, ChooserOutcome::Cancelled)
        .unwrap();

    assert!(matches!(
        broker.resolve(&opened.ticket.id, ChooserOutcome::Cancelled),
        Err(FileChooserError::NoPendingRequest)
    ));
}

#[test]
fn test_abandon_reports_cancellation() {
    let mut broker = broker();
    let opened = broker.open("ks-7", params(false)).unwrap();

    let done = broker.abandon(&opened.ticket.id).unwrap();
    assert_eq!(done.outcome, ChooserOutcome::Cancelled);
    assert_eq!(done.ticket.input_token, "ks-7");
    assert!(!broker.is_pending());
}

#[test]
fn test_disabled_uploads_refuse_requests() {
    let mut broker = FileChooserBroker::new(UploadSettings {
        enabled: false,
        ..UploadSettings::default()
    });
    assert!(matches!(
        broker.open("ks-1", params(false)),
        Err(FileChooserError::Disabled)
    ));
    assert!(!broker.is_pending());
}

#[test]
fn test_multiple_mode_kept_when_allowed() {
    let mut broker = broker();
    let opened = broker.open("ks-1", params(true)).unwrap();
    assert!(opened.ticket.params.allows_multiple());
}

#[test]
fn test_cancel_pending_on_shutdown() {
    let mut broker = broker();
    assert!(broker.cancel_pending().is_none());
    broker.open("ks-1", params(false)).unwrap();
    let cancelled = broker.cancel_pending().unwrap();
    assert_eq!(cancelled.input_token, "ks-1");
    assert!(!broker.is_pending());
}
