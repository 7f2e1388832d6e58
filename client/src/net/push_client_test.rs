use super::*;
use std::cell::RefCell;

use frames::{ApplicationPayload, ApplicationStatus, BoardAction};

// =============================================================
// HandlerRegistry
// =============================================================

#[test]
fn dispatch_runs_handlers_in_registration_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut registry = HandlerRegistry::default();
    for tag in ["first", "second"] {
        let seen = Rc::clone(&seen);
        registry.register(move |_| seen.borrow_mut().push(tag));
    }

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.dispatch(&Inbound::Pong), 2);
    assert_eq!(*seen.borrow(), vec!["first", "second"]);
}

#[test]
fn dispatch_text_decodes_before_dispatch() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut registry = HandlerRegistry::default();
    {
        let seen = Rc::clone(&seen);
        registry.register(move |msg| seen.borrow_mut().push(msg.clone()));
    }

    let text = r#"{"type":"kanban_update","action":"application_approved","application":{"id":9,"status":"approved"}}"#;
    assert_eq!(registry.dispatch_text(text).expect("dispatch"), 1);
    let seen = seen.borrow();
    assert_eq!(
        seen[0],
        Inbound::KanbanUpdate {
            action: BoardAction::ApplicationApproved,
            application: ApplicationPayload {
                id: 9,
                original_filename: String::new(),
                status: ApplicationStatus::Approved,
                status_display: None,
            },
        }
    );
}

#[test]
fn dispatch_text_drops_malformed_without_running_handlers() {
    let calls = Rc::new(RefCell::new(0));
    let mut registry = HandlerRegistry::default();
    {
        let calls = Rc::clone(&calls);
        registry.register(move |_| *calls.borrow_mut() += 1);
    }

    assert!(registry.dispatch_text("{not json").is_err());
    assert!(matches!(registry.dispatch_text(r#"{"type":"other"}"#), Err(CodecError::UnknownType(_))));
    assert_eq!(*calls.borrow(), 0);

    registry.dispatch_text(r#"{"type":"pong"}"#).expect("dispatch");
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn empty_registry_dispatches_to_nobody() {
    let registry = HandlerRegistry::default();
    assert!(registry.is_empty());
    assert_eq!(registry.dispatch(&Inbound::Pong), 0);
}

// =============================================================
// Endpoint and queue helpers
// =============================================================

#[test]
fn push_endpoint_follows_page_protocol() {
    assert_eq!(push_endpoint("https:", "example.com"), "wss://example.com/ws/notifications/");
    assert_eq!(push_endpoint("http:", "127.0.0.1:8000"), "ws://127.0.0.1:8000/ws/notifications/");
    assert_eq!(push_endpoint("", "localhost"), "ws://localhost/ws/notifications/");
}

#[test]
fn drain_stale_reports_close_requests() {
    assert!(!drain_stale(Vec::new()));
    assert!(!drain_stale(vec![Command::Send("{}".to_owned())]));
    assert!(drain_stale(vec![Command::Send("{}".to_owned()), Command::Close]));
    assert!(drain_stale(vec![Command::Close, Command::Send("{}".to_owned())]));
}

#[test]
fn backoff_ends_on_close_or_closed_queue_only() {
    assert!(!ends_backoff(Some(&Command::Send(frames::encode_outbound(&Outbound::Ping)))));
    assert!(ends_backoff(Some(&Command::Close)));
    assert!(ends_backoff(None));
}

#[test]
fn sender_without_client_reports_not_sent() {
    let sender = PushSender::default();
    assert!(!sender.send(&Outbound::Ping));
    sender.close();
}
