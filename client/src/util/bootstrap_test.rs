use super::*;
use frames::ApplicationStatus;

#[test]
fn parse_reads_role_policy_and_cards() {
    let text = r#"{
        "role": "approver",
        "move_failure": "rollback",
        "cards": [
            {"id": 1, "status": "pending", "title": "a.pdf", "html": "<div>a</div>"},
            {"id": 2, "status": "approved"}
        ]
    }"#;
    let boot = PageBootstrap::parse(text).expect("parse");
    assert_eq!(boot.role, ViewerRole::Approver);
    assert_eq!(boot.move_failure, MoveFailurePolicy::Rollback);
    assert_eq!(boot.cards.len(), 2);
    assert!(boot.cards[1].html.is_empty());

    let board = boot.kanban_state();
    assert_eq!(board.role(), ViewerRole::Approver);
    assert_eq!(board.column(ApplicationStatus::Approved).len(), 1);
}

#[test]
fn parse_defaults_to_read_only_empty_board() {
    let boot = PageBootstrap::parse("{}").expect("parse");
    assert_eq!(boot, PageBootstrap::default());
    assert_eq!(boot.role, ViewerRole::Applicant);
    assert_eq!(boot.move_failure, MoveFailurePolicy::Reload);
}

#[test]
fn parse_rejects_unknown_role() {
    assert!(PageBootstrap::parse(r#"{"role":"admin"}"#).is_err());
}

#[test]
fn reconnect_policy_applies_overrides() {
    let boot = PageBootstrap {
        reconnect_base_delay_ms: Some(250),
        reconnect_max_attempts: Some(3),
        ..PageBootstrap::default()
    };
    let policy = boot.reconnect_policy();
    assert_eq!(policy.base_delay, Duration::from_millis(250));
    assert_eq!(policy.max_attempts, 3);
    assert_eq!(policy.keepalive_interval, ReconnectPolicy::default().keepalive_interval);
}

#[test]
fn script_json_escapes_markup_and_parses_back() {
    let boot = PageBootstrap {
        role: ViewerRole::Approver,
        cards: vec![KanbanCard {
            id: 7,
            status: ApplicationStatus::Pending,
            title: "x".to_owned(),
            html: "<div></script></div>".to_owned(),
        }],
        ..PageBootstrap::default()
    };
    let json = boot.to_script_json();
    assert!(!json.contains('<'));
    assert_eq!(PageBootstrap::parse(&json).expect("parse"), boot);
}
