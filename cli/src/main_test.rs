use super::*;

// =============================================================
// URLs and headers
// =============================================================

#[test]
fn ws_url_maps_scheme_and_appends_push_path() {
    assert_eq!(ws_url("http://127.0.0.1:8000").expect("url"), "ws://127.0.0.1:8000/ws/notifications/");
    assert_eq!(ws_url("https://review.example.com/").expect("url"), "wss://review.example.com/ws/notifications/");
    assert!(matches!(ws_url("ftp://x"), Err(CliError::InvalidBaseUrl(_))));
}

#[test]
fn api_url_joins_without_double_slash() {
    assert_eq!(
        api_url("http://localhost:8000/", "/api/notifications/unread/"),
        "http://localhost:8000/api/notifications/unread/"
    );
}

#[test]
fn cookie_header_requires_session() {
    assert_eq!(cookie_header(None, Some("t")), None);
    assert_eq!(cookie_header(Some(""), None), None);
    assert_eq!(cookie_header(Some("abc"), None).as_deref(), Some("sessionid=abc"));
    assert_eq!(cookie_header(Some("abc"), Some("tok")).as_deref(), Some("sessionid=abc; csrftoken=tok"));
}

#[test]
fn push_request_carries_cookie_and_origin() {
    let ctx = CliContext {
        base_url: "http://localhost:8000".to_owned(),
        session_id: Some("abc".to_owned()),
        csrf_token: None,
    };
    let request = push_request(&ctx).expect("request");
    assert_eq!(request.uri().to_string(), "ws://localhost:8000/ws/notifications/");
    assert_eq!(request.headers()[COOKIE], "sessionid=abc");
    assert_eq!(request.headers()[ORIGIN], "http://localhost:8000");
}

// =============================================================
// Arguments
// =============================================================

#[test]
fn watch_defaults_match_reconnect_policy() {
    let cli = Cli::try_parse_from(["approval-cli", "watch"]).expect("parse");
    let Command::Watch(args) = cli.command else {
        panic!("expected watch");
    };
    assert_eq!(args.policy(), ReconnectPolicy::default());
}

#[test]
fn watch_overrides_build_policy() {
    let cli = Cli::try_parse_from([
        "approval-cli",
        "watch",
        "--max-attempts",
        "2",
        "--base-delay-ms",
        "250",
        "--keepalive-secs",
        "0",
    ])
    .expect("parse");
    let Command::Watch(args) = cli.command else {
        panic!("expected watch");
    };
    let policy = args.policy();
    assert_eq!(policy.max_attempts, 2);
    assert_eq!(policy.base_delay, Duration::from_millis(250));
    assert_eq!(policy.keepalive_interval, Duration::from_secs(1));
}

#[test]
fn unread_items_reads_results() {
    let body = serde_json::json!({"results": [{"id": 1, "title": "t", "message": "m"}]});
    let items = unread_items(&body).expect("items");
    assert_eq!(items[0].id, 1);
    assert!(unread_items(&serde_json::json!({})).expect("items").is_empty());
}
