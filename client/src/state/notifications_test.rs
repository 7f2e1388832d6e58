use super::*;

fn payload(id: u64, title: &str) -> NotificationPayload {
    NotificationPayload {
        id,
        title: title.to_owned(),
        message: format!("{title} body"),
        time_ago: "just now".to_owned(),
        is_read: false,
        notification_type: None,
        application_id: None,
    }
}

// =============================================================
// show / dedupe
// =============================================================

#[test]
fn show_inserts_newest_first() {
    let mut feed = NotificationFeed::default();
    feed.show(&payload(1, "first"));
    feed.show(&payload(2, "second"));
    let ids: Vec<u64> = feed.cards().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(feed.unread_count(), 2);
}

#[test]
fn show_ignores_duplicate_id() {
    let mut feed = NotificationFeed::default();
    assert!(feed.show(&payload(5, "a")).is_some());
    assert!(feed.show(&payload(5, "a again")).is_none());
    assert_eq!(feed.cards().len(), 1);
    assert_eq!(feed.cards()[0].title, "a");
}

#[test]
fn read_payload_does_not_count_as_unread() {
    let mut feed = NotificationFeed::default();
    let mut read = payload(3, "seen");
    read.is_read = true;
    feed.show(&read);
    assert_eq!(feed.unread_count(), 0);
    assert_eq!(feed.badge_label(), None);
}

// =============================================================
// expiry
// =============================================================

#[test]
fn expire_removes_matching_showing() {
    let mut feed = NotificationFeed::default();
    let token = feed.show(&payload(1, "a")).expect("token");
    assert!(feed.expire(1, token));
    assert!(feed.cards().is_empty());
}

#[test]
fn stale_expiry_does_not_remove_reshown_card() {
    let mut feed = NotificationFeed::default();
    let old = feed.show(&payload(1, "a")).expect("token");
    feed.remove(1);
    let new = feed.show(&payload(1, "a")).expect("token");
    assert_ne!(old, new);
    assert!(!feed.expire(1, old));
    assert!(feed.contains(1));
    assert!(feed.expire(1, new));
}

// =============================================================
// mark read
// =============================================================

#[test]
fn mark_read_once_removes_exactly_one_card() {
    let mut feed = NotificationFeed::default();
    feed.show(&payload(1, "a"));
    feed.show(&payload(2, "b"));
    assert!(feed.begin_mark_read(1));
    assert!(feed.finish_mark_read(1, true));
    assert_eq!(feed.cards().len(), 1);
    assert_eq!(feed.unread_count(), 1);
}

#[test]
fn mark_read_of_removed_card_is_noop() {
    let mut feed = NotificationFeed::default();
    feed.show(&payload(1, "a"));
    feed.remove(1);
    assert!(!feed.begin_mark_read(1));
    assert!(!feed.finish_mark_read(1, true));
    assert_eq!(feed.unread_count(), 0);
}

#[test]
fn mark_read_in_flight_blocks_second_request() {
    let mut feed = NotificationFeed::default();
    feed.show(&payload(1, "a"));
    assert!(feed.begin_mark_read(1));
    assert!(!feed.begin_mark_read(1));
    assert!(feed.is_marking(1));
}

#[test]
fn rejected_mark_read_keeps_card() {
    let mut feed = NotificationFeed::default();
    feed.show(&payload(1, "a"));
    feed.begin_mark_read(1);
    assert!(!feed.finish_mark_read(1, false));
    assert!(feed.contains(1));
    assert!(!feed.is_marking(1));
    assert!(feed.begin_mark_read(1));
}

#[test]
fn clear_removes_all_cards() {
    let mut feed = NotificationFeed::default();
    feed.show(&payload(1, "a"));
    feed.show(&payload(2, "b"));
    assert_eq!(feed.clear(), 2);
    assert_eq!(feed.unread_count(), 0);
}

// =============================================================
// badge
// =============================================================

#[test]
fn badge_label_caps_large_counts() {
    let mut feed = NotificationFeed::default();
    assert_eq!(feed.badge_label(), None);
    for id in 0..3 {
        feed.show(&payload(id, "n"));
    }
    assert_eq!(feed.badge_label().as_deref(), Some("3"));
    for id in 3..150 {
        feed.show(&payload(id, "n"));
    }
    assert_eq!(feed.badge_label().as_deref(), Some("99+"));
}
