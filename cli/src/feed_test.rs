use super::*;
use frames::{ApplicationPayload, ApplicationStatus, BoardAction};

fn notification(id: u64) -> NotificationPayload {
    NotificationPayload {
        id,
        title: "Application approved".to_owned(),
        message: "plan.pdf was approved".to_owned(),
        time_ago: "2 minutes ago".to_owned(),
        is_read: false,
        notification_type: None,
        application_id: Some(4),
    }
}

#[test]
fn pong_prints_nothing() {
    assert_eq!(format_inbound(&Inbound::Pong, false), None);
    assert_eq!(format_inbound(&Inbound::Pong, true), None);
}

#[test]
fn notification_line_includes_age() {
    let line = format_inbound(&Inbound::Notification { data: notification(7) }, false).expect("line");
    assert_eq!(line, "[notification #7] Application approved: plan.pdf was approved (2 minutes ago)");
}

#[test]
fn notification_line_omits_missing_age() {
    let mut item = notification(8);
    item.time_ago.clear();
    assert_eq!(format_notification(&item), "[notification #8] Application approved: plan.pdf was approved");
}

#[test]
fn board_update_line_names_target_column() {
    let inbound = Inbound::KanbanUpdate {
        action: BoardAction::ApplicationRejected,
        application: ApplicationPayload {
            id: 3,
            original_filename: "budget.xlsx".to_owned(),
            status: ApplicationStatus::Rejected,
            status_display: None,
        },
    };
    assert_eq!(
        format_inbound(&inbound, false).expect("line"),
        "[board] #3 \"budget.xlsx\" -> rejected (ApplicationRejected)"
    );
}

#[test]
fn json_mode_prints_wire_shape() {
    let line = format_inbound(&Inbound::Notification { data: notification(1) }, true).expect("line");
    let value: serde_json::Value = serde_json::from_str(&line).expect("json");
    assert_eq!(value["type"], "notification");
    assert_eq!(value["data"]["id"], 1);
}
