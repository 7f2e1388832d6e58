use super::*;

#[test]
fn push_toast_assigns_increasing_ids() {
    let mut ui = UiState::default();
    let a = ui.push_toast(ToastKind::Info, "a");
    let b = ui.push_toast(ToastKind::Error, "b");
    assert!(b > a);
    assert_eq!(ui.toasts.len(), 2);
}

#[test]
fn dismiss_toast_removes_only_that_toast() {
    let mut ui = UiState::default();
    let a = ui.push_toast(ToastKind::Info, "a");
    ui.push_toast(ToastKind::Info, "b");
    assert!(ui.dismiss_toast(a));
    assert!(!ui.dismiss_toast(a));
    assert_eq!(ui.toasts.len(), 1);
    assert_eq!(ui.toasts[0].message, "b");
}

#[test]
fn present_toast_returns_id() {
    let mut ui = UiState::default();
    let id = ui.present(Notice::Toast { kind: ToastKind::Success, message: "done".to_owned() });
    assert!(id.is_some());
    assert!(ui.current_modal().is_none());
}

#[test]
fn modals_queue_in_arrival_order() {
    let mut ui = UiState::default();
    let first = DecisionModal { status: ApplicationStatus::Approved, filename: "a.pdf".to_owned() };
    let second = DecisionModal { status: ApplicationStatus::Rejected, filename: "b.pdf".to_owned() };
    assert_eq!(ui.present(Notice::Modal(first.clone())), None);
    ui.present(Notice::Modal(second.clone()));
    assert_eq!(ui.current_modal(), Some(&first));
    assert_eq!(ui.close_modal(), Some(first));
    assert_eq!(ui.current_modal(), Some(&second));
    assert!(ui.toasts.is_empty());
}

#[test]
fn toast_kind_modifiers() {
    assert_eq!(ToastKind::default().modifier(), "info");
    assert_eq!(ToastKind::Warning.modifier(), "warning");
}

#[test]
fn decision_modal_copy_depends_on_status() {
    let approved = DecisionModal { status: ApplicationStatus::Approved, filename: "a".to_owned() };
    let rejected = DecisionModal { status: ApplicationStatus::Rejected, filename: "a".to_owned() };
    assert_ne!(approved.heading(), rejected.heading());
    assert!(rejected.body().contains("contact the approver"));
}
