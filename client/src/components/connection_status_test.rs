use super::*;

#[test]
fn class_carries_phase_modifier() {
    assert_eq!(
        connection_status_class(ConnectionPhase::Open),
        "connection-status__dot connection-status__dot--open"
    );
    assert_eq!(
        connection_status_class(ConnectionPhase::Backoff(2)),
        "connection-status__dot connection-status__dot--reconnecting"
    );
}

#[test]
fn text_describes_backoff_with_delay() {
    let state = ConnectionState { phase: ConnectionPhase::Backoff(3), attempt: 3, next_delay_ms: Some(4000) };
    assert_eq!(connection_status_text(&state), "Reconnecting (3) in 4s");

    let state = ConnectionState { next_delay_ms: Some(1500), ..state };
    assert_eq!(connection_status_text(&state), "Reconnecting (3) in 2s");
}

#[test]
fn text_covers_terminal_and_live_phases() {
    let mut state = ConnectionState::default();
    assert_eq!(connection_status_text(&state), "Disconnected");
    state.phase = ConnectionPhase::Open;
    assert_eq!(connection_status_text(&state), "Live");
    state.phase = ConnectionPhase::Exhausted;
    assert_eq!(connection_status_text(&state), "Offline");
}
