use super::*;

fn machine() -> ConnectionMachine {
    ConnectionMachine::new(ReconnectPolicy::default())
}

fn retry_delay(outcome: CloseOutcome) -> Duration {
    match outcome {
        CloseOutcome::Retry { delay, .. } => delay,
        other => panic!("expected retry, got {other:?}"),
    }
}

// =============================================================
// ReconnectPolicy
// =============================================================

#[test]
fn default_policy_matches_documented_values() {
    let policy = ReconnectPolicy::default();
    assert_eq!(policy.base_delay, Duration::from_secs(1));
    assert_eq!(policy.max_attempts, 5);
    assert_eq!(policy.keepalive_interval, Duration::from_secs(30));
}

#[test]
fn delay_doubles_per_attempt() {
    let policy = ReconnectPolicy::default();
    assert_eq!(policy.delay_for(1), Duration::from_secs(1));
    assert_eq!(policy.delay_for(2), Duration::from_secs(2));
    assert_eq!(policy.delay_for(3), Duration::from_secs(4));
    assert_eq!(policy.delay_for(5), Duration::from_secs(16));
}

#[test]
fn delay_saturates_for_huge_attempt_numbers() {
    let policy = ReconnectPolicy { base_delay: Duration::from_secs(u64::MAX / 2), ..ReconnectPolicy::default() };
    assert_eq!(policy.delay_for(40), Duration::MAX);
}

// =============================================================
// ConnectionMachine
// =============================================================

#[test]
fn start_moves_closed_to_connecting_once() {
    let mut m = machine();
    assert!(m.start());
    assert_eq!(m.phase(), ConnectionPhase::Connecting);
    assert!(!m.start());
}

#[test]
fn open_then_close_retries_after_one_second_then_two() {
    let mut m = machine();
    m.start();
    m.on_open();
    assert_eq!(retry_delay(m.on_close()), Duration::from_secs(1));
    assert!(m.on_backoff_elapsed());
    assert_eq!(retry_delay(m.on_close()), Duration::from_secs(2));
    assert_eq!(m.phase(), ConnectionPhase::Backoff(2));
}

#[test]
fn delays_grow_geometrically_until_cap_then_stop() {
    let mut m = machine();
    m.start();
    let mut delays = Vec::new();
    loop {
        match m.on_close() {
            CloseOutcome::Retry { delay, .. } => {
                delays.push(delay);
                assert!(m.on_backoff_elapsed());
            }
            CloseOutcome::Exhausted => break,
            other => panic!("unexpected outcome {other:?}"),
        }
    }
    assert_eq!(delays.len(), 5);
    for pair in delays.windows(2) {
        assert_eq!(pair[1], pair[0] * 2);
    }
    assert_eq!(m.phase(), ConnectionPhase::Exhausted);
    assert!(!m.on_backoff_elapsed());
    assert!(!m.start());
}

#[test]
fn successful_open_resets_attempts() {
    let mut m = machine();
    m.start();
    m.on_close();
    m.on_backoff_elapsed();
    m.on_close();
    assert_eq!(m.attempts(), 2);
    m.on_backoff_elapsed();
    m.on_open();
    assert_eq!(m.attempts(), 0);
    assert_eq!(retry_delay(m.on_close()), Duration::from_secs(1));
}

#[test]
fn close_without_live_socket_is_ignored() {
    let mut m = machine();
    assert_eq!(m.on_close(), CloseOutcome::Ignored);
    m.start();
    m.on_close();
    assert_eq!(m.on_close(), CloseOutcome::Ignored);
    assert_eq!(m.phase(), ConnectionPhase::Backoff(1));
}

#[test]
fn shutdown_stops_reconnects() {
    let mut m = machine();
    m.start();
    m.on_open();
    m.shutdown();
    assert_eq!(m.on_close(), CloseOutcome::Stopped);
    assert_eq!(m.phase(), ConnectionPhase::Closed);
    assert!(!m.start());
}

#[test]
fn shutdown_during_backoff_cancels_pending_attempt() {
    let mut m = machine();
    m.start();
    m.on_close();
    m.shutdown();
    assert!(!m.on_backoff_elapsed());
    assert!(m.stopped);
}

#[test]
fn pending_delay_reports_backoff_only() {
    let mut m = machine();
    assert_eq!(m.pending_delay(), None);
    m.start();
    m.on_close();
    assert_eq!(m.pending_delay(), Some(Duration::from_secs(1)));
}

#[test]
fn phase_labels_are_stable() {
    assert_eq!(ConnectionPhase::Closed.label(), "closed");
    assert_eq!(ConnectionPhase::Backoff(3).label(), "reconnecting");
    assert_eq!(ConnectionPhase::Exhausted.label(), "exhausted");
}
