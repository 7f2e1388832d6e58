//! Small indicator for the push channel state.

#[cfg(test)]
#[path = "connection_status_test.rs"]
mod connection_status_test;

use frames::lifecycle::ConnectionPhase;
use leptos::prelude::*;

use crate::state::connection::ConnectionState;

#[component]
pub fn ConnectionStatus() -> impl IntoView {
    let connection = expect_context::<RwSignal<ConnectionState>>();

    let class = move || connection_status_class(connection.get().phase);
    let text = move || connection_status_text(&connection.get());
    let live = move || connection.get().is_open();

    view! {
        <div class="connection-status" class:connection-status--live=live title=text>
            <span class=class></span>
            <span class="connection-status__text">{text}</span>
        </div>
    }
}

fn connection_status_class(phase: ConnectionPhase) -> String {
    format!("connection-status__dot connection-status__dot--{}", phase.label())
}

fn connection_status_text(state: &ConnectionState) -> String {
    match state.phase {
        ConnectionPhase::Open => "Live".to_owned(),
        ConnectionPhase::Connecting => "Connecting".to_owned(),
        ConnectionPhase::Backoff(attempt) => match state.next_delay_ms {
            Some(ms) => format!("Reconnecting ({attempt}) in {}s", ms.div_ceil(1000)),
            None => format!("Reconnecting ({attempt})"),
        },
        ConnectionPhase::Exhausted => "Offline".to_owned(),
        ConnectionPhase::Closed => "Disconnected".to_owned(),
    }
}
