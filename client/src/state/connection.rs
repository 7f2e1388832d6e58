//! Push connection status as seen by the UI.
//!
//! SYSTEM CONTEXT
//! ==============
//! The push client owns the `ConnectionMachine`; after every transition it
//! copies the observable parts here so components can render status without
//! touching the machine itself.

#[cfg(test)]
#[path = "connection_test.rs"]
mod connection_test;

use frames::lifecycle::{ConnectionMachine, ConnectionPhase};

/// Read-only projection of the connection lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectionState {
    /// Current lifecycle phase.
    pub phase: ConnectionPhase,
    /// Reconnect attempts since the last successful open.
    pub attempt: u32,
    /// Delay of the pending reconnect, in milliseconds.
    pub next_delay_ms: Option<u64>,
}

impl ConnectionState {
    /// Copy the observable state out of `machine`.
    pub fn sync(&mut self, machine: &ConnectionMachine) {
        self.phase = machine.phase();
        self.attempt = machine.attempts();
        self.next_delay_ms = machine
            .pending_delay()
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase == ConnectionPhase::Open
    }
}
