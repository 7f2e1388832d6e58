//! Connection lifecycle for a push channel consumer.
//!
//! DESIGN
//! ======
//! The lifecycle is an explicit state machine. Socket callbacks (`on_open`,
//! `on_close`) and timer expiry (`on_backoff_elapsed`) are the only inputs;
//! the driver (browser task or CLI loop) performs the side effects the
//! returned outcome asks for. Only a `Connecting` phase may own a socket, so a
//! driver that respects the machine never holds two live connections.
//!
//! ```text
//! Closed --start--> Connecting --open--> Open
//!                      |  ^                |
//!                 close|  |elapsed    close|
//!                      v  |                v
//!                   Backoff(n) <-----------+
//!                      |
//!                      +--(n == max)--> Exhausted
//! ```

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

use std::time::Duration;

pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30);

/// Backoff and keep-alive tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Delay before the first reconnect attempt.
    pub base_delay: Duration,
    /// Reconnect attempts allowed after a close before giving up.
    pub max_attempts: u32,
    /// Interval between keep-alive pings while open.
    pub keepalive_interval: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            base_delay: DEFAULT_BASE_DELAY,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            keepalive_interval: DEFAULT_KEEPALIVE_INTERVAL,
        }
    }
}

impl ReconnectPolicy {
    /// Delay before reconnect attempt `attempt` (1-based):
    /// `base_delay * 2^(attempt - 1)`.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(1_u32 << exponent)
    }
}

/// Where the connection currently is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionPhase {
    /// No socket and nothing scheduled.
    #[default]
    Closed,
    /// A socket is being opened.
    Connecting,
    /// Socket open; keep-alive running.
    Open,
    /// Waiting out the delay before reconnect attempt `n`.
    Backoff(u32),
    /// Retry budget spent; terminal until the page is reloaded.
    Exhausted,
}

impl ConnectionPhase {
    /// Short lowercase label for logs and CSS modifiers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Backoff(_) => "reconnecting",
            Self::Exhausted => "exhausted",
        }
    }
}

/// What the driver must do after a close.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Sleep for `delay`, then call [`ConnectionMachine::on_backoff_elapsed`].
    Retry { attempt: u32, delay: Duration },
    /// Retry budget spent; report and stop.
    Exhausted,
    /// The machine was shut down; stop quietly.
    Stopped,
    /// Close arrived with no live socket; nothing to do.
    Ignored,
}

/// Reconnect state machine for one push consumer.
#[derive(Clone, Debug)]
pub struct ConnectionMachine {
    policy: ReconnectPolicy,
    phase: ConnectionPhase,
    attempts: u32,
    stopped: bool,
}

impl ConnectionMachine {
    #[must_use]
    pub fn new(policy: ReconnectPolicy) -> Self {
        Self { policy, phase: ConnectionPhase::Closed, attempts: 0, stopped: false }
    }

    #[must_use]
    pub fn phase(&self) -> ConnectionPhase {
        self.phase
    }

    /// Reconnect attempts made since the last successful open.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn policy(&self) -> &ReconnectPolicy {
        &self.policy
    }

    /// Delay of the pending backoff, if one is pending.
    #[must_use]
    pub fn pending_delay(&self) -> Option<Duration> {
        match self.phase {
            ConnectionPhase::Backoff(attempt) => Some(self.policy.delay_for(attempt)),
            _ => None,
        }
    }

    /// Begin the first connection. Returns `true` when the driver should open
    /// a socket.
    pub fn start(&mut self) -> bool {
        if self.stopped || self.phase != ConnectionPhase::Closed {
            return false;
        }
        self.phase = ConnectionPhase::Connecting;
        true
    }

    /// The socket finished its handshake.
    pub fn on_open(&mut self) {
        if self.phase == ConnectionPhase::Connecting {
            self.phase = ConnectionPhase::Open;
            self.attempts = 0;
        }
    }

    /// The socket closed or failed to open, for any reason.
    pub fn on_close(&mut self) -> CloseOutcome {
        if self.stopped {
            self.phase = ConnectionPhase::Closed;
            return CloseOutcome::Stopped;
        }
        if !matches!(self.phase, ConnectionPhase::Connecting | ConnectionPhase::Open) {
            return CloseOutcome::Ignored;
        }
        if self.attempts >= self.policy.max_attempts {
            self.phase = ConnectionPhase::Exhausted;
            return CloseOutcome::Exhausted;
        }
        self.attempts += 1;
        self.phase = ConnectionPhase::Backoff(self.attempts);
        CloseOutcome::Retry { attempt: self.attempts, delay: self.policy.delay_for(self.attempts) }
    }

    /// The backoff timer fired. Returns `true` when the driver should open a
    /// socket.
    pub fn on_backoff_elapsed(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        if let ConnectionPhase::Backoff(_) = self.phase {
            self.phase = ConnectionPhase::Connecting;
            return true;
        }
        false
    }

    /// Tear down for page exit. No further attempts are made.
    pub fn shutdown(&mut self) {
        self.stopped = true;
        self.phase = ConnectionPhase::Closed;
    }
}

impl Default for ConnectionMachine {
    fn default() -> Self {
        Self::new(ReconnectPolicy::default())
    }
}
