//! Live push channel for notifications and board updates.
//!
//! `spawn_push_client` owns the websocket and its [`ConnectionMachine`]. The
//! machine decides when to connect, how long to back off, and when to give
//! up; this module only performs the I/O it asks for and mirrors each
//! transition into the `ConnectionState` signal.
//!
//! Consumers never touch the socket. They register handlers on a
//! [`HandlerRegistry`] before the client starts and send through the
//! [`PushSender`] handle provided as context.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures and malformed messages never escape this module. A
//! bad message is logged and dropped; a dropped socket goes through the same
//! close/backoff path as a clean close. Running out of attempts is logged
//! only.

#[cfg(test)]
#[path = "push_client_test.rs"]
mod push_client_test;

use std::rc::Rc;

use frames::{CodecError, Inbound, Outbound};
#[cfg(feature = "hydrate")]
use frames::lifecycle::{CloseOutcome, ConnectionMachine, ReconnectPolicy};
#[cfg(feature = "hydrate")]
use leptos::prelude::{RwSignal, Update};

#[cfg(feature = "hydrate")]
use crate::state::connection::ConnectionState;

/// Path of the notification push endpoint.
pub const PUSH_PATH: &str = "/ws/notifications/";

#[cfg(feature = "hydrate")]
const OPEN_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(50);
#[cfg(feature = "hydrate")]
const OPEN_POLL_LIMIT: u32 = 200;

type Handler = Rc<dyn Fn(&Inbound)>;

/// Ordered set of inbound message handlers.
///
/// Every handler sees every decoded message, in registration order.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: Vec<Handler>,
}

impl HandlerRegistry {
    pub fn register(&mut self, handler: impl Fn(&Inbound) + 'static) {
        self.handlers.push(Rc::new(handler));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run every handler on `message`. Returns how many ran.
    pub fn dispatch(&self, message: &Inbound) -> usize {
        for handler in &self.handlers {
            handler(message);
        }
        self.handlers.len()
    }

    /// Decode one text frame and dispatch it.
    ///
    /// # Errors
    ///
    /// Returns the decode error; no handler runs in that case.
    pub fn dispatch_text(&self, text: &str) -> Result<usize, CodecError> {
        let message = frames::decode_inbound(text)?;
        Ok(self.dispatch(&message))
    }
}

/// Push endpoint URL for a page served from `protocol` (`"https:"`) and
/// `host` (`"example.com:8000"`).
#[must_use]
pub fn push_endpoint(protocol: &str, host: &str) -> String {
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    format!("{scheme}://{host}{PUSH_PATH}")
}

/// Work queued for the socket writer.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Send(String),
    Close,
}

/// Discard messages queued while no socket was open.
///
/// Returns `true` when a close was requested among them.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn drain_stale(pending: impl IntoIterator<Item = Command>) -> bool {
    pending.into_iter().fold(false, |closed, cmd| closed || cmd == Command::Close)
}

/// Whether a command arriving during backoff stops the client. Sends are
/// dropped; a close or a closed queue ends it.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn ends_backoff(cmd: Option<&Command>) -> bool {
    !matches!(cmd, Some(Command::Send(_)))
}

/// Cloneable handle for sending on the push channel.
///
/// Provided as context via `RwSignal<PushSender>`. Sends issued while the
/// socket is down are discarded before the next attempt.
#[derive(Clone, Debug, Default)]
pub struct PushSender {
    #[cfg(feature = "hydrate")]
    tx: Option<futures::channel::mpsc::UnboundedSender<Command>>,
}

impl PushSender {
    /// Queue `message`. Returns `false` when no client is running.
    pub fn send(&self, message: &Outbound) -> bool {
        #[cfg(feature = "hydrate")]
        {
            let text = frames::encode_outbound(message);
            self.tx.as_ref().is_some_and(|tx| tx.unbounded_send(Command::Send(text)).is_ok())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = message;
            false
        }
    }

    /// Close the socket and stop reconnecting.
    pub fn close(&self) {
        #[cfg(feature = "hydrate")]
        if let Some(tx) = &self.tx {
            let _ = tx.unbounded_send(Command::Close);
        }
    }
}

#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Disconnect {
    Remote,
    Shutdown,
}

/// Spawn the push client as a local async task.
#[cfg(feature = "hydrate")]
pub fn spawn_push_client(
    policy: ReconnectPolicy,
    registry: HandlerRegistry,
    connection: RwSignal<ConnectionState>,
) -> PushSender {
    use futures::channel::mpsc;

    if registry.is_empty() {
        leptos::logging::warn!("push client started without handlers");
    }
    let (tx, rx) = mpsc::unbounded::<Command>();
    leptos::task::spawn_local(push_client_loop(policy, registry, connection, tx.clone(), rx));
    PushSender { tx: Some(tx) }
}

#[cfg(feature = "hydrate")]
fn current_endpoint() -> String {
    let location = web_sys::window().map(|w| w.location());
    let protocol = location.as_ref().and_then(|l| l.protocol().ok()).unwrap_or_default();
    let host = location
        .as_ref()
        .and_then(|l| l.host().ok())
        .unwrap_or_else(|| "localhost:8000".to_owned());
    push_endpoint(&protocol, &host)
}

/// Connection loop: connect, run, back off, repeat until stopped or out of
/// attempts.
#[cfg(feature = "hydrate")]
async fn push_client_loop(
    policy: ReconnectPolicy,
    registry: HandlerRegistry,
    connection: RwSignal<ConnectionState>,
    tx: futures::channel::mpsc::UnboundedSender<Command>,
    mut rx: futures::channel::mpsc::UnboundedReceiver<Command>,
) {
    let mut machine = ConnectionMachine::new(policy);
    if !machine.start() {
        return;
    }
    connection.update(|c| c.sync(&machine));
    let url = current_endpoint();

    loop {
        if drain_stale(std::iter::from_fn(|| rx.try_next().ok().flatten())) {
            machine.shutdown();
            connection.update(|c| c.sync(&machine));
            return;
        }

        match connect_and_run(&url, &registry, &mut machine, connection, &tx, &mut rx).await {
            Ok(Disconnect::Shutdown) => {
                machine.shutdown();
                leptos::logging::log!("push channel closed by page");
            }
            Ok(Disconnect::Remote) => leptos::logging::log!("push channel closed"),
            Err(e) => leptos::logging::warn!("push channel error: {e}"),
        }

        let outcome = machine.on_close();
        connection.update(|c| c.sync(&machine));
        match outcome {
            CloseOutcome::Retry { attempt, delay } => {
                leptos::logging::warn!(
                    "push reconnect {attempt}/{} in {}ms",
                    machine.policy().max_attempts,
                    delay.as_millis()
                );
                if !wait_backoff(delay, &mut rx).await {
                    machine.shutdown();
                    connection.update(|c| c.sync(&machine));
                    leptos::logging::log!("push channel closed by page");
                    return;
                }
                if !machine.on_backoff_elapsed() {
                    return;
                }
                connection.update(|c| c.sync(&machine));
            }
            CloseOutcome::Exhausted => {
                leptos::logging::error!(
                    "push channel gave up after {} attempts",
                    machine.policy().max_attempts
                );
                return;
            }
            CloseOutcome::Stopped | CloseOutcome::Ignored => return,
        }
    }
}

/// Sleep out a backoff delay while still listening for a close. Returns
/// `false` when the page closed the channel first.
#[cfg(feature = "hydrate")]
async fn wait_backoff(
    delay: std::time::Duration,
    rx: &mut futures::channel::mpsc::UnboundedReceiver<Command>,
) -> bool {
    use futures::StreamExt;
    use futures::future::{Either, select};

    let mut timer = std::pin::pin!(gloo_timers::future::sleep(delay));
    loop {
        match select(timer.as_mut(), rx.next()).await {
            Either::Left(((), _)) => return true,
            Either::Right((cmd, _)) => {
                if ends_backoff(cmd.as_ref()) {
                    return false;
                }
            }
        }
    }
}

/// Wait for the handshake to finish. `WebSocket::open` returns before it does.
#[cfg(feature = "hydrate")]
async fn wait_until_open(ws: &gloo_net::websocket::futures::WebSocket) -> Result<(), String> {
    use gloo_net::websocket::State;

    for _ in 0..OPEN_POLL_LIMIT {
        match ws.state() {
            State::Open => return Ok(()),
            State::Connecting => gloo_timers::future::sleep(OPEN_POLL_INTERVAL).await,
            State::Closing | State::Closed => return Err("closed during handshake".to_owned()),
        }
    }
    Err("handshake timed out".to_owned())
}

/// Open one socket and pump it until either side ends it.
#[cfg(feature = "hydrate")]
async fn connect_and_run(
    url: &str,
    registry: &HandlerRegistry,
    machine: &mut ConnectionMachine,
    connection: RwSignal<ConnectionState>,
    tx: &futures::channel::mpsc::UnboundedSender<Command>,
    rx: &mut futures::channel::mpsc::UnboundedReceiver<Command>,
) -> Result<Disconnect, String> {
    use futures::{FutureExt, SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    wait_until_open(&ws).await?;
    machine.on_open();
    connection.update(|c| c.sync(machine));
    leptos::logging::log!("push channel open, {} handlers", registry.len());

    let keepalive = machine.policy().keepalive_interval;
    let (mut ws_write, mut ws_read) = ws.split();

    let send_task = async {
        while let Some(cmd) = rx.next().await {
            match cmd {
                Command::Send(text) => {
                    if ws_write.send(Message::Text(text)).await.is_err() {
                        return Disconnect::Remote;
                    }
                }
                Command::Close => {
                    let _ = ws_write.close().await;
                    return Disconnect::Shutdown;
                }
            }
        }
        Disconnect::Shutdown
    };

    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    if let Err(e) = registry.dispatch_text(&text) {
                        leptos::logging::warn!("dropping push message: {e}");
                    }
                }
                Ok(Message::Bytes(_)) => {}
                Err(e) => {
                    leptos::logging::warn!("push recv error: {e}");
                    break;
                }
            }
        }
        Disconnect::Remote
    };

    let keepalive_task = async {
        let ping = frames::encode_outbound(&Outbound::Ping);
        loop {
            gloo_timers::future::sleep(keepalive).await;
            if tx.unbounded_send(Command::Send(ping.clone())).is_err() {
                return Disconnect::Shutdown;
            }
        }
    };

    let (ended, _, _) = futures::future::select_all([
        send_task.boxed_local(),
        recv_task.boxed_local(),
        keepalive_task.boxed_local(),
    ])
    .await;
    Ok(ended)
}
