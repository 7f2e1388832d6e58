//! `watch`: a reconnecting tail of the notification push channel.
//!
//! Runs the same `ConnectionMachine` the browser client runs, so backoff
//! timing and the retry budget match what users see in the page.

use std::pin::pin;

use frames::lifecycle::{CloseOutcome, ConnectionMachine};
use frames::{Inbound, NotificationPayload, Outbound};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;

use crate::{CliContext, CliError, WatchArgs, push_request};

#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    Remote,
    Interrupted,
}

pub(crate) async fn run_watch(ctx: &CliContext, args: &WatchArgs) -> Result<(), CliError> {
    let mut machine = ConnectionMachine::new(args.policy());
    let mut interrupt = pin!(tokio::signal::ctrl_c());
    if !machine.start() {
        return Ok(());
    }

    loop {
        let ended = tokio::select! {
            result = run_session(ctx, args, &mut machine) => result,
            _ = &mut interrupt => Ok(SessionEnd::Interrupted),
        };
        match ended {
            Ok(SessionEnd::Interrupted) => {
                machine.shutdown();
                tracing::info!("interrupted");
                return Ok(());
            }
            Ok(SessionEnd::Remote) => tracing::info!("push channel closed"),
            Err(error) => tracing::warn!(%error, "push channel error"),
        }

        match machine.on_close() {
            CloseOutcome::Retry { attempt, delay } => {
                tracing::warn!(
                    attempt,
                    max_attempts = machine.policy().max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "reconnecting"
                );
                tokio::select! {
                    () = tokio::time::sleep(delay) => {}
                    _ = &mut interrupt => {
                        machine.shutdown();
                        tracing::info!("interrupted");
                        return Ok(());
                    }
                }
                machine.on_backoff_elapsed();
            }
            CloseOutcome::Exhausted => {
                let max = machine.policy().max_attempts;
                tracing::error!(max_attempts = max, "push channel gave up");
                return Err(CliError::RetriesExhausted(max));
            }
            CloseOutcome::Stopped | CloseOutcome::Ignored => return Ok(()),
        }
    }
}

/// One socket lifetime: open, print messages, ping on the keep-alive
/// interval, return when the server goes away.
async fn run_session(
    ctx: &CliContext,
    args: &WatchArgs,
    machine: &mut ConnectionMachine,
) -> Result<SessionEnd, CliError> {
    let (stream, _) = tokio_tungstenite::connect_async(push_request(ctx)?).await?;
    machine.on_open();
    tracing::info!(base_url = %ctx.base_url, "push channel open");

    let period = machine.policy().keepalive_interval;
    let mut keepalive = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    let ping = frames::encode_outbound(&Outbound::Ping);
    let (mut write, mut read) = stream.split();

    loop {
        tokio::select! {
            _ = keepalive.tick() => {
                write.send(Message::Text(ping.clone().into())).await?;
                tracing::debug!("ping");
            }
            message = read.next() => {
                let Some(message) = message else {
                    return Ok(SessionEnd::Remote);
                };
                match message? {
                    Message::Text(text) => match frames::decode_inbound(&text) {
                        Ok(inbound) => {
                            if let Some(line) = format_inbound(&inbound, args.json) {
                                println!("{line}");
                            } else {
                                tracing::debug!("pong");
                            }
                        }
                        Err(error) => tracing::warn!(%error, "dropping push message"),
                    },
                    Message::Close(_) => return Ok(SessionEnd::Remote),
                    _ => {}
                }
            }
        }
    }
}

/// One output line for `inbound`, or `None` for keep-alive replies.
pub(crate) fn format_inbound(inbound: &Inbound, json: bool) -> Option<String> {
    if *inbound == Inbound::Pong {
        return None;
    }
    if json {
        return serde_json::to_string(inbound).ok();
    }
    Some(match inbound {
        Inbound::Notification { data } => format_notification(data),
        Inbound::KanbanUpdate { action, application } => {
            let name = if application.original_filename.is_empty() {
                format!("#{}", application.id)
            } else {
                format!("#{} \"{}\"", application.id, application.original_filename)
            };
            format!("[board] {name} -> {} ({action:?})", action.target_status().as_str())
        }
        Inbound::Pong => return None,
    })
}

pub(crate) fn format_notification(item: &NotificationPayload) -> String {
    let age = if item.time_ago.is_empty() { String::new() } else { format!(" ({})", item.time_ago) };
    format!("[notification #{}] {}: {}{age}", item.id, item.title, item.message)
}
