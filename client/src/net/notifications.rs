//! Notification feed flows: startup load, live rendering, read tracking.
//!
//! Live cards play the alert sound and raise an OS notification; cards
//! loaded at startup do neither. Every card leaves the stack after
//! [`AUTO_EXPIRE`] whether or not it was read.
//!
//! Mark-read takes two paths: a best-effort echo on the push channel and the
//! authoritative HTTP call. The card is removed only after HTTP succeeds.

use frames::{Inbound, NotificationPayload, Outbound};
use leptos::prelude::*;

use crate::net::push_client::{HandlerRegistry, PushSender};
#[cfg(feature = "hydrate")]
use crate::state::notifications::AUTO_EXPIRE;
use crate::state::notifications::NotificationFeed;
use crate::state::ui::{ToastKind, UiState};
use crate::util::toast::show_toast;

/// Route inbound `notification` messages into `feed`.
pub fn register(registry: &mut HandlerRegistry, feed: RwSignal<NotificationFeed>) {
    registry.register(move |message| {
        if let Inbound::Notification { data } = message {
            present(feed, data, true);
        }
    });
}

/// Render one notification card and schedule its expiry.
///
/// Duplicates of a card already on screen are ignored, including their sound.
pub fn present(feed: RwSignal<NotificationFeed>, payload: &NotificationPayload, live: bool) {
    let mut token = None;
    feed.update(|f| token = f.show(payload));
    let Some(token) = token else {
        return;
    };
    schedule_expiry(feed, payload.id, token);
    if live {
        crate::util::browser::play_notification_sound();
        crate::util::browser::show_os_notification(&payload.title, &payload.message);
    }
}

fn schedule_expiry(feed: RwSignal<NotificationFeed>, id: u64, token: u64) {
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(AUTO_EXPIRE).await;
            feed.update(|f| {
                f.expire(id, token);
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (feed, id, token);
    }
}

/// Load unread notifications once at startup.
pub async fn load_unread(feed: RwSignal<NotificationFeed>) {
    match crate::net::api::fetch_unread_notifications().await {
        Ok(items) => {
            for item in &items {
                present(feed, item, false);
            }
        }
        Err(e) => leptos::logging::warn!("unread notifications unavailable: {e}"),
    }
}

/// Mark one card read. A second click while the first is in flight is a no-op.
pub async fn mark_read(feed: RwSignal<NotificationFeed>, ui: RwSignal<UiState>, sender: PushSender, id: u64) {
    let mut claimed = false;
    feed.update(|f| claimed = f.begin_mark_read(id));
    if !claimed {
        return;
    }
    sender.send(&Outbound::MarkRead { notification_id: id });
    let accepted = match crate::net::api::mark_notification_read(id).await {
        Ok(()) => true,
        Err(e) => {
            leptos::logging::warn!("mark read {id} failed: {e}");
            show_toast(ui, ToastKind::Error, "Could not mark the notification as read");
            false
        }
    };
    feed.update(|f| {
        f.finish_mark_read(id, accepted);
    });
}

/// Mark everything read. The stack clears only when the server accepted.
pub async fn mark_all_read(feed: RwSignal<NotificationFeed>, ui: RwSignal<UiState>) {
    match crate::net::api::mark_all_notifications_read().await {
        Ok(()) => feed.update(|f| {
            f.clear();
        }),
        Err(e) => {
            leptos::logging::warn!("mark all read failed: {e}");
            show_toast(ui, ToastKind::Error, "Could not mark notifications as read");
        }
    }
}

/// Close button: drop the card locally without telling the server.
pub fn dismiss(feed: RwSignal<NotificationFeed>, id: u64) {
    feed.update(|f| {
        f.remove(id);
    });
}
