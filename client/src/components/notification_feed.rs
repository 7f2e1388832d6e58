//! Corner notification stack with unread badge.
//!
//! Clicking a card marks it read; the close button only hides it. Clicking
//! the badge marks everything read.

use leptos::prelude::*;

use crate::net::push_client::PushSender;
use crate::state::notifications::NotificationFeed;
use crate::state::ui::UiState;

pub const SOUND_SOURCE: &str = "/static/sounds/notification.wav";

#[component]
pub fn NotificationFeedPanel() -> impl IntoView {
    let feed = expect_context::<RwSignal<NotificationFeed>>();
    let sender = expect_context::<RwSignal<PushSender>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let badge = move || feed.get().badge_label();
    let badge_class = move || {
        if badge().is_some() { "notification-badge" } else { "notification-badge hidden" }
    };
    let on_badge = move |_| {
        leptos::task::spawn_local(crate::net::notifications::mark_all_read(feed, ui));
    };

    view! {
        <span class=badge_class on:click=on_badge title="Mark all as read">
            {move || badge().unwrap_or_default()}
        </span>
        <div class="notification-container">
            {move || {
                feed.get()
                    .cards()
                    .iter()
                    .cloned()
                    .map(|card| {
                        let id = card.id;
                        let on_card = move |_| {
                            let sender = sender.get_untracked();
                            leptos::task::spawn_local(crate::net::notifications::mark_read(feed, ui, sender, id));
                        };
                        let on_close = move |ev: leptos::ev::MouseEvent| {
                            ev.stop_propagation();
                            crate::net::notifications::dismiss(feed, id);
                        };
                        view! {
                            <div
                                class="notification"
                                class:unread=!card.read
                                class:notification--pending=move || feed.get().is_marking(id)
                                data-id=id.to_string()
                                on:click=on_card
                            >
                                <button class="close-btn" on:click=on_close>"×"</button>
                                <div class="notification__title">{card.title.clone()}</div>
                                <div class="notification__message">{card.message.clone()}</div>
                                <div class="notification__time">{card.time_ago.clone()}</div>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
        <audio class="notification-sound" preload="auto">
            <source src=SOUND_SOURCE type="audio/wav" />
        </audio>
    }
}
