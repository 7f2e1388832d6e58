//! Transient toasts and decision modals.
//!
//! Toasts are pushed into [`UiState`] and removed again after
//! [`TOAST_DURATION`]. Modals stay until the viewer closes them.

use leptos::prelude::*;

use crate::state::ui::{Notice, ToastKind, UiState};
#[cfg(feature = "hydrate")]
use crate::state::ui::TOAST_DURATION;

/// Show a toast and schedule its dismissal.
pub fn show_toast(ui: RwSignal<UiState>, kind: ToastKind, message: impl Into<String>) {
    let mut id = 0;
    ui.update(|u| id = u.push_toast(kind, message));
    schedule_dismiss(ui, id);
}

/// Surface a board notice as a toast or a queued modal.
pub fn present_notice(ui: RwSignal<UiState>, notice: Notice) {
    let mut toast = None;
    ui.update(|u| toast = u.present(notice));
    if let Some(id) = toast {
        schedule_dismiss(ui, id);
    }
}

fn schedule_dismiss(ui: RwSignal<UiState>, id: u64) {
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(TOAST_DURATION).await;
            ui.update(|u| {
                u.dismiss_toast(id);
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (ui, id);
    }
}
