//! Board update flows: push-driven inserts and decisions, and optimistic
//! drag-and-drop moves confirmed over HTTP.

use frames::{ApplicationPayload, ApplicationStatus, BoardAction, Inbound};
use leptos::prelude::*;

use crate::net::push_client::HandlerRegistry;
use crate::state::kanban::{InsertPlan, KanbanState, MoveFailure, insertion_notice};
use crate::state::ui::{ToastKind, UiState};
use crate::util::toast::{present_notice, show_toast};

/// Route inbound `kanban_update` messages into the board.
pub fn register(registry: &mut HandlerRegistry, kanban: RwSignal<KanbanState>, ui: RwSignal<UiState>) {
    registry.register(move |message| {
        if let Inbound::KanbanUpdate { action, application } = message {
            handle_board_update(kanban, ui, *action, application.clone());
        }
    });
}

/// Apply one pushed board change.
pub fn handle_board_update(
    kanban: RwSignal<KanbanState>,
    ui: RwSignal<UiState>,
    action: BoardAction,
    application: ApplicationPayload,
) {
    match action {
        BoardAction::NewApplication => {
            let mut plan = InsertPlan::AlreadyPresent;
            kanban.update(|k| plan = k.plan_insert(&application));
            if plan == InsertPlan::Fetch {
                leptos::task::spawn_local(insert_card(kanban, ui, application));
            }
        }
        BoardAction::ApplicationApproved | BoardAction::ApplicationRejected => {
            let mut notice = None;
            kanban.update(|k| notice = k.apply_decision(action, &application));
            if let Some(notice) = notice {
                present_notice(ui, notice);
            }
        }
    }
}

async fn insert_card(kanban: RwSignal<KanbanState>, ui: RwSignal<UiState>, application: ApplicationPayload) {
    match crate::net::api::fetch_card_html(application.id).await {
        Ok(html) => {
            let mut inserted = false;
            kanban.update(|k| inserted = k.complete_insert(&application, html));
            if inserted {
                present_notice(ui, insertion_notice(&application));
            }
        }
        Err(e) => {
            leptos::logging::warn!("card {} unavailable: {e}", application.id);
            kanban.update(|k| k.abandon_insert(application.id));
        }
    }
}

/// Drop handler: move `id` to `to` now, then ask the server.
pub async fn submit_move(kanban: RwSignal<KanbanState>, ui: RwSignal<UiState>, id: u64, to: ApplicationStatus) {
    let mut started = None;
    kanban.update(|k| started = Some(k.begin_move(id, to)));
    let update = match started {
        Some(Ok(update)) => update,
        Some(Err(reason)) => {
            leptos::logging::log!("move of {id} ignored: {reason:?}");
            return;
        }
        None => return,
    };

    match crate::net::api::update_application_status(update.id, update.status).await {
        Ok(html) => {
            kanban.update(|k| {
                k.confirm_move(update.id, update.status, html);
            });
            show_toast(ui, ToastKind::Success, "Status updated");
        }
        Err(e) => {
            leptos::logging::warn!("status update for {id} failed: {e}");
            show_toast(ui, ToastKind::Error, "Update failed");
            let mut outcome = MoveFailure::Superseded;
            kanban.update(|k| outcome = k.fail_move(update.id));
            if outcome == MoveFailure::Reload {
                crate::util::browser::reload_page();
            }
        }
    }
}
