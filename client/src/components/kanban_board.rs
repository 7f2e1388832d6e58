//! Three-column application board with drag-and-drop for approvers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Columns render straight from `KanbanState`; header counts are recomputed
//! on every change. Applicants get a read-only board where cards explain
//! who changes their status.

#[cfg(test)]
#[path = "kanban_board_test.rs"]
mod kanban_board_test;

use frames::ApplicationStatus;
use leptos::ev::DragEvent;
use leptos::prelude::*;

use crate::state::kanban::{KanbanCard, KanbanState, ViewerRole};
use crate::state::ui::UiState;

pub const READ_ONLY_HINT: &str = "Status is changed by the approver";

#[component]
pub fn KanbanBoard() -> impl IntoView {
    let kanban = expect_context::<RwSignal<KanbanState>>();
    let dragging = RwSignal::new(None::<u64>);

    view! {
        <div class="kanban-board">
            {ApplicationStatus::ALL
                .into_iter()
                .map(|status| view! { <KanbanColumn status=status dragging=dragging /> })
                .collect_view()}
        </div>
        <Show when=move || kanban.get().reload_required()>
            <div class="kanban-board__reloading">"Refreshing board…"</div>
        </Show>
    }
}

#[component]
fn KanbanColumn(status: ApplicationStatus, dragging: RwSignal<Option<u64>>) -> impl IntoView {
    let kanban = expect_context::<RwSignal<KanbanState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let is_over = RwSignal::new(false);

    let heading = move || column_heading(status, kanban.get().counts().get(status));
    let role = move || kanban.get().role();

    let on_dragover = move |ev: DragEvent| {
        if dragging.get_untracked().is_some() {
            ev.prevent_default();
            is_over.set(true);
        }
    };
    let on_dragleave = move |_: DragEvent| is_over.set(false);
    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        is_over.set(false);
        if let Some(id) = dragging.get_untracked() {
            dragging.set(None);
            leptos::task::spawn_local(crate::net::kanban::submit_move(kanban, ui, id, status));
        }
    };

    view! {
        <section
            class=format!("kanban-column kanban-column--{}", status.as_str())
            class:kanban-column--over=move || is_over.get()
            data-status=status.as_str()
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop
        >
            <h3 class="kanban-column__header">{heading}</h3>
            <div class="kanban-column__cards">
                {move || {
                    let board = kanban.get();
                    let viewer = role();
                    board
                        .column(status)
                        .iter()
                        .cloned()
                        .map(|card| {
                            let moving = board.is_moving(card.id);
                            view! { <ApplicationCard card=card role=viewer moving=moving dragging=dragging /> }
                        })
                        .collect_view()
                }}
            </div>
        </section>
    }
}

#[component]
fn ApplicationCard(
    card: KanbanCard,
    role: ViewerRole,
    moving: bool,
    dragging: RwSignal<Option<u64>>,
) -> impl IntoView {
    let id = card.id;
    let can_drag = role.can_drag() && !moving;
    let on_dragstart = move |_: DragEvent| dragging.set(Some(id));
    let on_dragend = move |_: DragEvent| dragging.set(None);

    // The server fragment is itself the `.application-card`; this slot only
    // carries drag state.
    view! {
        <div
            class="kanban-card"
            class:kanban-card--moving=moving
            class:kanban-card--locked=!role.can_drag()
            draggable=if can_drag { "true" } else { "false" }
            title=card_hint(role)
            on:dragstart=on_dragstart
            on:dragend=on_dragend
            inner_html=card_markup(card)
        ></div>
    }
}

/// Server markup for the card, or a title-only `.application-card` when the
/// server sent none.
fn card_markup(card: KanbanCard) -> String {
    if !card.html.is_empty() {
        return card.html;
    }
    format!(
        r#"<div class="application-card" data-id="{}"><div class="application-card__title">{}</div></div>"#,
        card.id,
        escape_html(&card.title)
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn column_label(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Pending => "Pending",
        ApplicationStatus::Approved => "Approved",
        ApplicationStatus::Rejected => "Rejected",
    }
}

fn column_heading(status: ApplicationStatus, count: usize) -> String {
    format!("{} ({count})", column_label(status))
}

fn card_hint(role: ViewerRole) -> Option<&'static str> {
    (!role.can_drag()).then_some(READ_ONLY_HINT)
}
