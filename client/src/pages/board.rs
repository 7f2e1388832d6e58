//! Board page: the kanban with the notification stack and notices on top.

use leptos::prelude::*;

use crate::components::connection_status::ConnectionStatus;
use crate::components::decision_modal::DecisionModalHost;
use crate::components::kanban_board::KanbanBoard;
use crate::components::notification_feed::NotificationFeedPanel;
use crate::components::toast_stack::ToastStack;

#[component]
pub fn BoardPage() -> impl IntoView {
    view! {
        <div class="board-page">
            <header class="board-page__header">
                <h1>"Applications"</h1>
                <ConnectionStatus/>
                <NotificationFeedPanel/>
            </header>
            <KanbanBoard/>
            <ToastStack/>
            <DecisionModalHost/>
        </div>
    }
}
