//! Transient toast messages.

use leptos::prelude::*;

use crate::state::ui::UiState;

#[component]
pub fn ToastStack() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <div class="toast-stack">
            {move || {
                ui.get()
                    .toasts
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        let class = format!("toast toast--{}", toast.kind.modifier());
                        view! {
                            <div class=class on:click=move |_| { ui.update(|u| { u.dismiss_toast(id); }); }>
                                {toast.message}
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
