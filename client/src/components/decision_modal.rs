//! Blocking dialog that tells an applicant about a decision on their
//! application. Queued decisions appear one after another.

use leptos::prelude::*;

use crate::state::ui::UiState;

#[component]
pub fn DecisionModalHost() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    let on_close = move |_| {
        ui.update(|u| {
            u.close_modal();
        });
    };

    move || {
        ui.get().current_modal().cloned().map(|modal| {
            let class = format!("dialog dialog--decision dialog--{}", modal.status.as_str());
            view! {
                <div class="dialog-backdrop">
                    <div class=class role="alertdialog">
                        <h2>{modal.heading()}</h2>
                        <p class="dialog__filename">{modal.filename.clone()}</p>
                        <p>{modal.body()}</p>
                        <div class="dialog__actions">
                            <button class="btn btn--primary" on:click=on_close>"OK"</button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
