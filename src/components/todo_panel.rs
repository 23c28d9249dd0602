//! Todo Panel Component
//!
//! Free-text note saved per user.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::context::use_app_context;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

#[component]
pub fn TodoPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();
    let (draft, set_draft) = signal(String::new());

    // Follow the loaded note
    Effect::new(move |_| {
        set_draft.set(store.todo().read().treat_content.clone());
    });

    view! {
        <div class="todo-panel">
            <textarea
                placeholder="记录待办事项..."
                prop:value=move || draft.get()
                on:input=move |ev| set_draft.set(event_target_value(&ev))
            ></textarea>
            <button
                class="save-btn"
                on:click=move |_| spawn_local(actions::save_todo(ctx, store, draft.get_untracked()))
            >
                "保存"
            </button>
        </div>
    }
}
