//! Task Section Component
//!
//! Collapsible card around one task list, with a copy button in the header.

use leptos::prelude::*;
use leptos::task::spawn_local;

use flywheel_core::dashboard::TaskList;

use crate::actions;
use crate::context::use_app_context;

#[component]
pub fn TaskSection(
    #[prop(into)] title: Signal<String>,
    #[prop(into)] icon: String,
    list: TaskList,
    children: Children,
) -> impl IntoView {
    let ctx = use_app_context();
    let (open, set_open) = signal(true);

    let copy = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        spawn_local(actions::copy_list(ctx, list));
    };

    view! {
        <section class="task-section">
            <header class="task-section-header">
                <div class="task-section-title">
                    <span class=icon></span>
                    <span>{move || title.get()}</span>
                </div>
                <div class="task-section-tools">
                    <button class="icon-btn" title="一键复制" on:click=copy>"⧉"</button>
                    <button
                        class="icon-btn"
                        on:click=move |_| set_open.update(|o| *o = !*o)
                    >
                        {move || if open.get() { "▾" } else { "▸" }}
                    </button>
                </div>
            </header>
            <div class="task-section-body" class:collapsed=move || !open.get()>
                {children()}
            </div>
        </section>
    }
}
