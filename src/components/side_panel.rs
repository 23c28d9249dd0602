//! Side Panel Component
//!
//! Tabs for the strategy tree, the todo note and the approval queue.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::components::{ApprovalList, StrategyPanel, TodoPanel};
use crate::context::use_app_context;
use crate::store::{use_dashboard_store, DashboardStateStoreFields, SideTab};

#[component]
pub fn SidePanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();

    Effect::new(move |_| {
        spawn_local(actions::open_side_tab(ctx, store, SideTab::Strategy));
    });

    view! {
        <div class="side-panel">
            <div class="tab-bar">
                {SideTab::ALL
                    .iter()
                    .map(|&tab| {
                        let class = move || if store.side_tab().get() == tab { "tab active" } else { "tab" };
                        view! {
                            <button
                                class=class
                                on:click=move |_| spawn_local(actions::open_side_tab(ctx, store, tab))
                            >
                                {tab.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="tab-content">
                {move || match store.side_tab().get() {
                    SideTab::Strategy => view! { <StrategyPanel /> }.into_any(),
                    SideTab::Todo => view! { <TodoPanel /> }.into_any(),
                    SideTab::Approval => view! { <ApprovalList /> }.into_any(),
                }}
            </div>
        </div>
    }
}
