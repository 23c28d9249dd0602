//! Strategy Panel Component

use leptos::prelude::*;

use crate::store::{use_dashboard_store, DashboardStateStoreFields};

#[component]
pub fn StrategyPanel() -> impl IntoView {
    let store = use_dashboard_store();
    let is_admin = move || store.user().read().as_ref().is_some_and(|u| u.is_admin());

    view! {
        <div class="strategy-panel">
            <Show when=is_admin>
                <button class="add-btn">"新增 L1 战略"</button>
            </Show>
            <For
                each=move || store.strategy().get()
                key=|node| (node.task_id, node.title.clone())
                children=|node| view! {
                    <div class="strategy-l1">
                        <div class="strategy-row">
                            <span class="level-tag">"L1"</span>
                            <span>{node.title.clone()}</span>
                        </div>
                        {node.children.iter().map(|child| view! {
                            <div class="strategy-row strategy-l2">
                                <span class="level-tag">"L2"</span>
                                <span>{child.title.clone()}</span>
                            </div>
                        }).collect_view()}
                    </div>
                }
            />
            <Show when=move || store.strategy().read().is_empty()>
                <div class="empty-note">"暂无战略规划"</div>
            </Show>
        </div>
    }
}
