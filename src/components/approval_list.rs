//! Approval List Component

use leptos::prelude::*;

use crate::store::{use_dashboard_store, DashboardStateStoreFields};

#[component]
pub fn ApprovalList() -> impl IntoView {
    let store = use_dashboard_store();

    view! {
        <div class="approval-list">
            <For
                each=move || store.approvals().get()
                key=|item| (item.task_id, item.title.clone())
                children=|item| view! {
                    <div class="approval-row">
                        <span class="avatar avatar-fallback">{item.initial()}</span>
                        <div class="approval-text">
                            <span class="approval-by">{item.create_by.clone()}</span>
                            <span class="approval-title">{item.title.clone()}</span>
                        </div>
                        <button class="approve-btn">"审批"</button>
                    </div>
                }
            />
            <Show when=move || store.approvals().read().is_empty()>
                <div class="empty-note">"暂无待审批任务"</div>
            </Show>
        </div>
    }
}
