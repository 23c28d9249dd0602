//! Dashboard Component
//!
//! Left column: monthly, weekly and daily task lists. Right column: member
//! filter, side panel tabs and the income calendar.

use chrono::Datelike;
use leptos::prelude::*;
use leptos::task::spawn_local;

use flywheel_core::dashboard::TaskList;

use crate::actions;
use crate::components::{DailyTaskRow, IncomeCalendar, SidePanel, SimpleTaskTable, TaskSection};
use crate::context::use_app_context;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

#[component]
pub fn Dashboard() -> impl IntoView {
    let store = use_dashboard_store();

    let monthly = Signal::derive(move || store.monthly().get());
    let weekly = Signal::derive(move || store.weekly().get());
    let daily_title = Signal::derive(move || {
        let day = store.selected_day().get();
        format!("{}月{}日 飞轮", day.month(), day.day())
    });

    view! {
        <div class="dashboard">
            <div class="dashboard-left">
                <TaskSection title="月目标 (飞轮)".to_string() icon="icon-target" list=TaskList::Monthly>
                    <SimpleTaskTable tasks=monthly />
                </TaskSection>
                <TaskSection title="周目标 (飞轮)".to_string() icon="icon-calendar" list=TaskList::Weekly>
                    <SimpleTaskTable tasks=weekly />
                </TaskSection>
                <TaskSection title=daily_title icon="icon-clock" list=TaskList::Daily>
                    <DailyTaskList />
                </TaskSection>
            </div>
            <div class="dashboard-right">
                <MemberFilter />
                <SidePanel />
                <IncomeCalendar />
            </div>
        </div>
    }
}

#[component]
fn DailyTaskList() -> impl IntoView {
    let store = use_dashboard_store();
    let rows = move || store.daily().get().into_iter().enumerate().collect::<Vec<_>>();

    view! {
        <div class="daily-table">
            <div class="daily-header">
                <div class="daily-title">"任务"</div>
                <div class="daily-token">"预估Token"</div>
                <div class="daily-priority">"紧急"</div>
                <div class="daily-status">"状态"</div>
                <div class="daily-actions">"操作"</div>
            </div>
            <Show
                when=move || !store.daily_loading().get()
                fallback=|| view! { <div class="empty-note">"加载中..."</div> }
            >
                <For
                    each=rows
                    key=|(idx, task)| (*idx, task.id, task.status)
                    children=|(idx, task)| view! { <DailyTaskRow task=task index=idx /> }
                />
                <Show when=move || store.daily().read().is_empty()>
                    <div class="empty-note">"暂无日任务"</div>
                </Show>
            </Show>
        </div>
    }
}

/// Whose tasks the board shows
#[component]
fn MemberFilter() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();

    let selected = move || {
        store
            .filter()
            .get()
            .user_id
            .map(|id| id.to_string())
            .unwrap_or_default()
    };

    view! {
        <div class="member-filter">
            <select
                prop:value=selected
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    spawn_local(actions::change_filter(ctx, store, value));
                }
            >
                <option value="">"显示全部"</option>
                <For
                    each=move || store.team_users().get()
                    key=|user| user.key
                    children=|user| {
                        let value = user.key.map(|k| k.to_string()).unwrap_or_default();
                        view! { <option value=value>{user.value.clone().unwrap_or_default()}</option> }
                    }
                />
            </select>
        </div>
    }
}
