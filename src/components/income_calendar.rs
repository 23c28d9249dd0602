//! Income Calendar Component
//!
//! Month heat-map of daily output. Clicking a day loads its tasks.

use chrono::{Datelike, NaiveDate};
use leptos::prelude::*;
use leptos::task::spawn_local;

use flywheel_core::income::HeatLevel;

use crate::actions;
use crate::context::use_app_context;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

const WEEKDAYS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

#[component]
pub fn IncomeCalendar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();

    let shift = move |forward: bool| spawn_local(actions::shift_month(ctx, store, forward));

    let title = move || store.calendar_month().get().map(|m| m.to_string()).unwrap_or_default();

    let blanks = move || {
        store
            .calendar_month()
            .get()
            .map(|m| m.leading_blanks())
            .unwrap_or(0)
    };
    let days = move || {
        store
            .calendar_month()
            .get()
            .map(|m| m.days().collect::<Vec<NaiveDate>>())
            .unwrap_or_default()
    };

    view! {
        <div class="income-calendar">
            <div class="calendar-header">
                <span class="calendar-title">"收益日历"</span>
                <div class="calendar-nav">
                    <button class="icon-btn" on:click=move |_| shift(false)>"‹"</button>
                    <span>{title}</span>
                    <button class="icon-btn" on:click=move |_| shift(true)>"›"</button>
                </div>
            </div>
            <div class="calendar-grid">
                {WEEKDAYS.iter().map(|d| view! { <div class="calendar-weekday">{*d}</div> }).collect_view()}
                {move || (0..blanks()).map(|_| view! { <div class="calendar-blank"></div> }).collect_view()}
                <For
                    each=days
                    key=|day| *day
                    children=move |day| view! { <CalendarCell day=day /> }
                />
            </div>
            <div class="calendar-hint">"点击格子查看任务详情"</div>
        </div>
    }
}

#[component]
fn CalendarCell(day: NaiveDate) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();

    let output = move || store.income().read().get(&day).copied();
    let class = move || {
        let selected = if store.selected_day().get() == day { " selected" } else { "" };
        format!("calendar-cell {}{}", HeatLevel::of(output().as_ref()).css_class(), selected)
    };

    view! {
        <div class=class on:click=move |_| spawn_local(actions::select_day(ctx, store, day))>
            <span class="cell-day">{day.day()}</span>
            {move || output().map(|o| view! {
                <span class="cell-completed">{o.completed}</span>
                <span class="cell-vcc">{format!("{:.1}", o.vcc)}</span>
                {(o.incomplete > 0).then(|| view! { <span class="cell-dot"></span> })}
            })}
        </div>
    }
}
