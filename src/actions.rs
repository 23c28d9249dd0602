//! Dashboard Actions
//!
//! Async flows triggered by components. Each one drives the core services and
//! then mirrors the result into the store.

use chrono::NaiveDate;
use leptos::prelude::*;

use flywheel_core::api;
use flywheel_core::dashboard::{TaskList, ViewFilter};
use flywheel_core::menu::MenuId;
use flywheel_core::task::{TaskAction, TaskStatus, TransitionError};

use crate::adapters::{navigate, write_clipboard};
use crate::context::AppContext;
use crate::store::{store_sync_board, store_sync_nav, DashboardStateStoreFields, DashboardStore, SideTab};

pub async fn load_navigation(ctx: AppContext, store: DashboardStore) {
    let services = ctx.services();
    services.nav.borrow_mut().begin_load();
    store.nav_loading().set(true);

    let result = api::fetch_menu_tree(&services.client).await;

    let mut nav = services.nav.borrow_mut();
    nav.finish_load(result);
    store_sync_nav(&store, &nav);
}

pub fn select_team(ctx: AppContext, store: DashboardStore, id: MenuId) {
    let services = ctx.services();
    let mut nav = services.nav.borrow_mut();
    nav.select_team(id);
    store_sync_nav(&store, &nav);
}

/// Load whatever the current filter, day and month need
pub async fn refresh_board(ctx: AppContext, store: DashboardStore) {
    let board = ctx.services().board;
    store.daily_loading().set(true);
    board.load_all().await;
    store_sync_board(&store, &board);
}

pub async fn change_filter(ctx: AppContext, store: DashboardStore, selection: String) {
    let board = ctx.services().board;
    board.set_filter(ViewFilter::from_selection(&selection));
    store_sync_board(&store, &board);
    refresh_board(ctx, store).await;
}

pub async fn select_day(ctx: AppContext, store: DashboardStore, day: NaiveDate) {
    let board = ctx.services().board;
    board.select_day(day);
    store.selected_day().set(day);
    store.daily_loading().set(true);
    let _ = board.load_day_tasks().await;
    store_sync_board(&store, &board);
}

pub async fn shift_month(ctx: AppContext, store: DashboardStore, forward: bool) {
    let board = ctx.services().board;
    let month = board.calendar_month();
    board.set_calendar_month(if forward { month.next() } else { month.previous() });
    store.calendar_month().set(Some(board.calendar_month()));
    let _ = board.load_income().await;
    store_sync_board(&store, &board);
}

pub async fn transition(
    ctx: AppContext,
    store: DashboardStore,
    task_id: i64,
    from: TaskStatus,
    action: TaskAction,
    score_input: String,
) -> Result<(), TransitionError> {
    let board = ctx.services().board;
    let outcome = board.transition(task_id, from, action, &score_input).await;
    store_sync_board(&store, &board);
    outcome.map(|_| ())
}

pub async fn copy_list(ctx: AppContext, list: TaskList) {
    let Some(text) = ctx.services().board.copy_text(list) else {
        return;
    };
    let notifier = ctx.notifier();
    match write_clipboard(&text).await {
        Ok(()) => notifier.success("复制成功"),
        Err(e) => {
            log::warn!("[COPY] {}", e);
            notifier.error("复制失败", None);
        }
    }
}

pub async fn load_team_users(ctx: AppContext, store: DashboardStore) {
    if let Ok(users) = api::fetch_team_users(&ctx.services().client).await {
        store.team_users().set(users);
    }
}

/// Load the data behind a side panel tab
pub async fn open_side_tab(ctx: AppContext, store: DashboardStore, tab: SideTab) {
    store.side_tab().set(tab);
    let client = ctx.services().client;
    match tab {
        SideTab::Strategy => {
            if let Ok(tree) = api::fetch_strategy_tree(&client).await {
                store.strategy().set(tree);
            }
        }
        SideTab::Todo => {
            if let Ok(note) = api::fetch_todo(&client).await {
                store.todo().set(note);
            }
        }
        SideTab::Approval => {
            if let Ok(items) = api::fetch_approval_queue(&client).await {
                store.approvals().set(items);
            }
        }
    }
}

pub async fn save_todo(ctx: AppContext, store: DashboardStore, content: String) {
    let mut note = store.todo().get_untracked();
    note.treat_content = content;
    if api::save_todo(&ctx.services().client, &note).await.is_ok() {
        store.todo().set(note);
    }
}

/// User acknowledged the expired session
pub fn confirm_session_expired(ctx: AppContext) {
    let services = ctx.services();
    let target = services.client.expiry().confirm(&services.session).to_string();
    ctx.close_session_dialog();
    navigate(&target);
}

pub fn sign_out(ctx: AppContext) {
    let services = ctx.services();
    log::info!("[AUTH] Signing out");
    services.session.reset();
    navigate(&services.config.sign_in_path);
}
