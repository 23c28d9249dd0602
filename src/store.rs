//! Dashboard State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store mirrors
//! what the core services hold after each load; components only read it.

use chrono::NaiveDate;
use leptos::prelude::*;
use reactive_stores::Store;

use flywheel_core::api::{ApprovalItem, StrategyNode, TeamUser, TodoNote};
use flywheel_core::dashboard::{TaskBoard, ViewFilter};
use flywheel_core::income::{IncomeMap, YearMonth};
use flywheel_core::menu::NavModel;
use flywheel_core::nav::Navigation;
use flywheel_core::task::TaskItem;
use flywheel_core::User;

/// Right-hand panel tabs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SideTab {
    #[default]
    Strategy,
    Todo,
    Approval,
}

impl SideTab {
    pub const ALL: [SideTab; 3] = [SideTab::Strategy, SideTab::Todo, SideTab::Approval];

    pub fn label(&self) -> &'static str {
        match self {
            SideTab::Strategy => "战略",
            SideTab::Todo => "待办",
            SideTab::Approval => "审批",
        }
    }
}

#[derive(Clone, Debug, Default, Store)]
pub struct DashboardState {
    /// Signed-in user
    pub user: Option<User>,
    /// Sidebar model
    pub nav: NavModel,
    pub nav_loading: bool,
    /// Whose tasks are shown
    pub filter: ViewFilter,
    pub can_edit: bool,
    pub selected_day: NaiveDate,
    pub calendar_month: Option<YearMonth>,
    pub monthly: Vec<TaskItem>,
    pub weekly: Vec<TaskItem>,
    pub daily: Vec<TaskItem>,
    pub daily_loading: bool,
    pub income: IncomeMap,
    /// Members for the view filter
    pub team_users: Vec<TeamUser>,
    pub side_tab: SideTab,
    pub strategy: Vec<StrategyNode>,
    pub todo: TodoNote,
    pub approvals: Vec<ApprovalItem>,
}

impl DashboardState {
    pub fn new(user: Option<User>, board: &TaskBoard) -> Self {
        Self {
            user,
            nav_loading: true,
            can_edit: board.can_edit(),
            selected_day: board.selected_day(),
            calendar_month: Some(board.calendar_month()),
            ..Default::default()
        }
    }
}

pub type DashboardStore = Store<DashboardState>;

pub fn use_dashboard_store() -> DashboardStore {
    expect_context::<DashboardStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Copy the navigation model into the store
pub fn store_sync_nav(store: &DashboardStore, nav: &Navigation) {
    store.nav().set(nav.model().clone());
    store.nav_loading().set(nav.is_loading());
}

/// Copy the board's parameters and loaded lists into the store
pub fn store_sync_board(store: &DashboardStore, board: &TaskBoard) {
    store.filter().set(board.filter());
    store.can_edit().set(board.can_edit());
    store.selected_day().set(board.selected_day());
    store.calendar_month().set(Some(board.calendar_month()));

    // Lists for a key that has not loaded yet show as empty
    let month_week = board.month_week();
    let tasks = month_week.value();
    store.monthly().set(tasks.map(|t| t.monthly.clone()).unwrap_or_default());
    store.weekly().set(tasks.map(|t| t.weekly.clone()).unwrap_or_default());
    drop(month_week);
    let day = board.day_tasks();
    store.daily().set(day.value().cloned().unwrap_or_default());
    store.daily_loading().set(day.is_loading());
    drop(day);
    store.income().set(board.income().value().cloned().unwrap_or_default());
}
