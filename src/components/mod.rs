//! UI Components
//!
//! Leptos components for the sidebar and the dashboard.

mod app_sidebar;
mod approval_list;
mod confirm_button;
mod daily_task_row;
mod dashboard;
mod income_calendar;
mod nav_group;
mod nav_user;
mod session_expired_dialog;
mod side_panel;
mod simple_task_table;
mod strategy_panel;
mod task_section;
mod team_switcher;
mod toaster;
mod todo_panel;

pub use app_sidebar::AppSidebar;
pub use approval_list::ApprovalList;
pub use confirm_button::ConfirmButton;
pub use daily_task_row::DailyTaskRow;
pub use dashboard::Dashboard;
pub use income_calendar::IncomeCalendar;
pub use nav_group::NavGroup;
pub use nav_user::NavUser;
pub use session_expired_dialog::SessionExpiredDialog;
pub use side_panel::SidePanel;
pub use simple_task_table::SimpleTaskTable;
pub use strategy_panel::StrategyPanel;
pub use task_section::TaskSection;
pub use team_switcher::TeamSwitcher;
pub use toaster::Toaster;
pub use todo_panel::TodoPanel;
