//! Dashboard Controller
//!
//! Holds the view filter, the selected day and calendar month, and one
//! keyed result slot per task query. Status transitions are planned against
//! the transition table, submitted, and always followed by a refetch of both
//! task lists so the board never shows an optimistic state.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use chrono::NaiveDate;

use crate::api;
use crate::http::{ApiError, HttpClient};
use crate::income::{IncomeMap, YearMonth};
use crate::query::QuerySlot;
use crate::task::{format_for_clipboard, plan_transition, MonthWeekTasks, SelfScore, TaskAction, TaskItem, TaskStatus, TransitionError};

pub const TRANSITION_OK: &str = "操作成功";
pub const TRANSITION_FAILED: &str = "操作失败";

/// Whose tasks are shown. `None` is the signed-in user's own view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewFilter {
    pub user_id: Option<i64>,
}

impl ViewFilter {
    /// From the member picker value; empty or non-numeric means "all"
    pub fn from_selection(value: &str) -> Self {
        Self {
            user_id: value.trim().parse().ok(),
        }
    }

    /// Tasks are editable in the unfiltered view or when viewing oneself
    pub fn can_edit(&self, signed_in: Option<i64>) -> bool {
        match self.user_id {
            None => true,
            Some(id) => signed_in == Some(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWeekKey {
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayKey {
    pub day: NaiveDate,
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomeKey {
    pub month: YearMonth,
    pub user_id: Option<i64>,
}

/// Which list a copy request refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskList {
    Monthly,
    Weekly,
    Daily,
}

/// Result of a transition that passed local validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    Applied,
    Rejected(ApiError),
}

pub struct TaskBoard {
    client: Rc<HttpClient>,
    filter: Cell<ViewFilter>,
    selected_day: Cell<NaiveDate>,
    month: Cell<YearMonth>,
    month_week: RefCell<QuerySlot<MonthWeekKey, MonthWeekTasks>>,
    day_tasks: RefCell<QuerySlot<DayKey, Vec<TaskItem>>>,
    income: RefCell<QuerySlot<IncomeKey, IncomeMap>>,
}

impl TaskBoard {
    pub fn new(client: Rc<HttpClient>, today: NaiveDate) -> Self {
        Self {
            client,
            filter: Cell::new(ViewFilter::default()),
            selected_day: Cell::new(today),
            month: Cell::new(YearMonth::of(today)),
            month_week: RefCell::new(QuerySlot::default()),
            day_tasks: RefCell::new(QuerySlot::default()),
            income: RefCell::new(QuerySlot::default()),
        }
    }

    pub fn client(&self) -> &Rc<HttpClient> {
        &self.client
    }

    pub fn filter(&self) -> ViewFilter {
        self.filter.get()
    }

    pub fn set_filter(&self, filter: ViewFilter) {
        self.filter.set(filter);
    }

    pub fn selected_day(&self) -> NaiveDate {
        self.selected_day.get()
    }

    pub fn select_day(&self, day: NaiveDate) {
        self.selected_day.set(day);
    }

    pub fn calendar_month(&self) -> YearMonth {
        self.month.get()
    }

    pub fn set_calendar_month(&self, month: YearMonth) {
        self.month.set(month);
    }

    pub fn can_edit(&self) -> bool {
        self.filter().can_edit(self.client.session().user_id())
    }

    pub fn month_week_key(&self) -> MonthWeekKey {
        MonthWeekKey {
            user_id: self.filter().user_id,
        }
    }

    pub fn day_key(&self) -> DayKey {
        DayKey {
            day: self.selected_day(),
            user_id: self.filter().user_id,
        }
    }

    pub fn income_key(&self) -> IncomeKey {
        IncomeKey {
            month: self.calendar_month(),
            user_id: self.filter().user_id,
        }
    }

    pub fn month_week(&self) -> Ref<'_, QuerySlot<MonthWeekKey, MonthWeekTasks>> {
        self.month_week.borrow()
    }

    pub fn day_tasks(&self) -> Ref<'_, QuerySlot<DayKey, Vec<TaskItem>>> {
        self.day_tasks.borrow()
    }

    pub fn income(&self) -> Ref<'_, QuerySlot<IncomeKey, IncomeMap>> {
        self.income.borrow()
    }

    /// Load any query whose parameters changed since the last load
    pub async fn load_all(&self) {
        // failures are already reported by the client
        let _ = self.load_month_week().await;
        let _ = self.load_day_tasks().await;
        let _ = self.load_income().await;
    }

    pub async fn load_month_week(&self) -> Result<(), ApiError> {
        let key = self.month_week_key();
        if !self.month_week.borrow_mut().request(key) {
            return Ok(());
        }
        self.fetch_month_week(key).await
    }

    pub async fn load_day_tasks(&self) -> Result<(), ApiError> {
        let key = self.day_key();
        if !self.day_tasks.borrow_mut().request(key) {
            return Ok(());
        }
        self.fetch_day_tasks(key).await
    }

    pub async fn load_income(&self) -> Result<(), ApiError> {
        let key = self.income_key();
        if !self.income.borrow_mut().request(key) {
            return Ok(());
        }
        let result = api::fetch_daily_output(&self.client, key.month, key.user_id).await;
        settle(&self.income, &key, result)
    }

    /// Refetch both task lists for the current parameters
    pub async fn refresh_tasks(&self) {
        let month_week = self.month_week_key();
        self.month_week.borrow_mut().reload(month_week);
        let day = self.day_key();
        self.day_tasks.borrow_mut().reload(day);

        let _ = self.fetch_month_week(month_week).await;
        let _ = self.fetch_day_tasks(day).await;
    }

    async fn fetch_month_week(&self, key: MonthWeekKey) -> Result<(), ApiError> {
        let result = api::fetch_month_week(&self.client, key.user_id).await;
        settle(&self.month_week, &key, result)
    }

    async fn fetch_day_tasks(&self, key: DayKey) -> Result<(), ApiError> {
        let result = api::fetch_day_tasks(&self.client, key.day, key.user_id).await;
        settle(&self.day_tasks, &key, result)
    }

    /// Validate, submit and refetch. Local validation failures (action not
    /// offered, missing or bad score) return `Err` without any request.
    pub async fn transition(
        &self,
        task_id: i64,
        from: TaskStatus,
        action: TaskAction,
        score_input: &str,
    ) -> Result<TransitionOutcome, TransitionError> {
        let score = match action {
            TaskAction::Complete => SelfScore::parse(score_input)?,
            _ => None,
        };
        let request = plan_transition(task_id, from, action, score)?;

        let outcome = match api::submit_transition(&self.client, &request).await {
            Ok(()) => {
                self.client.notifier().success(TRANSITION_OK);
                TransitionOutcome::Applied
            }
            Err(e) => {
                if e != ApiError::SessionExpired {
                    self.client.notifier().error(TRANSITION_FAILED, None);
                }
                TransitionOutcome::Rejected(e)
            }
        };

        self.refresh_tasks().await;
        Ok(outcome)
    }

    /// Clipboard text for one of the loaded lists
    pub fn copy_text(&self, list: TaskList) -> Option<String> {
        match list {
            TaskList::Monthly => format_for_clipboard(&self.month_week().value()?.monthly),
            TaskList::Weekly => format_for_clipboard(&self.month_week().value()?.weekly),
            TaskList::Daily => format_for_clipboard(self.day_tasks().value()?),
        }
    }
}

fn settle<K: PartialEq + Clone, V>(
    slot: &RefCell<QuerySlot<K, V>>,
    key: &K,
    result: Result<V, ApiError>,
) -> Result<(), ApiError> {
    match result {
        Ok(value) => {
            slot.borrow_mut().resolve(key, value);
            Ok(())
        }
        Err(e) => {
            slot.borrow_mut().fail(key);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{harness, Note};
    use crate::session::User;
    use serde_json::json;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
    }

    #[test]
    fn test_view_filter() {
        assert_eq!(ViewFilter::from_selection(""), ViewFilter::default());
        assert_eq!(ViewFilter::from_selection("all").user_id, None);
        assert_eq!(ViewFilter::from_selection("12").user_id, Some(12));

        assert!(ViewFilter::default().can_edit(None));
        assert!(ViewFilter { user_id: Some(3) }.can_edit(Some(3)));
        assert!(!ViewFilter { user_id: Some(3) }.can_edit(Some(4)));
        assert!(!ViewFilter { user_id: Some(3) }.can_edit(None));
    }

    #[test]
    fn test_board_can_edit_uses_session() {
        let h = harness();
        h.session.set_user(Some(User {
            user_id: 7,
            ..Default::default()
        }));
        let board = TaskBoard::new(Rc::new(h.client), day(27));
        board.set_filter(ViewFilter { user_id: Some(7) });
        assert!(board.can_edit());
        board.set_filter(ViewFilter { user_id: Some(8) });
        assert!(!board.can_edit());
    }

    #[tokio::test]
    async fn test_load_all_sends_keyed_queries() {
        let h = harness();
        h.transport.ok(json!([{"taskId": 1, "title": "M", "taskType": 3, "taskStatus": 1}]));
        h.transport.ok(json!([{"taskId": 2, "title": "D", "taskStatus": 2}]));
        h.transport.ok(json!([{"first": "20260227", "second": 1.5, "third": 4, "fourth": 1}]));

        let board = TaskBoard::new(Rc::new(h.client), day(27));
        board.set_filter(ViewFilter { user_id: Some(5) });
        board.load_all().await;

        assert_eq!(
            h.transport.urls(),
            vec![
                "/ssl/tacticTask/getMothWeekTasks?userId=5",
                "/ssl/tacticTask/getDayTasks/20260227?userId=5",
                "/ssl/tacticTask/getDailyOutput/202602?userId=5",
            ]
        );
        assert_eq!(board.month_week().value().unwrap().monthly.len(), 1);
        assert_eq!(board.day_tasks().value().unwrap()[0].title, "D");
        assert_eq!(board.income().value().unwrap()[&day(27)].completed, 4);

        // unchanged parameters do not refetch
        board.load_all().await;
        assert_eq!(h.transport.sent.borrow().len(), 3);
    }

    #[tokio::test]
    async fn test_unfiltered_view_omits_user_id() {
        let h = harness();
        h.transport.ok(json!([]));
        let board = TaskBoard::new(Rc::new(h.client), day(3));
        board.load_day_tasks().await.unwrap();
        assert_eq!(h.transport.urls(), vec!["/ssl/tacticTask/getDayTasks/20260203"]);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_list() {
        let h = harness();
        h.transport.ok(json!([{"taskId": 2, "title": "D"}]));
        h.transport.reply(503, json!({}));
        let board = TaskBoard::new(Rc::new(h.client), day(3));
        board.load_day_tasks().await.unwrap();
        board.refresh_tasks().await;
        assert_eq!(board.day_tasks().value().unwrap().len(), 1);
        assert!(!board.day_tasks().is_loading());
    }

    #[tokio::test]
    async fn test_rejected_transition_still_refetches() {
        let h = harness();
        h.transport.reply(200, json!({"code": 500, "message": "任务已锁定"}));
        h.transport.ok(json!([]));
        h.transport.ok(json!([]));
        let notifier = h.notifier.clone();
        let board = TaskBoard::new(Rc::new(h.client), day(3));

        let outcome = board
            .transition(4, TaskStatus::NotStarted, TaskAction::Start, "")
            .await
            .unwrap();
        assert!(matches!(outcome, TransitionOutcome::Rejected(ApiError::Business { .. })));
        assert_eq!(h.transport.sent.borrow().len(), 3);
        assert_eq!(
            notifier.notes.borrow().last(),
            Some(&Note::Error(TRANSITION_FAILED.into(), None))
        );
    }

    #[tokio::test]
    async fn test_bad_score_dispatches_nothing() {
        let h = harness();
        let board = TaskBoard::new(Rc::new(h.client), day(3));
        assert_eq!(
            board
                .transition(4, TaskStatus::InProgress, TaskAction::Complete, "abc")
                .await,
            Err(TransitionError::InvalidScore("abc".into()))
        );
        assert_eq!(
            board
                .transition(4, TaskStatus::InProgress, TaskAction::Complete, "101")
                .await,
            Err(TransitionError::ScoreOutOfRange(101))
        );
        assert!(h.transport.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_copy_text() {
        let h = harness();
        h.transport.ok(json!([
            {"taskId": 1, "title": "写周报", "taskType": 4, "completionRate": "50%", "desc": "周五"},
            {"taskId": 2, "title": "定目标", "taskType": 3}
        ]));
        let board = TaskBoard::new(Rc::new(h.client), day(3));
        assert_eq!(board.copy_text(TaskList::Weekly), None);
        board.load_month_week().await.unwrap();
        assert_eq!(board.copy_text(TaskList::Weekly).as_deref(), Some("1. 写周报 (周五)"));
        assert_eq!(board.copy_text(TaskList::Monthly).as_deref(), Some("1. 定目标"));
        assert_eq!(board.copy_text(TaskList::Daily), None);
    }

    #[tokio::test]
    async fn test_failed_day_change_hides_previous_day_and_retries() {
        let h = harness();
        h.transport.ok(json!([{"taskId": 1, "title": "Feb 3 task", "taskStatus": 1}]));
        h.transport.reply(503, json!({}));
        h.transport.ok(json!([{"taskId": 2, "title": "Feb 4 task", "taskStatus": 1}]));
        let board = TaskBoard::new(Rc::new(h.client), day(3));

        board.load_day_tasks().await.unwrap();
        board.select_day(day(4));
        assert!(board.load_day_tasks().await.is_err());
        assert!(board.day_tasks().value().is_none());
        assert_eq!(board.copy_text(TaskList::Daily), None);

        board.load_day_tasks().await.unwrap();
        assert_eq!(
            h.transport.urls(),
            vec![
                "/ssl/tacticTask/getDayTasks/20260203",
                "/ssl/tacticTask/getDayTasks/20260204",
                "/ssl/tacticTask/getDayTasks/20260204",
            ]
        );
        assert_eq!(board.day_tasks().value().unwrap()[0].title, "Feb 4 task");
    }

    #[tokio::test]
    async fn test_filter_change_drops_late_response_for_old_user() {
        let h = harness();
        h.transport.ok(json!([{"taskId": 6, "title": "user six", "taskStatus": 1}]));
        h.transport.ok(json!([{"taskId": 5, "title": "user five", "taskStatus": 1}]));
        let board = TaskBoard::new(Rc::new(h.client), day(3));

        board.set_filter(ViewFilter { user_id: Some(5) });
        let old = board.day_key();
        assert!(board.day_tasks.borrow_mut().request(old));

        board.set_filter(ViewFilter { user_id: Some(6) });
        board.load_day_tasks().await.unwrap();
        // the first request answers after the filter moved on
        board.fetch_day_tasks(old).await.unwrap();

        assert_eq!(board.day_tasks().loaded_key(), Some(&board.day_key()));
        assert_eq!(board.day_tasks().value().unwrap()[0].title, "user six");
        assert_eq!(board.copy_text(TaskList::Daily).as_deref(), Some("1. user six"));
        assert_eq!(h.transport.urls()[1], "/ssl/tacticTask/getDayTasks/20260203?userId=5");
    }
}
