//! Task Lifecycle
//!
//! Status codes, the transition table that decides which action buttons a
//! task row offers, and ingestion of the monthly/weekly/daily task lists.
//!
//! The client never moves a task itself. A chosen action becomes a
//! [`TransitionRequest`]; the task service applies it and the lists are
//! fetched again.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::labels::Priority;
use crate::value::{lenient_id, lenient_text};

/// `approveStatus` value meaning the task passed review
pub const APPROVED: i64 = 3;

/// `taskType` of monthly goals
pub const MONTHLY_TASK_TYPE: i64 = 3;
/// `taskType` of weekly goals
pub const WEEKLY_TASK_TYPE: i64 = 4;
/// Code carried by `TaskStatus::Unknown` when a row has no status at all
pub const MISSING_STATUS: i64 = i64::MIN;

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// -1: removed after being paused
    Abandoned,
    /// 0: removed before it started
    Discarded,
    /// 1
    NotStarted,
    /// 2
    InProgress,
    /// 3
    Paused,
    /// 4
    Completed,
    /// 5: display-only, derived from the approval record
    Accepted,
    /// 6: sent back for rework
    Redo,
    /// Anything the client does not know
    Unknown(i64),
}

impl TaskStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            -1 => TaskStatus::Abandoned,
            0 => TaskStatus::Discarded,
            1 => TaskStatus::NotStarted,
            2 => TaskStatus::InProgress,
            3 => TaskStatus::Paused,
            4 => TaskStatus::Completed,
            5 => TaskStatus::Accepted,
            6 => TaskStatus::Redo,
            other => TaskStatus::Unknown(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            TaskStatus::Abandoned => -1,
            TaskStatus::Discarded => 0,
            TaskStatus::NotStarted => 1,
            TaskStatus::InProgress => 2,
            TaskStatus::Paused => 3,
            TaskStatus::Completed => 4,
            TaskStatus::Accepted => 5,
            TaskStatus::Redo => 6,
            TaskStatus::Unknown(code) => *code,
        }
    }

    /// Reaching this status means the task is deleted
    pub fn is_deletion(&self) -> bool {
        matches!(self, TaskStatus::Discarded | TaskStatus::Abandoned)
    }

    /// Statuses a user can still act on
    pub fn is_alive(&self) -> bool {
        matches!(
            self,
            TaskStatus::NotStarted
                | TaskStatus::InProgress
                | TaskStatus::Paused
                | TaskStatus::Completed
                | TaskStatus::Redo
        )
    }
}

/// Status shown to the user: an approved task reads as accepted whatever
/// the raw status says. A row without a status is unknown, not deleted.
pub fn display_status(raw_status: Option<i64>, approve_status: Option<i64>) -> TaskStatus {
    if approve_status == Some(APPROVED) {
        TaskStatus::Accepted
    } else {
        raw_status.map_or(TaskStatus::Unknown(MISSING_STATUS), TaskStatus::from_code)
    }
}

/// User action on a task row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskAction {
    Discard,
    Start,
    Pause,
    Complete,
    Resume,
    Revert,
}

impl TaskAction {
    pub fn label(&self) -> &'static str {
        match self {
            TaskAction::Discard => "废弃",
            TaskAction::Start => "开始",
            TaskAction::Pause => "暂停",
            TaskAction::Complete => "完成并自评",
            TaskAction::Resume => "继续",
            TaskAction::Revert => "撤回",
        }
    }
}

/// Extra data an action needs before it can be sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    None,
    SelfScore,
}

/// One row of the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub action: TaskAction,
    pub target: TaskStatus,
    pub payload: PayloadShape,
}

const fn edge(action: TaskAction, target: TaskStatus, payload: PayloadShape) -> Transition {
    Transition { action, target, payload }
}

const FROM_NOT_STARTED: &[Transition] = &[
    edge(TaskAction::Discard, TaskStatus::Discarded, PayloadShape::None),
    edge(TaskAction::Start, TaskStatus::InProgress, PayloadShape::None),
];
const FROM_IN_PROGRESS: &[Transition] = &[
    edge(TaskAction::Pause, TaskStatus::Paused, PayloadShape::None),
    edge(TaskAction::Complete, TaskStatus::Completed, PayloadShape::SelfScore),
];
const FROM_PAUSED: &[Transition] = &[
    edge(TaskAction::Discard, TaskStatus::Abandoned, PayloadShape::None),
    edge(TaskAction::Resume, TaskStatus::InProgress, PayloadShape::None),
];
const FROM_COMPLETED: &[Transition] = &[edge(TaskAction::Revert, TaskStatus::Redo, PayloadShape::None)];
const FROM_REDO: &[Transition] = &[edge(TaskAction::Start, TaskStatus::InProgress, PayloadShape::None)];

/// Actions offered for a task in `status`, in display order
pub fn transitions(status: TaskStatus) -> &'static [Transition] {
    match status {
        TaskStatus::NotStarted => FROM_NOT_STARTED,
        TaskStatus::InProgress => FROM_IN_PROGRESS,
        TaskStatus::Paused => FROM_PAUSED,
        TaskStatus::Completed => FROM_COMPLETED,
        TaskStatus::Redo => FROM_REDO,
        TaskStatus::Accepted
        | TaskStatus::Discarded
        | TaskStatus::Abandoned
        | TaskStatus::Unknown(_) => &[],
    }
}

/// Self-assessment attached to completion, 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfScore(u8);

impl SelfScore {
    pub const MAX: i64 = 100;

    pub fn new(score: i64) -> Result<Self, TransitionError> {
        if (0..=Self::MAX).contains(&score) {
            Ok(Self(score as u8))
        } else {
            Err(TransitionError::ScoreOutOfRange(score))
        }
    }

    /// Parse the score input box. Blank input is `Ok(None)`.
    pub fn parse(input: &str) -> Result<Option<Self>, TransitionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let number: f64 = trimmed
            .parse()
            .map_err(|_| TransitionError::InvalidScore(trimmed.to_string()))?;
        if number.fract() != 0.0 || !number.is_finite() {
            return Err(TransitionError::InvalidScore(trimmed.to_string()));
        }
        Self::new(number as i64).map(Some)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Why an action cannot be turned into a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("{action:?} is not available for a task in status {from:?}")]
    NotAllowed { from: TaskStatus, action: TaskAction },
    #[error("a self score is required to complete a task")]
    MissingScore,
    #[error("self score {0} is outside 0-100")]
    ScoreOutOfRange(i64),
    #[error("'{0}' is not a whole number")]
    InvalidScore(String),
}

/// The call a transition turns into. Deletions use their own endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionRequest {
    Delete {
        task_id: i64,
    },
    UpdateStatus {
        task_id: i64,
        status: TaskStatus,
        self_score: Option<SelfScore>,
    },
}

/// Body of the status update endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateBody {
    pub task_id: i64,
    pub task_status: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_score: Option<u8>,
}

impl TransitionRequest {
    pub fn task_id(&self) -> i64 {
        match self {
            TransitionRequest::Delete { task_id } | TransitionRequest::UpdateStatus { task_id, .. } => *task_id,
        }
    }

    pub fn status_body(&self) -> Option<StatusUpdateBody> {
        match self {
            TransitionRequest::Delete { .. } => None,
            TransitionRequest::UpdateStatus { task_id, status, self_score } => Some(StatusUpdateBody {
                task_id: *task_id,
                task_status: status.code(),
                self_score: self_score.map(|s| s.value()),
            }),
        }
    }
}

/// Check `action` against the table and build the request to send.
/// No request is produced when the score is missing.
pub fn plan_transition(
    task_id: i64,
    from: TaskStatus,
    action: TaskAction,
    score: Option<SelfScore>,
) -> Result<TransitionRequest, TransitionError> {
    let transition = transitions(from)
        .iter()
        .find(|t| t.action == action)
        .ok_or(TransitionError::NotAllowed { from, action })?;

    if transition.target.is_deletion() {
        return Ok(TransitionRequest::Delete { task_id });
    }

    let self_score = match transition.payload {
        PayloadShape::SelfScore => Some(score.ok_or(TransitionError::MissingScore)?),
        PayloadShape::None => None,
    };

    Ok(TransitionRequest::UpdateStatus {
        task_id,
        status: transition.target,
        self_score,
    })
}

/// Attachment on a daily task
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskFile {
    #[serde(deserialize_with = "lenient_id")]
    pub file_id: Option<i64>,
    pub file_name: Option<String>,
    pub file_url: Option<String>,
}

/// Task row as shown in the lists
#[derive(Debug, Clone, PartialEq)]
pub struct TaskItem {
    pub id: i64,
    pub title: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub percent: Option<f64>,
    pub files: Vec<TaskFile>,
    pub from: String,
    pub to: String,
    pub remark: Option<String>,
    pub description: Option<String>,
    pub desc: Option<String>,
    pub token_estimate: Option<String>,
}

impl TaskItem {
    /// Short explanation used when copying a list
    pub fn summary(&self) -> Option<&str> {
        self.desc
            .as_deref()
            .or(self.description.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

/// Raw task row. Every field is optional; rows without an id are dropped.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawTask {
    #[serde(deserialize_with = "lenient_id")]
    task_id: Option<i64>,
    title: Option<String>,
    #[serde(deserialize_with = "lenient_id")]
    task_status: Option<i64>,
    #[serde(deserialize_with = "lenient_id")]
    approve_status: Option<i64>,
    #[serde(deserialize_with = "lenient_id")]
    priority: Option<i64>,
    #[serde(deserialize_with = "lenient_id")]
    task_type: Option<i64>,
    #[serde(deserialize_with = "lenient_text")]
    completion_rate: Option<String>,
    files: Option<Vec<TaskFile>>,
    start_time: Option<String>,
    end_time: Option<String>,
    remark: Option<String>,
    description: Option<String>,
    desc: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    es_token_value: Option<String>,
}

impl RawTask {
    fn into_item(self) -> Option<(TaskItem, Option<i64>, Option<String>)> {
        let id = self.task_id?;
        let item = TaskItem {
            id,
            title: self.title.unwrap_or_default(),
            status: display_status(self.task_status, self.approve_status),
            priority: Priority::from_code(self.priority.unwrap_or(0)),
            percent: None,
            files: self.files.unwrap_or_default(),
            from: clock_prefix(self.start_time.as_deref()),
            to: clock_prefix(self.end_time.as_deref()),
            remark: self.remark.filter(|r| !r.trim().is_empty()),
            description: self.description,
            desc: self.desc,
            token_estimate: self.es_token_value,
        };
        Some((item, self.task_type, self.completion_rate))
    }
}

/// `HH:MM` from a `HH:MM:SS` time
fn clock_prefix(time: Option<&str>) -> String {
    time.map(|t| t.chars().take(5).collect()).unwrap_or_default()
}

/// Percentage from text like `"45.5%"`; anything unreadable is 0.
pub fn parse_percent(rate: Option<&str>) -> f64 {
    let digits: String = rate
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().unwrap_or(0.0)
}

fn rows(data: &Value) -> impl Iterator<Item = (TaskItem, Option<i64>, Option<String>)> + '_ {
    data.as_array()
        .map(|rows| rows.as_slice())
        .unwrap_or_default()
        .iter()
        .filter_map(|row| match RawTask::deserialize(row) {
            Ok(raw) => raw.into_item(),
            Err(e) => {
                log::warn!("[TASK] Skipping malformed task row: {}", e);
                None
            }
        })
}

/// Monthly and weekly goals from one response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthWeekTasks {
    pub monthly: Vec<TaskItem>,
    pub weekly: Vec<TaskItem>,
}

/// Split the combined goal list by task type; weekly rows carry a percent.
pub fn split_month_week(data: &Value) -> MonthWeekTasks {
    let mut result = MonthWeekTasks::default();
    for (mut item, task_type, rate) in rows(data) {
        match task_type {
            Some(MONTHLY_TASK_TYPE) => result.monthly.push(item),
            Some(WEEKLY_TASK_TYPE) => {
                item.percent = Some(parse_percent(rate.as_deref()));
                result.weekly.push(item);
            }
            _ => {}
        }
    }
    result
}

/// Daily task list
pub fn parse_day_tasks(data: &Value) -> Vec<TaskItem> {
    rows(data).map(|(item, _, _)| item).collect()
}

/// Numbered plain-text list for the clipboard. `None` for an empty list.
pub fn format_for_clipboard(tasks: &[TaskItem]) -> Option<String> {
    if tasks.is_empty() {
        return None;
    }
    let lines: Vec<String> = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| match t.summary() {
            Some(desc) => format!("{}. {} ({})", i + 1, t.title, desc),
            None => format!("{}. {}", i + 1, t.title),
        })
        .collect();
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ALIVE: [TaskStatus; 5] = [
        TaskStatus::NotStarted,
        TaskStatus::InProgress,
        TaskStatus::Paused,
        TaskStatus::Completed,
        TaskStatus::Redo,
    ];

    #[test]
    fn test_every_alive_status_has_an_action() {
        for status in ALIVE {
            assert!(!transitions(status).is_empty(), "{:?} has no actions", status);
        }
        assert!(transitions(TaskStatus::Accepted).is_empty());
        assert!(transitions(TaskStatus::Unknown(42)).is_empty());
    }

    #[test]
    fn test_codes_round_trip() {
        for code in -1..=6 {
            assert_eq!(TaskStatus::from_code(code).code(), code);
        }
        assert_eq!(TaskStatus::from_code(9), TaskStatus::Unknown(9));
    }

    #[test]
    fn test_table_matches_lifecycle() {
        let expect = [
            (TaskStatus::NotStarted, TaskAction::Discard, 0),
            (TaskStatus::NotStarted, TaskAction::Start, 2),
            (TaskStatus::InProgress, TaskAction::Pause, 3),
            (TaskStatus::InProgress, TaskAction::Complete, 4),
            (TaskStatus::Paused, TaskAction::Discard, -1),
            (TaskStatus::Paused, TaskAction::Resume, 2),
            (TaskStatus::Completed, TaskAction::Revert, 6),
        ];
        for (from, action, to) in expect {
            let t = transitions(from).iter().find(|t| t.action == action).unwrap();
            assert_eq!(t.target.code(), to);
        }
    }

    #[test]
    fn test_discard_routes_to_delete_endpoint() {
        let req = plan_transition(8, TaskStatus::NotStarted, TaskAction::Discard, None).unwrap();
        assert_eq!(req, TransitionRequest::Delete { task_id: 8 });
        assert!(req.status_body().is_none());

        let req = plan_transition(8, TaskStatus::Paused, TaskAction::Discard, None).unwrap();
        assert_eq!(req, TransitionRequest::Delete { task_id: 8 });
    }

    #[test]
    fn test_complete_requires_score() {
        assert_eq!(
            plan_transition(1, TaskStatus::InProgress, TaskAction::Complete, None),
            Err(TransitionError::MissingScore)
        );
        let score = SelfScore::new(85).unwrap();
        let req = plan_transition(1, TaskStatus::InProgress, TaskAction::Complete, Some(score)).unwrap();
        let body = req.status_body().unwrap();
        assert_eq!(body.task_status, 4);
        assert_eq!(body.self_score, Some(85));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"taskId": 1, "taskStatus": 4, "selfScore": 85})
        );
    }

    #[test]
    fn test_action_outside_table_is_rejected() {
        let err = plan_transition(1, TaskStatus::Completed, TaskAction::Start, None).unwrap_err();
        assert!(matches!(err, TransitionError::NotAllowed { .. }));
        assert!(plan_transition(1, TaskStatus::Accepted, TaskAction::Revert, None).is_err());
    }

    #[test]
    fn test_score_bounds_and_parsing() {
        assert!(SelfScore::new(0).is_ok());
        assert!(SelfScore::new(100).is_ok());
        assert_eq!(SelfScore::new(101), Err(TransitionError::ScoreOutOfRange(101)));
        assert_eq!(SelfScore::new(-1), Err(TransitionError::ScoreOutOfRange(-1)));
        assert_eq!(SelfScore::parse("  "), Ok(None));
        assert_eq!(SelfScore::parse("0").unwrap().map(|s| s.value()), Some(0));
        assert_eq!(SelfScore::parse("85").unwrap().map(|s| s.value()), Some(85));
        assert!(SelfScore::parse("8.5").is_err());
        assert!(SelfScore::parse("abc").is_err());
    }

    #[test]
    fn test_approval_overrides_status() {
        assert_eq!(display_status(Some(2), Some(APPROVED)), TaskStatus::Accepted);
        assert_eq!(display_status(Some(4), Some(1)), TaskStatus::Completed);
        assert_eq!(display_status(Some(4), None), TaskStatus::Completed);
        assert_eq!(display_status(None, None), TaskStatus::Unknown(MISSING_STATUS));
        assert_eq!(display_status(None, Some(APPROVED)), TaskStatus::Accepted);
    }

    #[test]
    fn test_day_task_ingestion() {
        let data = json!([
            {"taskId": 11, "title": "Write report", "taskStatus": 4, "approveStatus": 3,
             "priority": 1, "startTime": "09:30:00", "endTime": "11:00:00", "remark": "redo intro"},
            {"taskId": "12", "title": "Call", "taskStatus": 2, "priority": "2", "files": [{"fileName": "a.pdf"}]},
            {"title": "no id"},
            "junk"
        ]);
        let tasks = parse_day_tasks(&data);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].status, TaskStatus::Accepted);
        assert_eq!(tasks[0].from, "09:30");
        assert_eq!(tasks[0].to, "11:00");
        assert_eq!(tasks[0].remark.as_deref(), Some("redo intro"));
        assert_eq!(tasks[1].id, 12);
        assert_eq!(tasks[1].priority, Priority::Medium);
        assert_eq!(tasks[1].files.len(), 1);
        assert_eq!(tasks[1].from, "");
    }

    #[test]
    fn test_row_without_status_is_unknown() {
        let tasks = parse_day_tasks(&json!([{"taskId": 9, "title": "no status"}]));
        assert_eq!(tasks[0].status, TaskStatus::Unknown(MISSING_STATUS));
        assert!(!tasks[0].status.is_deletion());
        assert!(transitions(tasks[0].status).is_empty());
        assert_eq!(crate::labels::status_meta(tasks[0].status).label, "未知");
    }

    #[test]
    fn test_month_week_split() {
        let data = json!([
            {"taskId": 1, "title": "Month goal", "taskType": 3, "taskStatus": 2},
            {"taskId": 2, "title": "Week goal", "taskType": 4, "taskStatus": 2, "completionRate": "45.5%"},
            {"taskId": 3, "title": "Week goal 2", "taskType": 4, "completionRate": null},
            {"taskId": 4, "title": "Other", "taskType": 5}
        ]);
        let split = split_month_week(&data);
        assert_eq!(split.monthly.len(), 1);
        assert_eq!(split.weekly.len(), 2);
        assert_eq!(split.weekly[0].percent, Some(45.5));
        assert_eq!(split.weekly[1].percent, Some(0.0));
        assert!(split.monthly[0].percent.is_none());
    }

    #[test]
    fn test_non_array_payload_is_empty() {
        assert!(parse_day_tasks(&Value::Null).is_empty());
        assert_eq!(split_month_week(&json!({"x": 1})), MonthWeekTasks::default());
    }

    #[test]
    fn test_clipboard_format() {
        let data = json!([
            {"taskId": 1, "title": "Alpha", "desc": "first"},
            {"taskId": 2, "title": "Beta"}
        ]);
        let tasks = parse_day_tasks(&data);
        assert_eq!(format_for_clipboard(&tasks).unwrap(), "1. Alpha (first)\n2. Beta");
        assert_eq!(format_for_clipboard(&[]), None);
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent(Some("80%")), 80.0);
        assert_eq!(parse_percent(Some("n/a")), 0.0);
        assert_eq!(parse_percent(None), 0.0);
    }
}
