//! Task lists and status changes

use chrono::NaiveDate;
use serde_json::Value;

use super::user_filter;
use crate::http::{ApiError, HttpClient, HttpRequest, Method};
use crate::income::day_key;
use crate::task::{parse_day_tasks, split_month_week, MonthWeekTasks, TaskItem, TransitionRequest};

pub const MONTH_WEEK_TASKS_PATH: &str = "/tacticTask/getMothWeekTasks";
pub const DAY_TASKS_PATH: &str = "/tacticTask/getDayTasks";
pub const DELETE_TASK_PATH: &str = "/tacticTask/delTask/";
pub const SET_TASK_STATUS_PATH: &str = "/tacticTask/setTaskStatus";

pub async fn fetch_month_week(client: &HttpClient, user_id: Option<i64>) -> Result<MonthWeekTasks, ApiError> {
    let data: Value = client.get(MONTH_WEEK_TASKS_PATH, user_filter(user_id)).await?;
    Ok(split_month_week(&data))
}

pub async fn fetch_day_tasks(
    client: &HttpClient,
    day: NaiveDate,
    user_id: Option<i64>,
) -> Result<Vec<TaskItem>, ApiError> {
    let path = format!("{}/{}", DAY_TASKS_PATH, day_key(day));
    let data: Value = client.get(&path, user_filter(user_id)).await?;
    Ok(parse_day_tasks(&data))
}

/// Send a planned transition to the endpoint its shape calls for
pub async fn submit_transition(client: &HttpClient, request: &TransitionRequest) -> Result<(), ApiError> {
    let http = match request {
        TransitionRequest::Delete { task_id } => {
            HttpRequest::new(Method::Post, DELETE_TASK_PATH).query("taskId", task_id)
        }
        TransitionRequest::UpdateStatus { .. } => {
            let body = serde_json::to_value(request.status_body()).map_err(|e| ApiError::Setup(e.to_string()))?;
            HttpRequest::new(Method::Post, SET_TASK_STATUS_PATH).body(body)
        }
    };
    log::info!("[API] task {} transition -> {}", request.task_id(), http.full_url());
    client.execute(http).await?;
    Ok(())
}
