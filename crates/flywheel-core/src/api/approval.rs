//! Approval queue

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::{ApiError, HttpClient};
use crate::value::{lenient_id, null_as_default, present};

pub const APPROVAL_QUEUE_PATH: &str = "/tacticTask/getCheckTasks";

/// Task waiting for the current user's approval
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApprovalItem {
    #[serde(deserialize_with = "lenient_id")]
    pub task_id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub create_by: String,
}

impl ApprovalItem {
    /// Avatar letter for the submitter
    pub fn initial(&self) -> String {
        self.create_by.chars().next().map(String::from).unwrap_or_default()
    }
}

/// First page of the queue
pub async fn fetch_approval_queue(client: &HttpClient) -> Result<Vec<ApprovalItem>, ApiError> {
    let data: Value = client
        .get(APPROVAL_QUEUE_PATH, Some(serde_json::json!({ "pageNum": 1 })))
        .await?;
    Ok(parse_approval_page(&data))
}

/// Rows of a `{list: [...]}` page; anything else is an empty queue
pub fn parse_approval_page(data: &Value) -> Vec<ApprovalItem> {
    present(data, "list")
        .and_then(Value::as_array)
        .map(|rows| rows.as_slice())
        .unwrap_or_default()
        .iter()
        .filter_map(|row| match ApprovalItem::deserialize(row) {
            Ok(item) if item.task_id.is_some() => Some(item),
            Ok(_) => None,
            Err(e) => {
                log::warn!("[API] Skipping malformed approval row: {}", e);
                None
            }
        })
        .collect()
}
