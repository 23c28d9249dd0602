//! Personal todo note, one record per user

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::{ApiError, HttpClient, HttpRequest, Method, RequestOptions};
use crate::value::{lenient_id, null_as_default};

pub const GET_TODO_PATH: &str = "/tacticTask/getUserTreat";
pub const SAVE_TODO_PATH: &str = "/tacticTask/save/userTreat";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TodoNote {
    /// `None` until the first save creates the record
    #[serde(deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub treat_id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub treat_content: String,
}

/// The stored note; an empty note when the user has none yet
pub async fn fetch_todo(client: &HttpClient) -> Result<TodoNote, ApiError> {
    let data = client.execute(HttpRequest::new(Method::Get, GET_TODO_PATH)).await?;
    if data.is_null() {
        return Ok(TodoNote::default());
    }
    TodoNote::deserialize(&data).map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn save_todo(client: &HttpClient, note: &TodoNote) -> Result<(), ApiError> {
    let body = serde_json::to_value(note).map_err(|e| ApiError::Setup(e.to_string()))?;
    let _: Value = client
        .call(
            HttpRequest::new(Method::Post, SAVE_TODO_PATH)
                .body(body)
                .options(RequestOptions::announce()),
        )
        .await?;
    Ok(())
}
