//! Team roster for the view filter

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::{ApiError, HttpClient, HttpRequest, Method};
use crate::value::{lenient_id, lenient_text};

pub const TEAM_USERS_PATH: &str = "/tacticTask/getAllTeamsUser";

/// One selectable member: `key` is the user id, `value` the display name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamUser {
    #[serde(deserialize_with = "lenient_id")]
    pub key: Option<i64>,
    #[serde(deserialize_with = "lenient_text")]
    pub value: Option<String>,
}

pub async fn fetch_team_users(client: &HttpClient) -> Result<Vec<TeamUser>, ApiError> {
    let data = client.execute(HttpRequest::new(Method::Get, TEAM_USERS_PATH)).await?;
    Ok(parse_team_users(&data))
}

/// Rows without an id cannot be selected and are dropped
pub fn parse_team_users(data: &Value) -> Vec<TeamUser> {
    data.as_array()
        .map(|rows| rows.as_slice())
        .unwrap_or_default()
        .iter()
        .filter_map(|row| TeamUser::deserialize(row).ok())
        .filter(|user| user.key.is_some())
        .collect()
}
