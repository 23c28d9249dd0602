//! Endpoint Wrappers
//!
//! Typed calls to the dashboard backend, organized by domain. Each call goes
//! through [`HttpClient`](crate::http::HttpClient) and hands back parsed
//! domain values.

mod approval;
mod income;
mod menu;
mod strategy;
mod task;
mod team;
mod todo;

pub use approval::*;
pub use income::*;
pub use menu::*;
pub use strategy::*;
pub use task::*;
pub use team::*;
pub use todo::*;

use serde_json::{json, Value};

/// Query payload for endpoints filtered by an optional user
fn user_filter(user_id: Option<i64>) -> Option<Value> {
    user_id.map(|id| json!({ "userId": id }))
}
