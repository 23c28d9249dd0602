//! Strategy tree (L1 goals with L2 breakdowns)

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::{ApiError, HttpClient, HttpRequest, Method};
use crate::value::{lenient_id, null_as_default};

pub const STRATEGY_TREE_PATH: &str = "/tacticTask/getTacticTaskTree";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StrategyNode {
    #[serde(deserialize_with = "lenient_id")]
    pub task_id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "childrenTacticTasks", deserialize_with = "null_as_default")]
    pub children: Vec<StrategyNode>,
}

pub async fn fetch_strategy_tree(client: &HttpClient) -> Result<Vec<StrategyNode>, ApiError> {
    let data = client.execute(HttpRequest::new(Method::Get, STRATEGY_TREE_PATH)).await?;
    Ok(parse_strategy_tree(&data))
}

/// Two levels only; deeper entries are dropped
pub fn parse_strategy_tree(data: &Value) -> Vec<StrategyNode> {
    let mut roots: Vec<StrategyNode> = data
        .as_array()
        .map(|rows| rows.as_slice())
        .unwrap_or_default()
        .iter()
        .filter_map(|row| StrategyNode::deserialize(row).ok())
        .collect();
    for l1 in &mut roots {
        for l2 in &mut l1.children {
            l2.children.clear();
        }
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_two_levels() {
        let tree = parse_strategy_tree(&json!([
            {"taskId": 1, "title": "增长", "childrenTacticTasks": [
                {"taskId": 2, "title": "渠道", "childrenTacticTasks": [{"taskId": 3, "title": "deep"}]}
            ]},
            {"taskId": 4, "title": "成本", "childrenTacticTasks": null}
        ]));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].children[0].title, "渠道");
        assert!(tree[0].children[0].children.is_empty());
        assert!(tree[1].children.is_empty());
    }
}
