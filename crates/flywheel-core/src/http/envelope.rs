//! Response Envelope
//!
//! The backend wraps payloads as `{code, message, data}`; some services say
//! `status` for `code` and `result` for `data`.

use serde_json::Value;

use crate::value::{as_id, as_text, present};

/// Business code meaning success
pub const SUCCESS_CODE: i64 = 200;

/// Message used when a failed response carries none
pub const DEFAULT_FAILURE_MESSAGE: &str = "操作失败";

/// Message used when a successful response carries none
pub const DEFAULT_SUCCESS_MESSAGE: &str = "操作成功";

/// Unwrapped envelope
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub data: Value,
}

impl Envelope {
    pub fn parse(body: &Value) -> Self {
        Self {
            code: present(body, "code")
                .or_else(|| present(body, "status"))
                .and_then(as_id),
            message: present(body, "message").and_then(as_text),
            data: present(body, "data")
                .or_else(|| present(body, "result"))
                .cloned()
                .unwrap_or(Value::Null),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(SUCCESS_CODE)
    }

    pub fn failure_message(&self) -> String {
        self.message.clone().unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string())
    }

    pub fn success_message(&self) -> String {
        self.message.clone().unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string())
    }

    /// Token the server rotated in with this response, if any
    pub fn refreshed_token(&self) -> Option<&str> {
        self.data
            .get("accessToken")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_standard_envelope() {
        let env = Envelope::parse(&json!({"code": 200, "message": "ok", "data": [1, 2]}));
        assert!(env.is_success());
        assert_eq!(env.data, json!([1, 2]));
        assert_eq!(env.success_message(), "ok");
    }

    #[test]
    fn test_synonym_fields() {
        let env = Envelope::parse(&json!({"status": 200, "result": {"a": 1}}));
        assert!(env.is_success());
        assert_eq!(env.data, json!({"a": 1}));

        let env = Envelope::parse(&json!({"code": null, "status": "500", "data": null, "result": 3}));
        assert_eq!(env.code, Some(500));
        assert_eq!(env.data, json!(3));
    }

    #[test]
    fn test_failure_defaults() {
        let env = Envelope::parse(&json!({"code": 500, "message": ""}));
        assert!(!env.is_success());
        assert_eq!(env.failure_message(), DEFAULT_FAILURE_MESSAGE);
        assert_eq!(Envelope::parse(&json!("text")).code, None);
    }

    #[test]
    fn test_refreshed_token() {
        let env = Envelope::parse(&json!({"code": 200, "data": {"accessToken": "new"}}));
        assert_eq!(env.refreshed_token(), Some("new"));
        assert_eq!(Envelope::parse(&json!({"code": 200, "data": [1]})).refreshed_token(), None);
    }
}
