//! Request Failures
//!
//! Three kinds reach the user: no response at all, an HTTP error status, and
//! a business error inside a 200 envelope. An expired session is its own
//! variant because it opens the re-login dialog instead of a toast.

use thiserror::Error;

/// Failure below HTTP: the request never produced a response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
}

/// Any failed API call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("session expired")]
    SessionExpired,
    #[error("HTTP {status}")]
    Http { status: u16 },
    #[error("business error {code:?}: {message}")]
    Business { code: Option<i64>, message: String },
    #[error("unexpected response data: {0}")]
    Decode(String),
    #[error("request setup failed: {0}")]
    Setup(String),
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Network(reason) => ApiError::Network(reason),
            TransportError::Timeout => ApiError::Timeout,
        }
    }
}

/// Toast content for a failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub description: Option<String>,
}

impl ApiError {
    /// Classify a non-2xx HTTP status
    pub fn from_status(status: u16) -> Self {
        if status == 401 {
            ApiError::SessionExpired
        } else {
            ApiError::Http { status }
        }
    }

    /// Classify a non-200 business code
    pub fn from_business(code: Option<i64>, message: String) -> Self {
        if code == Some(401) {
            ApiError::SessionExpired
        } else {
            ApiError::Business { code, message }
        }
    }

    /// Text shown to the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "网络连接异常".to_string(),
            ApiError::Timeout => "请求超时，请检查网络".to_string(),
            ApiError::SessionExpired => "登录已过期".to_string(),
            ApiError::Http { status: 403 } => "拒绝访问: 您没有权限执行此操作".to_string(),
            ApiError::Http { status: 404 } => "资源不存在 (404)".to_string(),
            ApiError::Http { status: 500 } => "服务器内部错误 (500)".to_string(),
            ApiError::Http { status: 503 } => "服务不可用 (503)".to_string(),
            ApiError::Http { status } => format!("请求错误 ({})", status),
            ApiError::Business { message, .. } => message.clone(),
            ApiError::Decode(_) => "响应数据格式错误".to_string(),
            ApiError::Setup(_) => "请求发送失败".to_string(),
        }
    }

    /// Toast for this failure; `None` when the dialog or the log covers it
    pub fn notice(&self, url: &str) -> Option<Notice> {
        match self {
            ApiError::SessionExpired | ApiError::Setup(_) => None,
            ApiError::Business { code: Some(403), message } => Some(Notice {
                message: "权限不足".to_string(),
                description: Some(message.clone()),
            }),
            ApiError::Business { .. } | ApiError::Decode(_) => Some(Notice {
                message: self.user_message(),
                description: None,
            }),
            ApiError::Network(_) | ApiError::Timeout | ApiError::Http { .. } => Some(Notice {
                message: self.user_message(),
                description: Some(url.to_string()),
            }),
        }
    }
}
