//! Client Configuration
//!
//! Every field has a default, so a partial override document is enough.

use serde::{Deserialize, Serialize};

/// Runtime settings for the dashboard client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Prefix for every API path
    pub base_url: String,
    /// Default request timeout
    pub timeout_ms: u32,
    /// Timeout for uploads
    pub upload_timeout_ms: u32,
    /// Cookie key holding the access token
    pub token_key: String,
    /// Local storage key holding the signed-in user
    pub user_key: String,
    /// Local storage key holding the selected team id
    pub active_team_key: String,
    /// Pages where an expired session just drops the token
    pub auth_paths: Vec<String>,
    /// Where to send the user after the session expired
    pub sign_in_path: String,
    /// Shown as the team switcher heading
    pub site_name: String,
    /// Route prefixes that belong to the shared "System" menu
    pub common_routes: Vec<String>,
    /// Deepest menu level accepted from the backend
    pub max_menu_depth: usize,
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "/ssl".to_string(),
            timeout_ms: 30_000,
            upload_timeout_ms: 5 * 60 * 1000,
            token_key: "token".to_string(),
            user_key: "userInfo".to_string(),
            active_team_key: "active_dept_id".to_string(),
            auth_paths: ["/sign-in", "/sign-up", "/forgot-password", "/otp"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            sign_in_path: "/sign-in".to_string(),
            site_name: "Flywheel".to_string(),
            common_routes: ["/system", "/member", "/user"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            max_menu_depth: 16,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Parsed log level, `Info` when the configured name is unknown
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"baseUrl": "/api", "logLevel": "debug"}"#).unwrap();
        assert_eq!(config.base_url, "/api");
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.common_routes, vec!["/system", "/member", "/user"]);
        assert_eq!(config.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let config = ClientConfig {
            log_level: "loud".to_string(),
            ..Default::default()
        };
        assert_eq!(config.level_filter(), log::LevelFilter::Info);
    }
}
