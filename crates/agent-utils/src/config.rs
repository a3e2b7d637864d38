//! Session identity configuration

use serde::{Deserialize, Serialize};

/// Environment variable overriding the app name
pub const APP_NAME_ENV: &str = "ADK_APP_NAME";
/// Environment variable overriding the user id
pub const USER_ID_ENV: &str = "ADK_USER_ID";
/// Environment variable overriding the session id
pub const SESSION_ID_ENV: &str = "ADK_SESSION_ID";

/// App, user and session a demo conversation is stored under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
}

impl AppConfig {
    pub fn new(
        app_name: impl Into<String>,
        user_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            user_id: user_id.into(),
            session_id: session_id.into(),
        }
    }

    /// Apply `ADK_APP_NAME`, `ADK_USER_ID` and `ADK_SESSION_ID` when set
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup; empty values are ignored
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(app_name) = get(APP_NAME_ENV) {
            self.app_name = app_name;
        }
        if let Some(user_id) = get(USER_ID_ENV) {
            self.user_id = user_id;
        }
        if let Some(session_id) = get(SESSION_ID_ENV) {
            self.session_id = session_id;
        }
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new("agent_demo_app", "user_1", "session_001")
    }
}
