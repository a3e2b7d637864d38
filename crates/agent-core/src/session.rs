//! Sessions and the session service abstraction

use crate::{Event, Result, State};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of a session: app, user and session id
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionKey {
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
}

impl SessionKey {
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
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.app_name, self.user_id, self.session_id)
    }
}

/// A conversation: its state and the ordered event history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub app_name: String,
    pub user_id: String,
    pub state: State,
    pub events: Vec<Event>,
    pub last_update_time: DateTime<Utc>,
}

impl Session {
    pub fn new(
        app_name: impl Into<String>,
        user_id: impl Into<String>,
        id: impl Into<String>,
        state: State,
    ) -> Self {
        Self {
            id: id.into(),
            app_name: app_name.into(),
            user_id: user_id.into(),
            state,
            events: Vec::new(),
            last_update_time: Utc::now(),
        }
    }

    pub fn key(&self) -> SessionKey {
        SessionKey::new(&self.app_name, &self.user_id, &self.id)
    }

    /// Record an event and apply its state delta
    pub fn apply_event(&mut self, event: Event) {
        self.state.apply_delta(&event.actions.state_delta);
        self.last_update_time = event.timestamp;
        self.events.push(event);
    }
}

/// Storage for sessions
///
/// Implementations must apply `state_delta` of every appended event so that
/// `get_session` always reflects the latest state.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Create a session; a random id is generated when `session_id` is `None`
    async fn create_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: Option<String>,
        state: Option<State>,
    ) -> Result<Session>;

    async fn get_session(&self, key: &SessionKey) -> Result<Option<Session>>;

    async fn list_sessions(&self, app_name: &str, user_id: &str) -> Result<Vec<Session>>;

    async fn delete_session(&self, key: &SessionKey) -> Result<()>;

    /// Append an event to the stored session, applying its actions
    async fn append_event(&self, key: &SessionKey, event: Event) -> Result<Event>;

    /// Merge `delta` into the stored state without recording an event
    async fn update_state(&self, key: &SessionKey, delta: State) -> Result<Session>;
}
