//! In-memory session storage

use agent_core::{Error, Event, Result, Session, SessionKey, SessionService, State};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Session service keeping everything in process memory
///
/// Sessions are lost when the process exits.
#[derive(Default)]
pub struct InMemorySessionService {
    sessions: RwLock<BTreeMap<SessionKey, Session>>,
}

impl InMemorySessionService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionService for InMemorySessionService {
    async fn create_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: Option<String>,
        state: Option<State>,
    ) -> Result<Session> {
        let session_id = session_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let key = SessionKey::new(app_name, user_id, &session_id);

        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&key) {
            return Err(Error::SessionExists(key.to_string()));
        }

        let session = Session::new(app_name, user_id, session_id, state.unwrap_or_default());
        sessions.insert(key.clone(), session.clone());
        info!(session = %key, "Session created");
        Ok(session)
    }

    async fn get_session(&self, key: &SessionKey) -> Result<Option<Session>> {
        Ok(self.sessions.read().await.get(key).cloned())
    }

    async fn list_sessions(&self, app_name: &str, user_id: &str) -> Result<Vec<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .values()
            .filter(|s| s.app_name == app_name && s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_session(&self, key: &SessionKey) -> Result<()> {
        match self.sessions.write().await.remove(key) {
            Some(_) => {
                info!(session = %key, "Session deleted");
                Ok(())
            }
            None => Err(Error::SessionNotFound(key.to_string())),
        }
    }

    async fn append_event(&self, key: &SessionKey, event: Event) -> Result<Event> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(key)
            .ok_or_else(|| Error::SessionNotFound(key.to_string()))?;

        if !event.actions.state_delta.is_empty() {
            debug!(
                session = %key,
                keys = ?event.actions.state_delta.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
                "Applying state delta"
            );
        }
        session.apply_event(event.clone());
        Ok(event)
    }

    async fn update_state(&self, key: &SessionKey, delta: State) -> Result<Session> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(key)
            .ok_or_else(|| Error::SessionNotFound(key.to_string()))?;
        session.state.apply_delta(&delta);
        session.last_update_time = chrono::Utc::now();
        Ok(session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::Content;

    #[tokio::test]
    async fn test_create_with_id_and_state() {
        let service = InMemorySessionService::new();
        let session = service
            .create_session(
                "stateful_weather_agent_team",
                "user_state_1",
                Some("session_state_demo_1".into()),
                Some(State::new().with("user_preference_temperature_unit", "Celsius")),
            )
            .await
            .unwrap();

        assert_eq!(session.id, "session_state_demo_1");
        let stored = service.get_session(&session.key()).await.unwrap().unwrap();
        assert_eq!(
            stored.state.get_str("user_preference_temperature_unit"),
            Some("Celsius")
        );
    }

    #[tokio::test]
    async fn test_generated_id_and_duplicates() {
        let service = InMemorySessionService::new();
        let generated = service.create_session("app", "u", None, None).await.unwrap();
        assert!(uuid::Uuid::parse_str(&generated.id).is_ok());

        service
            .create_session("app", "u", Some("fixed".into()), None)
            .await
            .unwrap();
        let dup = service
            .create_session("app", "u", Some("fixed".into()), None)
            .await;
        assert!(matches!(dup, Err(Error::SessionExists(_))));
    }

    #[tokio::test]
    async fn test_append_event_applies_delta() {
        let service = InMemorySessionService::new();
        let session = service
            .create_session("app", "u", Some("s".into()), None)
            .await
            .unwrap();

        let event = Event::new("inv", "weather_agent")
            .with_content(Content::model("Sunny"))
            .with_state_delta("last_weather_report", "Sunny");
        service.append_event(&session.key(), event).await.unwrap();

        let stored = service.get_session(&session.key()).await.unwrap().unwrap();
        assert_eq!(stored.events.len(), 1);
        assert_eq!(stored.state.get_str("last_weather_report"), Some("Sunny"));
    }

    #[tokio::test]
    async fn test_append_to_missing_session() {
        let service = InMemorySessionService::new();
        let result = service
            .append_event(&SessionKey::new("a", "b", "c"), Event::new("i", "x"))
            .await;
        assert!(matches!(result, Err(Error::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_state_list_and_delete() {
        let service = InMemorySessionService::new();
        let session = service
            .create_session("app", "u", Some("s1".into()), None)
            .await
            .unwrap();
        service
            .create_session("app", "other", Some("s2".into()), None)
            .await
            .unwrap();

        let updated = service
            .update_state(
                &session.key(),
                State::new().with("user_preference_temperature_unit", "Fahrenheit"),
            )
            .await
            .unwrap();
        assert_eq!(
            updated.state.get_str("user_preference_temperature_unit"),
            Some("Fahrenheit")
        );
        assert!(updated.events.is_empty());

        assert_eq!(service.list_sessions("app", "u").await.unwrap().len(), 1);

        service.delete_session(&session.key()).await.unwrap();
        assert!(service.get_session(&session.key()).await.unwrap().is_none());
        assert!(service.delete_session(&session.key()).await.is_err());
    }
}
