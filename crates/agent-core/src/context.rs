//! Invocation context
//!
//! An [`InvocationContext`] is what an agent sees while it handles one user
//! message: the session snapshot, the message itself, the branch it runs on
//! and a sink for the events it produces. Emitting an event appends it to the
//! session service first and only then forwards it to the consumer.

use crate::{Content, Error, Event, Result, Session, SessionKey, SessionService, State};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Receiving side gets every event of the invocation, or the error that ended it
pub type EventSink = UnboundedSender<Result<Event>>;

/// Execution context for one invocation of an agent tree
#[derive(Clone)]
pub struct InvocationContext {
    invocation_id: String,
    branch: Option<String>,
    user_content: Content,
    session: Session,
    session_service: Arc<dyn SessionService>,
    sink: EventSink,
}

impl InvocationContext {
    pub fn new(
        invocation_id: impl Into<String>,
        session: Session,
        user_content: Content,
        session_service: Arc<dyn SessionService>,
        sink: EventSink,
    ) -> Self {
        Self {
            invocation_id: invocation_id.into(),
            branch: None,
            user_content,
            session,
            session_service,
            sink,
        }
    }

    pub fn invocation_id(&self) -> &str {
        &self.invocation_id
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn user_content(&self) -> &Content {
        &self.user_content
    }

    /// Local snapshot of the session, including events emitted through this context
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> &State {
        &self.session.state
    }

    pub fn session_key(&self) -> SessionKey {
        self.session.key()
    }

    /// Fresh event stamped with this invocation and branch
    pub fn new_event(&self, author: &str) -> Event {
        Event::new(&self.invocation_id, author).with_branch(self.branch.clone())
    }

    /// Persist an event and hand it to the consumer
    pub async fn emit(&mut self, event: Event) -> Result<()> {
        let event = self
            .session_service
            .append_event(&self.session.key(), event)
            .await?;
        debug!(
            invocation_id = %self.invocation_id,
            author = %event.author,
            kind = event.kind(),
            "Event appended"
        );
        self.session.apply_event(event.clone());
        self.sink.send(Ok(event)).map_err(|_| Error::Cancelled)
    }

    /// Context for a child running on its own parallel branch
    ///
    /// The branch is `{current}.{child}`, or `{parent}.{child}` on the main line.
    pub fn fork_branch(&self, parent: &str, child: &str) -> Self {
        let base = self.branch.as_deref().unwrap_or(parent);
        let mut forked = self.clone();
        forked.branch = Some(format!("{base}.{child}"));
        forked
    }

    /// Reload the session from the service, picking up other branches' events
    pub async fn refresh_session(&mut self) -> Result<()> {
        let key = self.session.key();
        self.session = self
            .session_service
            .get_session(&key)
            .await?
            .ok_or_else(|| Error::SessionNotFound(key.to_string()))?;
        Ok(())
    }
}

impl std::fmt::Debug for InvocationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvocationContext")
            .field("invocation_id", &self.invocation_id)
            .field("branch", &self.branch)
            .field("session", &self.session.key())
            .finish_non_exhaustive()
    }
}
