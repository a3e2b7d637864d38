//! Runner: drives one agent tree for user messages
//!
//! `run_async` records the user's message in the session, runs the root agent
//! on a spawned task and returns an [`EventStream`]. Every event reaches the
//! session service before it is yielded. Dropping the stream aborts the turn.

use agent_core::{
    Agent, Content, Error, Event, EventSink, InvocationContext, Result, SessionKey,
    SessionService,
};
use futures::Stream;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tracing::{Instrument, info, info_span, warn};

/// Events of one invocation, in emission order
///
/// Yields `Err` once if the invocation could not start or failed outside an
/// agent's own error handling, then ends.
pub struct EventStream {
    rx: UnboundedReceiver<Result<Event>>,
    handle: JoinHandle<()>,
}

impl Stream for EventStream {
    type Item = Result<Event>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for EventStream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Runs a root agent against sessions of one app
#[derive(Clone)]
pub struct Runner {
    app_name: String,
    agent: Arc<dyn Agent>,
    session_service: Arc<dyn SessionService>,
}

impl Runner {
    pub fn new(
        app_name: impl Into<String>,
        agent: Arc<dyn Agent>,
        session_service: Arc<dyn SessionService>,
    ) -> Self {
        let app_name = app_name.into();
        info!(app_name = %app_name, agent = agent.name(), "Runner created");
        Self {
            app_name,
            agent,
            session_service,
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn agent(&self) -> &Arc<dyn Agent> {
        &self.agent
    }

    pub fn session_service(&self) -> &Arc<dyn SessionService> {
        &self.session_service
    }

    /// Start an invocation for `new_message` in an existing session
    ///
    /// Must be called from within a tokio runtime.
    pub fn run_async(&self, user_id: &str, session_id: &str, new_message: Content) -> EventStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let key = SessionKey::new(&self.app_name, user_id, session_id);
        let invocation_id = format!("e-{}", uuid::Uuid::new_v4());
        let span = info_span!("invocation", invocation_id = %invocation_id, session = %key);

        let agent = Arc::clone(&self.agent);
        let service = Arc::clone(&self.session_service);
        let handle = tokio::spawn(
            async move {
                let sink = tx.clone();
                match run_invocation(agent, service, key, invocation_id, new_message, sink).await {
                    Ok(()) | Err(Error::Cancelled) => {}
                    Err(e) => {
                        warn!(error = %e, "Invocation failed");
                        let _ = tx.send(Err(e));
                    }
                }
            }
            .instrument(span),
        );

        EventStream { rx, handle }
    }
}

async fn run_invocation(
    agent: Arc<dyn Agent>,
    service: Arc<dyn SessionService>,
    key: SessionKey,
    invocation_id: String,
    new_message: Content,
    sink: EventSink,
) -> Result<()> {
    let mut session = service
        .get_session(&key)
        .await?
        .ok_or_else(|| Error::SessionNotFound(key.to_string()))?;

    let user_event = Event::user_message(&invocation_id, new_message.clone());
    let user_event = service.append_event(&key, user_event).await?;
    session.apply_event(user_event);

    info!(agent = agent.name(), "Invocation started");
    let mut ctx = InvocationContext::new(invocation_id, session, new_message, service, sink);
    agent.run(&mut ctx).await?;
    info!(agent = agent.name(), "Invocation finished");
    Ok(())
}
