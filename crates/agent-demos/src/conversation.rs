//! One conversation turn against a runner

use crate::error::Result;
use agent_core::{Content, Event, Part};
use agent_runtime::Runner;
use futures::StreamExt;
use tracing::info;

pub const NO_FINAL_RESPONSE: &str = "Agent did not produce a final response.";

/// Text reported for a final response event
///
/// The first part's text when the event has content, the escalation message
/// when it escalated, `None` otherwise.
pub fn final_response_text(event: &Event) -> Option<String> {
    if let Some(content) = event.content.as_ref().filter(|c| !c.parts.is_empty()) {
        return content.parts.first().and_then(Part::as_text).map(str::to_string);
    }
    if event.actions.escalate {
        return Some(format!(
            "Agent escalated: {}",
            event
                .error_message
                .as_deref()
                .unwrap_or("No specific error message")
        ));
    }
    None
}

/// Send `query` and return the text of the first final response
///
/// Every event is logged. The turn stops at the first final response;
/// remaining work of the invocation is abandoned.
pub async fn call_agent_async(
    query: &str,
    runner: &Runner,
    user_id: &str,
    session_id: &str,
) -> Result<String> {
    run_turn(query, runner, user_id, session_id, |_| true).await
}

/// Like [`call_agent_async`], but only a final response from `author` ends the turn
///
/// Workflows produce one final response per sub-agent; this waits for the
/// one that matters.
pub async fn call_agent_until_author(
    query: &str,
    runner: &Runner,
    user_id: &str,
    session_id: &str,
    author: &str,
) -> Result<String> {
    run_turn(query, runner, user_id, session_id, |event| event.author == author).await
}

async fn run_turn(
    query: &str,
    runner: &Runner,
    user_id: &str,
    session_id: &str,
    ends_turn: impl Fn(&Event) -> bool,
) -> Result<String> {
    info!(">>> User query: {query}");

    let mut events = runner.run_async(user_id, session_id, Content::user(query));
    let mut final_response = NO_FINAL_RESPONSE.to_string();

    while let Some(item) = events.next().await {
        let event = item?;
        info!(
            author = %event.author,
            kind = event.kind(),
            is_final = event.is_final_response(),
            content = ?event.content,
            "[Event]"
        );

        if event.is_final_response() && ends_turn(&event) {
            if let Some(text) = final_response_text(&event) {
                info!("Final response: {text}");
                final_response = text;
            }
            break;
        }
    }

    info!("<<< Agent response: {final_response}");
    Ok(final_response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::{Agent, Error, FunctionCall, InvocationContext, Role, SessionService};
    use agent_runtime::InMemorySessionService;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;

    /// Emits a fixed list of events
    struct Emitter {
        name: String,
        events: Vec<Event>,
    }

    #[async_trait]
    impl Agent for Emitter {
        fn name(&self) -> &str {
            &self.name
        }

        async fn run(&self, ctx: &mut InvocationContext) -> agent_core::Result<()> {
            for template in &self.events {
                let mut event = ctx.new_event(&template.author);
                event.content.clone_from(&template.content);
                event.actions = template.actions.clone();
                event.error_message.clone_from(&template.error_message);
                ctx.emit(event).await?;
            }
            Ok(())
        }
    }

    fn event(author: &str) -> Event {
        Event::new("template", author)
    }

    async fn runner_for(events: Vec<Event>) -> Runner {
        let service = Arc::new(InMemorySessionService::new());
        service
            .create_session("app", "user", Some("session".into()), None)
            .await
            .unwrap();
        let agent = Emitter {
            name: "emitter".to_string(),
            events,
        };
        Runner::new("app", Arc::new(agent), service)
    }

    #[test]
    fn test_final_response_text_variants() {
        let text = event("a").with_content(Content::model("Sunny"));
        assert_eq!(final_response_text(&text).as_deref(), Some("Sunny"));

        let escalated = event("a").with_error("model offline");
        assert_eq!(
            final_response_text(&escalated).as_deref(),
            Some("Agent escalated: model offline")
        );

        let mut bare = event("a");
        bare.actions.escalate = true;
        assert_eq!(
            final_response_text(&bare).as_deref(),
            Some("Agent escalated: No specific error message")
        );

        assert_eq!(final_response_text(&event("a")), None);
    }

    #[tokio::test]
    async fn test_returns_first_final_text() {
        let call = Content::new(
            Role::Model,
            vec![Part::FunctionCall(FunctionCall {
                id: "call_1".to_string(),
                name: "get_weather".to_string(),
                args: json!({"city": "London"}),
            })],
        );
        let runner = runner_for(vec![
            event("emitter").with_content(call),
            event("emitter").with_content(Content::model("First")),
            event("emitter").with_content(Content::model("Second")),
        ])
        .await;

        let response = call_agent_async("Weather?", &runner, "user", "session").await.unwrap();
        assert_eq!(response, "First");
    }

    #[tokio::test]
    async fn test_escalation_and_default() {
        let runner = runner_for(vec![event("emitter").with_error("Max iterations (10) reached")]).await;
        let response = call_agent_async("Hi", &runner, "user", "session").await.unwrap();
        assert_eq!(response, "Agent escalated: Max iterations (10) reached");

        let silent = runner_for(Vec::new()).await;
        let response = call_agent_async("Hi", &silent, "user", "session").await.unwrap();
        assert_eq!(response, NO_FINAL_RESPONSE);
    }

    #[tokio::test]
    async fn test_until_author_skips_other_finals() {
        let runner = runner_for(vec![
            event("StockPriceAgent").with_content(Content::model("{\"price\": 1}")),
            event("SummarizerAgent").with_content(Content::model("# Report")),
        ])
        .await;

        let response =
            call_agent_until_author("NVDA", &runner, "user", "session", "SummarizerAgent")
                .await
                .unwrap();
        assert_eq!(response, "# Report");
    }

    #[tokio::test]
    async fn test_missing_session_is_an_error() {
        let runner = runner_for(Vec::new()).await;
        let err = call_agent_async("Hi", &runner, "user", "nope").await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::DemoError::Agent(Error::SessionNotFound(_))
        ));
        let stored = runner
            .session_service()
            .get_session(&agent_core::SessionKey::new("app", "user", "session"))
            .await
            .unwrap()
            .unwrap();
        assert!(stored.events.is_empty());
    }
}
