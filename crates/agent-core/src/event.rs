//! Events
//!
//! Everything an agent produces during an invocation is an [`Event`]: model
//! text, function calls, tool responses and failures. Events are appended to
//! the session in order, and their [`EventActions`] carry the side effects
//! (state changes, transfers, escalation) the session service applies.

use crate::{Content, FunctionCall, FunctionResponse, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author used for events created from user input
pub const USER_AUTHOR: &str = "user";

/// Side effects attached to an event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventActions {
    /// State changes applied when the event is appended
    #[serde(default, skip_serializing_if = "State::is_empty")]
    pub state_delta: State,
    /// Name of the agent that should take over the turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_to_agent: Option<String>,
    /// The agent gave up and hands the problem upwards
    #[serde(default)]
    pub escalate: bool,
    /// Tool output is itself the final answer
    #[serde(default)]
    pub skip_summarization: bool,
}

impl EventActions {
    pub fn is_empty(&self) -> bool {
        self.state_delta.is_empty()
            && self.transfer_to_agent.is_none()
            && !self.escalate
            && !self.skip_summarization
    }
}

/// One entry of a session's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub invocation_id: String,
    /// `"user"` or the name of the agent that produced the event
    pub author: String,
    /// Dotted path of parallel branches, `None` on the main line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default)]
    pub actions: EventActions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub partial: bool,
    pub timestamp: DateTime<Utc>,
}

impl Event {
    /// Create an empty event for `author`
    pub fn new(invocation_id: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            invocation_id: invocation_id.into(),
            author: author.into(),
            branch: None,
            content: None,
            actions: EventActions::default(),
            error_message: None,
            partial: false,
            timestamp: Utc::now(),
        }
    }

    /// Event recording the user's message
    pub fn user_message(invocation_id: impl Into<String>, content: Content) -> Self {
        Self::new(invocation_id, USER_AUTHOR).with_content(content)
    }

    pub fn with_content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch;
        self
    }

    pub fn with_actions(mut self, actions: EventActions) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_state_delta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.actions.state_delta.set(key, value);
        self
    }

    /// Mark this event as a failure that escalates to the caller
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self.actions.escalate = true;
        self
    }

    pub fn function_calls(&self) -> Vec<&FunctionCall> {
        self.content
            .as_ref()
            .map(Content::function_calls)
            .unwrap_or_default()
    }

    pub fn function_responses(&self) -> Vec<&FunctionResponse> {
        self.content
            .as_ref()
            .map(Content::function_responses)
            .unwrap_or_default()
    }

    /// First text part of the content
    pub fn first_text(&self) -> Option<&str> {
        self.content.as_ref().and_then(Content::first_text)
    }

    /// Whether this event ends the agent's turn
    ///
    /// Tool results marked `skip_summarization` are final. Otherwise an event
    /// is final when it carries neither function calls nor function responses
    /// and is not a streaming fragment.
    pub fn is_final_response(&self) -> bool {
        if self.actions.skip_summarization {
            return true;
        }
        self.function_calls().is_empty() && self.function_responses().is_empty() && !self.partial
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        if self.error_message.is_some() {
            "error"
        } else if !self.function_calls().is_empty() {
            "function_call"
        } else if !self.function_responses().is_empty() {
            "function_response"
        } else if self.first_text().is_some() {
            "text"
        } else {
            "empty"
        }
    }

    /// Whether an agent running on `current` can see this event
    ///
    /// Main-line agents see everything. Inside a branch, events from the
    /// main line, the same branch and its ancestors are visible; sibling
    /// branches are not.
    pub fn is_visible_from(&self, current: Option<&str>) -> bool {
        match (&self.branch, current) {
            (None, _) | (Some(_), None) => true,
            (Some(event_branch), Some(current)) => {
                current == event_branch
                    || current
                        .strip_prefix(event_branch.as_str())
                        .is_some_and(|rest| rest.starts_with('.'))
            }
        }
    }
}
