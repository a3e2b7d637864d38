//! Conversation content
//!
//! A `Content` is one turn of the conversation: a role plus an ordered list
//! of parts. Parts are plain text, a function call requested by the model,
//! or the response of a tool to such a call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Who produced a piece of content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub id: String,
    pub name: String,
    pub args: Value,
}

/// The result of running a tool for a [`FunctionCall`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub id: String,
    pub name: String,
    pub response: Value,
}

/// One part of a content turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    Text(String),
    FunctionCall(FunctionCall),
    FunctionResponse(FunctionResponse),
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// A single conversation turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn new(role: Role, parts: Vec<Part>) -> Self {
        Self { role, parts }
    }

    /// User turn holding a single text part
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![Part::text(text)])
    }

    /// Model turn holding a single text part
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, vec![Part::text(text)])
    }

    /// First text part, if any
    pub fn first_text(&self) -> Option<&str> {
        self.parts.iter().find_map(Part::as_text)
    }

    /// All text parts joined, `None` when there are none
    pub fn text(&self) -> Option<String> {
        let texts: Vec<&str> = self.parts.iter().filter_map(Part::as_text).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    pub fn function_calls(&self) -> Vec<&FunctionCall> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::FunctionCall(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    pub fn function_responses(&self) -> Vec<&FunctionResponse> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::FunctionResponse(response) => Some(response),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_content() {
        let content = Content::user("Hello");
        assert_eq!(content.role, Role::User);
        assert_eq!(content.first_text(), Some("Hello"));
        assert!(content.function_calls().is_empty());
    }

    #[test]
    fn test_text_joins_parts() {
        let content = Content::new(
            Role::Model,
            vec![
                Part::text("Hello, "),
                Part::FunctionCall(FunctionCall {
                    id: "call_1".into(),
                    name: "say_hello".into(),
                    args: json!({}),
                }),
                Part::text("world"),
            ],
        );
        assert_eq!(content.text().as_deref(), Some("Hello, world"));
        assert_eq!(content.function_calls().len(), 1);
        assert_eq!(content.function_calls()[0].name, "say_hello");
    }

    #[test]
    fn test_no_text() {
        let content = Content::new(
            Role::User,
            vec![Part::FunctionResponse(FunctionResponse {
                id: "call_1".into(),
                name: "say_goodbye".into(),
                response: json!({"status": "success"}),
            })],
        );
        assert!(content.text().is_none());
        assert!(content.first_text().is_none());
        assert_eq!(content.function_responses().len(), 1);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_value(Role::Model).unwrap(), json!("model"));
        let part = serde_json::to_value(Part::text("hi")).unwrap();
        assert_eq!(part, json!({"text": "hi"}));
    }
}
