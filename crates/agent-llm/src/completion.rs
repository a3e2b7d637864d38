//! Request and response types exchanged with a model backend

use crate::FunctionDeclaration;
use agent_core::Content;
use serde::{Deserialize, Serialize};

/// One model call: conversation so far, system instruction and tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    /// Model identifier in `provider/model` form
    pub model: String,

    /// Conversation history, oldest first
    pub contents: Vec<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<FunctionDeclaration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>,
}

impl LlmRequest {
    /// Create a builder for requests
    pub fn builder(model: impl Into<String>) -> LlmRequestBuilder {
        LlmRequestBuilder::new(model)
    }

    /// Look up a declared tool by name
    pub fn tool(&self, name: &str) -> Option<&FunctionDeclaration> {
        self.tools.iter().find(|tool| tool.name == name)
    }
}

/// Builder for [`LlmRequest`]
pub struct LlmRequestBuilder {
    request: LlmRequest,
}

impl LlmRequestBuilder {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            request: LlmRequest {
                model: model.into(),
                contents: Vec::new(),
                system_instruction: None,
                tools: Vec::new(),
                temperature: None,
                max_tokens: None,
            },
        }
    }

    pub fn contents(mut self, contents: Vec<Content>) -> Self {
        self.request.contents = contents;
        self
    }

    pub fn add_content(mut self, content: Content) -> Self {
        self.request.contents.push(content);
        self
    }

    pub fn system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.request.system_instruction = Some(instruction.into());
        self
    }

    pub fn tools(mut self, tools: Vec<FunctionDeclaration>) -> Self {
        self.request.tools = tools;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.request.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.request.max_tokens = Some(max_tokens);
        self
    }

    pub fn build(self) -> LlmRequest {
        self.request
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    Other,
}

impl FinishReason {
    /// Map an OpenAI-style `finish_reason` string
    pub fn from_openai(reason: &str) -> Self {
        match reason {
            "stop" => FinishReason::Stop,
            "length" => FinishReason::Length,
            "tool_calls" | "function_call" => FinishReason::ToolCalls,
            "content_filter" => FinishReason::ContentFilter,
            _ => FinishReason::Other,
        }
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: usize,
    pub output_tokens: usize,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> usize {
        self.input_tokens + self.output_tokens
    }
}

/// Result of one model call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// Model turn; `None` when the backend returned nothing usable
    pub content: Option<Content>,
    pub finish_reason: FinishReason,
    #[serde(default)]
    pub usage: TokenUsage,
}

impl LlmResponse {
    /// Text-only model response
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: Some(Content::model(text)),
            finish_reason: FinishReason::Stop,
            usage: TokenUsage::default(),
        }
    }

    /// Model response consisting of a single function call
    pub fn function_call(
        id: impl Into<String>,
        name: impl Into<String>,
        args: serde_json::Value,
    ) -> Self {
        Self {
            content: Some(Content::new(
                agent_core::Role::Model,
                vec![agent_core::Part::FunctionCall(agent_core::FunctionCall {
                    id: id.into(),
                    name: name.into(),
                    args,
                })],
            )),
            finish_reason: FinishReason::ToolCalls,
            usage: TokenUsage::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let request = LlmRequest::builder("openai/qwen3:8b")
            .add_content(Content::user("Hello"))
            .system_instruction("You are a helpful weather assistant.")
            .tools(vec![FunctionDeclaration::new(
                "get_weather",
                "Retrieves the current weather report for a specified city.",
                json!({"type": "object"}),
            )])
            .max_tokens(2048)
            .temperature(0.7)
            .build();

        assert_eq!(request.model, "openai/qwen3:8b");
        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.max_tokens, Some(2048));
        assert_eq!(request.temperature, Some(0.7));
        assert!(request.tool("get_weather").is_some());
        assert!(request.tool("get_current_time").is_none());
    }

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(FinishReason::from_openai("stop"), FinishReason::Stop);
        assert_eq!(FinishReason::from_openai("length"), FinishReason::Length);
        assert_eq!(FinishReason::from_openai("tool_calls"), FinishReason::ToolCalls);
        assert_eq!(
            FinishReason::from_openai("content_filter"),
            FinishReason::ContentFilter
        );
        assert_eq!(FinishReason::from_openai("whatever"), FinishReason::Other);
    }

    #[test]
    fn test_response_constructors() {
        let text = LlmResponse::text("Sunny");
        assert_eq!(
            text.content.as_ref().and_then(Content::first_text),
            Some("Sunny")
        );

        let call = LlmResponse::function_call("c1", "say_hello", json!({"name": "Bob"}));
        let content = call.content.unwrap();
        assert_eq!(content.function_calls()[0].args["name"], "Bob");
        assert_eq!(call.finish_reason, FinishReason::ToolCalls);
    }

    #[test]
    fn test_token_usage() {
        let usage = TokenUsage {
            input_tokens: 100,
            output_tokens: 50,
        };
        assert_eq!(usage.total(), 150);
    }
}
