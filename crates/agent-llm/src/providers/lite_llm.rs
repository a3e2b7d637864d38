//! OpenAI-compatible adapter addressed by `provider/model` strings
//!
//! `openai/qwen3:8b` talks to any OpenAI-compatible `/chat/completions`
//! endpoint (LM Studio, vLLM, llama.cpp or OpenAI itself) configured through
//! `OPENAI_API_BASE` and `OPENAI_API_KEY`. `ollama_chat/qwen3:8b` (or
//! `ollama/...`) talks to the OpenAI-compatible endpoint of an Ollama server
//! at `OLLAMA_API_BASE`.
//!
//! # Example
//!
//! ```no_run
//! use agent_core::Content;
//! use agent_llm::providers::LiteLlm;
//! use agent_llm::{LlmProvider, LlmRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let llm = LiteLlm::from_env("openai/qwen3:8b")?;
//!     let request = LlmRequest::builder(llm.model())
//!         .add_content(Content::user("Hello!"))
//!         .build();
//!     let response = llm.generate(request).await?;
//!     println!("{:?}", response.content);
//!     Ok(())
//! }
//! ```

use crate::{FinishReason, FunctionDeclaration, LlmError, LlmProvider, LlmRequest, LlmResponse, Result, TokenUsage};
use agent_core::{Content, FunctionCall, Part, Role};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_OLLAMA_API_BASE: &str = "http://localhost:11434";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Which server family a model string addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    OpenAi,
    Ollama,
}

impl Backend {
    /// Split `provider/model` into backend and bare model name
    ///
    /// Strings without a known prefix are sent to the OpenAI-compatible backend unchanged.
    pub fn parse(model: &str) -> (Self, &str) {
        match model.split_once('/') {
            Some(("openai", name)) => (Backend::OpenAi, name),
            Some(("ollama_chat" | "ollama", name)) => (Backend::Ollama, name),
            _ => (Backend::OpenAi, model),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::OpenAi => write!(f, "openai"),
            Backend::Ollama => write!(f, "ollama_chat"),
        }
    }
}

/// Connection settings for one backend
#[derive(Debug, Clone)]
pub struct LiteLlmConfig {
    /// Base URL; for OpenAI it includes `/v1`, for Ollama it is the server root
    pub api_base: String,

    /// Bearer token; local servers usually accept any value or none
    pub api_key: Option<String>,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
}

impl LiteLlmConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read the settings for `backend` from the environment
    ///
    /// OpenAI: `OPENAI_API_BASE` and `OPENAI_API_KEY`. Ollama: `OLLAMA_API_BASE`.
    pub fn from_env(backend: Backend) -> Self {
        Self::from_lookup(backend, |key| std::env::var(key).ok())
    }

    /// Same as [`LiteLlmConfig::from_env`] with an arbitrary variable lookup
    pub fn from_lookup(backend: Backend, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        match backend {
            Backend::OpenAi => Self {
                api_base: non_empty("OPENAI_API_BASE")
                    .unwrap_or_else(|| DEFAULT_OPENAI_API_BASE.to_string()),
                api_key: non_empty("OPENAI_API_KEY"),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            Backend::Ollama => Self {
                api_base: non_empty("OLLAMA_API_BASE")
                    .unwrap_or_else(|| DEFAULT_OLLAMA_API_BASE.to_string()),
                api_key: None,
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Full chat-completions URL for `backend`
    pub fn chat_completions_url(&self, backend: Backend) -> String {
        let base = self.api_base.trim_end_matches('/');
        match backend {
            Backend::OpenAi => format!("{base}/chat/completions"),
            Backend::Ollama => {
                let root = base.strip_suffix("/v1").unwrap_or(base);
                format!("{root}/v1/chat/completions")
            }
        }
    }
}

/// Chat-completions client selected by a `provider/model` string
pub struct LiteLlm {
    client: Client,
    model: String,
    backend: Backend,
    config: LiteLlmConfig,
}

impl LiteLlm {
    /// Create an adapter for `model` with explicit settings
    pub fn with_config(model: impl Into<String>, config: LiteLlmConfig) -> Result<Self> {
        let model = model.into();
        let (backend, name) = Backend::parse(&model);
        if name.trim().is_empty() {
            return Err(LlmError::ConfigurationError(format!(
                "Model string '{model}' has no model name"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            model,
            backend,
            config,
        })
    }

    /// Create an adapter for `model` configured from the environment
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let model = model.into();
        let (backend, _) = Backend::parse(&model);
        Self::with_config(model, LiteLlmConfig::from_env(backend))
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn config(&self) -> &LiteLlmConfig {
        &self.config
    }
}

#[async_trait]
impl LlmProvider for LiteLlm {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse> {
        let (_, model_name) = Backend::parse(&request.model);
        let url = self.config.chat_completions_url(self.backend);
        debug!(%url, contents = request.contents.len(), tools = request.tools.len(), "Sending chat completion");

        let chat_request = ChatRequest {
            model: model_name.to_string(),
            messages: build_messages(request.system_instruction.as_deref(), &request.contents)?,
            tools: if request.tools.is_empty() {
                None
            } else {
                Some(convert_tools(&request.tools))
            },
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let mut builder = self.client.post(&url).json(&chat_request);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }
        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(LlmError::from_status(status, error_text, &request.model));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::UnexpectedResponse(format!("Failed to parse response: {e}")))?;

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::UnexpectedResponse("No choices in response".to_string()))?;

        let usage = chat_response
            .usage
            .map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        let finish_reason = choice
            .finish_reason
            .as_deref()
            .map_or(FinishReason::Other, FinishReason::from_openai);

        debug!(
            ?finish_reason,
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "Received chat completion"
        );

        Ok(LlmResponse {
            content: parse_message(choice.message)?,
            finish_reason,
            usage,
        })
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn name(&self) -> &str {
        match self.backend {
            Backend::OpenAi => "openai",
            Backend::Ollama => "ollama_chat",
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ChatTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
}

#[derive(Debug, Serialize, PartialEq)]
struct ChatMessage {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ChatToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl ChatMessage {
    fn text(role: &'static str, content: String) -> Self {
        Self {
            role,
            content: Some(content),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatTool {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: ChatFunction,
}

#[derive(Debug, Serialize)]
struct ChatFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct ChatToolCall {
    id: String,
    #[serde(rename = "type", default = "function_type")]
    tool_type: String,
    function: ChatFunctionCall,
}

fn function_type() -> String {
    "function".to_string()
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct ChatFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ChatToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

// ============================================================================
// Conversion functions
// ============================================================================

/// Flatten the conversation into chat messages
///
/// A model turn becomes one assistant message carrying its text and tool
/// calls. Each function response becomes its own `tool` message.
fn build_messages(system: Option<&str>, contents: &[Content]) -> Result<Vec<ChatMessage>> {
    let mut messages = Vec::new();

    if let Some(system) = system {
        messages.push(ChatMessage::text("system", system.to_string()));
    }

    for content in contents {
        let mut text = String::new();
        let mut tool_calls = Vec::new();
        let mut tool_messages = Vec::new();

        for part in &content.parts {
            match part {
                Part::Text(t) => text.push_str(t),
                Part::FunctionCall(call) => tool_calls.push(ChatToolCall {
                    id: call.id.clone(),
                    tool_type: function_type(),
                    function: ChatFunctionCall {
                        name: call.name.clone(),
                        arguments: serde_json::to_string(&call.args)?,
                    },
                }),
                Part::FunctionResponse(response) => tool_messages.push(ChatMessage {
                    role: "tool",
                    content: Some(serde_json::to_string(&response.response)?),
                    tool_calls: None,
                    tool_call_id: Some(response.id.clone()),
                }),
            }
        }

        let role = match content.role {
            Role::User => "user",
            Role::Model => "assistant",
        };

        if !text.is_empty() || !tool_calls.is_empty() {
            messages.push(ChatMessage {
                role,
                content: if text.is_empty() { None } else { Some(text) },
                tool_calls: if tool_calls.is_empty() {
                    None
                } else {
                    Some(tool_calls)
                },
                tool_call_id: None,
            });
        }
        messages.extend(tool_messages);
    }

    Ok(messages)
}

fn convert_tools(tools: &[FunctionDeclaration]) -> Vec<ChatTool> {
    tools
        .iter()
        .map(|tool| ChatTool {
            tool_type: "function",
            function: ChatFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.parameters.clone(),
            },
        })
        .collect()
}

/// Convert the assistant message back into a model turn
fn parse_message(msg: ChatResponseMessage) -> Result<Option<Content>> {
    let mut parts = Vec::new();

    if let Some(text) = msg.content.filter(|text| !text.is_empty()) {
        parts.push(Part::Text(text));
    }

    for call in msg.tool_calls.unwrap_or_default() {
        let args = if call.function.arguments.trim().is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&call.function.arguments).map_err(|e| {
                LlmError::UnexpectedResponse(format!("Failed to parse tool arguments: {e}"))
            })?
        };
        parts.push(Part::FunctionCall(FunctionCall {
            id: call.id,
            name: call.function.name,
            args,
        }));
    }

    if parts.is_empty() {
        return Ok(None);
    }
    Ok(Some(Content::new(Role::Model, parts)))
}
