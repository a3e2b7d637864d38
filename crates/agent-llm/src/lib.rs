//! Model backend abstraction for the agent demos
//!
//! This crate provides:
//!
//! - Request/response types for one model call
//! - Function declarations for tool calling
//! - The `LlmProvider` trait
//! - `LiteLlm`, an OpenAI-compatible adapter selected by `provider/model` strings
//! - `ScriptedLlm`, a deterministic provider for tests and offline runs

pub mod completion;
pub mod error;
pub mod provider;
pub mod providers;
pub mod scripted;
pub mod tools;

pub use completion::{FinishReason, LlmRequest, LlmRequestBuilder, LlmResponse, TokenUsage};
pub use error::{LlmError, Result};
pub use provider::LlmProvider;
pub use providers::{LiteLlm, LiteLlmConfig};
pub use scripted::ScriptedLlm;
pub use tools::FunctionDeclaration;
