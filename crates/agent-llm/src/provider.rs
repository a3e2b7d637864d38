//! LLM provider trait definition

use crate::{LlmRequest, LlmResponse, Result};
use async_trait::async_trait;

/// A model backend
///
/// Implementations turn an [`LlmRequest`] into one model turn. They do not
/// run tools; function calls are returned in the response content for the
/// caller to execute.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate the next model turn
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse>;

    /// Model identifier in `provider/model` form, used to fill requests
    fn model(&self) -> &str;

    /// Backend name (e.g. "openai", "ollama_chat")
    fn name(&self) -> &str;
}
