//! Errors raised while talking to a model backend

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LlmError>;

#[derive(Error, Debug)]
pub enum LlmError {
    /// Backend answered with a status we have no better mapping for
    #[error("Model request failed: {0}")]
    RequestFailed(String),

    #[error("Backend rejected the API key")]
    AuthenticationFailed,

    #[error("Backend rate limit hit: {0}")]
    RateLimitExceeded(String),

    #[error("Backend rejected the request: {0}")]
    InvalidRequest(String),

    /// The backend does not serve this model name
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reply did not look like a chat completion
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Bad model string or provider settings
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A scripted provider was called more often than scripted
    #[error("No scripted response left for {0}")]
    ScriptExhausted(String),
}

impl LlmError {
    /// Map a non-success HTTP reply to an error
    pub fn from_status(status: reqwest::StatusCode, body: String, model: &str) -> Self {
        match status.as_u16() {
            401 | 403 => Self::AuthenticationFailed,
            429 => Self::RateLimitExceeded(body),
            400 => Self::InvalidRequest(body),
            404 => Self::ModelNotFound(model.to_string()),
            _ => Self::RequestFailed(format!("HTTP {status}: {body}")),
        }
    }
}

impl From<LlmError> for agent_core::Error {
    fn from(err: LlmError) -> Self {
        agent_core::Error::Llm(err.to_string())
    }
}
