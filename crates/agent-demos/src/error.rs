//! Error types for the demos

use thiserror::Error;

/// Demo specific errors
#[derive(Debug, Error)]
pub enum DemoError {
    /// Web search request or parsing failed
    #[error("Search error: {0}")]
    Search(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading prompts or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required agent could not be built
    #[error("Agent unavailable: {0}")]
    AgentUnavailable(String),

    /// Error raised by the agent framework
    #[error(transparent)]
    Agent(#[from] agent_core::Error),
}

/// Result type alias for demo operations
pub type Result<T> = std::result::Result<T, DemoError>;

/// Convert DemoError to agent_core::Error
impl From<DemoError> for agent_core::Error {
    fn from(err: DemoError) -> Self {
        match err {
            DemoError::Agent(inner) => inner,
            other => agent_core::Error::ToolFailed(other.to_string()),
        }
    }
}
