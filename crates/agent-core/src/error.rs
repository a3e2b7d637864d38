//! Error types for agent-core

use thiserror::Error;

/// Result type alias for agent-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for agent operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Agent initialization failed
    #[error("Agent initialization failed: {0}")]
    InitializationFailed(String),

    /// Agent processing failed
    #[error("Agent processing failed: {0}")]
    ProcessingFailed(String),

    /// No session stored under the given key
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// A session with the same id already exists
    #[error("Session already exists: {0}")]
    SessionExists(String),

    /// Transfer target or lookup name is unknown
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    /// Instruction template referenced a state key that is not set
    #[error("Context variable not found: `{0}`")]
    MissingStateKey(String),

    /// Tool execution failed
    #[error("Tool execution failed: {0}")]
    ToolFailed(String),

    /// Model backend failed
    #[error("LLM call failed: {0}")]
    Llm(String),

    /// The consumer of an invocation went away
    #[error("Invocation cancelled")]
    Cancelled,
}
