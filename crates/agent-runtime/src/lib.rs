//! Agent runtime for the agent demos
//!
//! This crate provides the LLM agent loop ([`LlmAgent`]), the in-memory
//! session store and the [`Runner`] that turns a user message into a stream
//! of events.

pub mod instruction;
pub mod llm_agent;
pub mod runner;
pub mod session;
pub mod transfer;

pub use instruction::inject_state;
pub use llm_agent::{LlmAgent, LlmAgentBuilder};
pub use runner::{EventStream, Runner};
pub use session::InMemorySessionService;
pub use transfer::{TRANSFER_TOOL_NAME, TransferToAgentTool};
