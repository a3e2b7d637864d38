//! Concrete provider implementations

pub mod lite_llm;

pub use lite_llm::{Backend, LiteLlm, LiteLlmConfig};
