//! Tool framework for the agent demos
//!
//! This crate provides the [`Tool`] trait agents call into, the
//! [`ToolContext`] giving tools access to session state, the status-tagged
//! [`ToolResponse`] mapping, closure-backed [`FunctionTool`]s, a
//! [`ToolRegistry`] and the [`BeforeToolCallback`] hook.

pub mod callback;
pub mod context;
pub mod function;
pub mod registry;
pub mod response;
pub mod tool;

pub use callback::BeforeToolCallback;
pub use context::ToolContext;
pub use function::FunctionTool;
pub use registry::ToolRegistry;
pub use response::{ToolResponse, ToolStatus};
pub use tool::{Tool, optional_str, required_f64, required_str};
