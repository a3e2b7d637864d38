//! Tool trait definition

use crate::ToolContext;
use agent_core::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Trait for tools that agents can execute
///
/// Tools are functions the model can call. Each tool provides a name,
/// description and JSON schema for its input. Tools that need session state
/// read and write it through the [`ToolContext`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with the model-supplied arguments
    ///
    /// Expected failures (unknown city, empty search) should be reported in
    /// the returned value, normally a [`crate::ToolResponse`]. An `Err` is
    /// turned into an error response by the caller.
    async fn execute(&self, args: Value, ctx: &mut ToolContext) -> Result<Value>;

    /// Must be unique among the tools of one agent
    fn name(&self) -> &str;

    /// Helps the model decide when to use this tool
    fn description(&self) -> &str;

    /// Input schema (JSON Schema object)
    fn input_schema(&self) -> Value;
}

/// Required string argument
pub fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::ToolFailed(format!("missing string argument `{key}`")))
}

/// Optional string argument; `null` counts as absent
pub fn optional_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(Value::as_str)
}

/// Required numeric argument, accepting numbers or numeric strings
pub fn required_f64(args: &Value, key: &str) -> Result<f64> {
    match args.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| Error::ToolFailed(format!("missing numeric argument `{key}`")))
}
