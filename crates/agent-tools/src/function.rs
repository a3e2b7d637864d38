//! Tools backed by plain synchronous functions

use crate::{Tool, ToolContext};
use agent_core::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type Handler = Arc<dyn Fn(&Value, &mut ToolContext) -> Result<Value> + Send + Sync>;

/// Wraps a closure as a [`Tool`]
///
/// # Example
///
/// ```
/// use agent_tools::{FunctionTool, ToolResponse};
/// use serde_json::json;
///
/// let tool = FunctionTool::new(
///     "say_goodbye",
///     "Provides a simple farewell message to conclude the conversation.",
///     json!({"type": "object", "properties": {}}),
///     |_args, _ctx| Ok(ToolResponse::report("Goodbye! Have a great day!").into()),
/// );
/// assert_eq!(agent_tools::Tool::name(&tool), "say_goodbye");
/// ```
#[derive(Clone)]
pub struct FunctionTool {
    name: String,
    description: String,
    input_schema: Value,
    handler: Handler,
}

impl FunctionTool {
    pub fn new<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
        handler: F,
    ) -> Self
    where
        F: Fn(&Value, &mut ToolContext) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            handler: Arc::new(handler),
        }
    }
}

impl fmt::Debug for FunctionTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionTool")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Tool for FunctionTool {
    async fn execute(&self, args: Value, ctx: &mut ToolContext) -> Result<Value> {
        (self.handler)(&args, ctx)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn input_schema(&self) -> Value {
        self.input_schema.clone()
    }
}
