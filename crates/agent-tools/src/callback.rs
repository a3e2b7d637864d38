//! Hooks run around tool execution

use crate::{Tool, ToolContext};
use serde_json::Value;
use std::sync::Arc;

/// Runs before a tool executes
///
/// The callback may rewrite the arguments in place. Returning `Some(value)`
/// skips the tool and uses `value` as its response.
pub type BeforeToolCallback =
    Arc<dyn Fn(&dyn Tool, &mut Value, &ToolContext) -> Option<Value> + Send + Sync>;
