//! Before-tool callbacks

use crate::tools::search_tool::SEARCH_TOOL_NAME;
use crate::tools::weather::today;
use agent_tools::{BeforeToolCallback, Tool, ToolContext};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Append today's date to web search queries
///
/// Only `duckduckgo_results_json` calls are rewritten; the tool always runs.
pub fn add_todays_date_to_search(tool: &dyn Tool, args: &mut Value, ctx: &ToolContext) -> Option<Value> {
    info!(agent = ctx.agent_name(), tool = tool.name(), %args, "[Callback] Before tool call");

    if tool.name() != SEARCH_TOOL_NAME {
        info!(tool = tool.name(), "[Callback] Not modifying args");
        return None;
    }

    if let Some(query) = args.get("query").and_then(Value::as_str) {
        let dated = format!("{query} Todays date: {}", today());
        args["query"] = Value::String(dated);
        info!(%args, "[Callback] Modified args");
    }
    None
}

/// [`add_todays_date_to_search`] in the shape agents accept
pub fn todays_date_callback() -> BeforeToolCallback {
    Arc::new(add_todays_date_to_search)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::MockWebSearch;
    use crate::tools::search_tool::DuckDuckGoSearchTool;
    use crate::tools::basic::say_goodbye_tool;
    use agent_core::State;
    use serde_json::json;

    #[test]
    fn test_rewrites_search_query() {
        let tool = DuckDuckGoSearchTool::new(Arc::new(MockWebSearch::new()), 5);
        let ctx = ToolContext::new("AcquisitionResearchAgent", "call_1", State::new());
        let mut args = json!({"query": "NVIDIA acquisitions"});

        assert!(add_todays_date_to_search(&tool, &mut args, &ctx).is_none());
        assert_eq!(
            args["query"],
            format!("NVIDIA acquisitions Todays date: {}", today())
        );
    }

    #[test]
    fn test_other_tools_untouched() {
        let tool = say_goodbye_tool();
        let ctx = ToolContext::new("farewell_agent", "call_1", State::new());
        let mut args = json!({"query": "unchanged"});

        let callback = todays_date_callback();
        assert!(callback(&tool, &mut args, &ctx).is_none());
        assert_eq!(args, json!({"query": "unchanged"}));
    }
}
